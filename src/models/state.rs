//! Field-state and joint-action vectors.
//!
//! The state of all fields at the start of a day is four parallel vectors
//! (accumulated GDU plus the three operation flags). A day's decision is a
//! joint action: one binary vector per operation.

use serde::{Deserialize, Serialize};

use super::{FieldSet, Operation};

/// State of all fields at the start of a day.
///
/// # Invariant
/// For every field `i`: `harvested[i] ≤ detasseled[i] ≤ planted[i]`, and
/// along any trajectory every flag is non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldState {
    /// Accumulated growth-degree-units per field.
    pub gdu: Vec<i64>,
    /// Fields already planted.
    pub planted: FieldSet,
    /// Fields already detasseled.
    pub detasseled: FieldSet,
    /// Fields already harvested.
    pub harvested: FieldSet,
}

impl FieldState {
    /// The all-zero state for `n` fields (day 0 of every run).
    pub fn zero(n: usize) -> Self {
        Self {
            gdu: vec![0; n],
            planted: FieldSet::EMPTY,
            detasseled: FieldSet::EMPTY,
            harvested: FieldSet::EMPTY,
        }
    }

    /// Number of fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.gdu.len()
    }

    /// Flag vector recording which fields have received `op`.
    #[inline]
    pub fn done(&self, op: Operation) -> FieldSet {
        match op {
            Operation::Plant => self.planted,
            Operation::Detassel => self.detasseled,
            Operation::Harvest => self.harvested,
        }
    }

    /// Whether the ordering invariant holds and no flag points past the field count.
    pub fn is_consistent(&self) -> bool {
        let n = self.field_count();
        self.planted.fits(n)
            && self.harvested.is_subset(self.detasseled)
            && self.detasseled.is_subset(self.planted)
    }

    /// Whether `next` can follow `self` without any flag reverting.
    pub fn precedes(&self, next: &FieldState) -> bool {
        self.field_count() == next.field_count()
            && self.planted.is_subset(next.planted)
            && self.detasseled.is_subset(next.detasseled)
            && self.harvested.is_subset(next.harvested)
    }

    /// Flattened memo key for this state on `day`.
    pub fn key(&self, day: i64) -> StateKey {
        let mut packed = Vec::with_capacity(4 + self.gdu.len());
        packed.push(day);
        packed.push(i64::from(self.planted.bits()));
        packed.push(i64::from(self.detasseled.bits()));
        packed.push(i64::from(self.harvested.bits()));
        packed.extend_from_slice(&self.gdu);
        StateKey(packed.into_boxed_slice())
    }
}

/// Immutable composite key `(day, planted, detasseled, harvested, gdu...)`.
///
/// Hashing and equality are by value over the whole flattened slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Box<[i64]>);

impl StateKey {
    /// Day component of the key.
    #[inline]
    pub fn day(&self) -> i64 {
        self.0[0]
    }

    /// Flattened components.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

/// The decision for one day: which fields receive which operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointAction {
    pub plant: FieldSet,
    pub detassel: FieldSet,
    pub harvest: FieldSet,
}

impl JointAction {
    /// Do nothing today.
    pub const NOOP: JointAction = JointAction {
        plant: FieldSet::EMPTY,
        detassel: FieldSet::EMPTY,
        harvest: FieldSet::EMPTY,
    };

    /// Creates a joint action.
    pub fn new(plant: FieldSet, detassel: FieldSet, harvest: FieldSet) -> Self {
        Self {
            plant,
            detassel,
            harvest,
        }
    }

    /// Decision vector for `op`.
    #[inline]
    pub fn get(&self, op: Operation) -> FieldSet {
        match op {
            Operation::Plant => self.plant,
            Operation::Detassel => self.detassel,
            Operation::Harvest => self.harvest,
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.plant.is_empty() && self.detassel.is_empty() && self.harvest.is_empty()
    }

    /// Whether no field receives more than one operation.
    pub fn is_exclusive(&self) -> bool {
        self.plant.is_disjoint(self.detassel)
            && self.plant.is_disjoint(self.harvest)
            && self.detassel.is_disjoint(self.harvest)
    }

    /// Total number of (field, operation) applications.
    pub fn operation_count(&self) -> usize {
        self.plant.len() + self.detassel.len() + self.harvest.len()
    }

    /// The first operation (in precedence order) applied to `field`, if any.
    pub fn operation_on(&self, field: usize) -> Option<Operation> {
        Operation::ALL
            .into_iter()
            .find(|&op| self.get(op).contains(field))
    }

    /// Whether every vector has entries only below `n`.
    pub fn fits(&self, n: usize) -> bool {
        self.plant.fits(n) && self.detassel.fits(n) && self.harvest.fits(n)
    }
}
