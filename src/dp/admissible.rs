//! Admissible-action generation.
//!
//! Candidate binary vectors for each operation are enumerated once per
//! problem (all `2^N` subsets, pre-filtered by the state-independent daily
//! capacity). Per call only the state- and day-dependent predicates are
//! applied: a candidate survives iff all of its entries are *eligible*
//! fields, i.e. fields that
//!
//! 1. have not received the operation yet but have received its predecessor,
//! 2. on a day inside the operation's day window,
//! 3. with current GDU inside the operation's GDU window (if any).
//!
//! The all-zero vector passes every filter, so each returned set contains
//! the no-op and the joint action space is never empty.

use crate::models::{CropProblem, FieldSet, FieldState, JointAction, Operation};

/// Precomputed per-operation candidate vectors for one problem.
#[derive(Debug, Clone)]
pub struct ActionSpace {
    field_count: usize,
    plant: Vec<FieldSet>,
    detassel: Vec<FieldSet>,
    harvest: Vec<FieldSet>,
}

impl ActionSpace {
    /// Enumerates all capacity-feasible vectors for each operation, in
    /// [`FieldSet::all_subsets`] order.
    pub fn new(problem: &CropProblem) -> Self {
        let n = problem.field_count();
        let capped = |op: Operation| -> Vec<FieldSet> {
            let cap = problem.rule(op).max_fields();
            FieldSet::all_subsets(n).filter(|s| s.len() <= cap).collect()
        };
        Self {
            field_count: n,
            plant: capped(Operation::Plant),
            detassel: capped(Operation::Detassel),
            harvest: capped(Operation::Harvest),
        }
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Capacity-feasible candidates for `op`.
    #[inline]
    pub fn candidates(&self, op: Operation) -> &[FieldSet] {
        match op {
            Operation::Plant => &self.plant,
            Operation::Detassel => &self.detassel,
            Operation::Harvest => &self.harvest,
        }
    }

    /// Filters the candidates of every operation against `state` on `day`.
    pub fn admissible(&self, problem: &CropProblem, state: &FieldState, day: i64) -> AdmissibleSets {
        assert_eq!(
            state.field_count(),
            self.field_count,
            "state has {} fields, problem has {}",
            state.field_count(),
            self.field_count
        );
        let filter = |op: Operation| -> Vec<FieldSet> {
            let eligible = eligible_fields(problem, state, day, op);
            self.candidates(op)
                .iter()
                .copied()
                .filter(|c| c.is_subset(eligible))
                .collect()
        };
        AdmissibleSets {
            plant: filter(Operation::Plant),
            detassel: filter(Operation::Detassel),
            harvest: filter(Operation::Harvest),
        }
    }
}

/// Fields that may receive `op` on `day` given `state`.
pub fn eligible_fields(problem: &CropProblem, state: &FieldState, day: i64, op: Operation) -> FieldSet {
    let rule = problem.rule(op);
    if !rule.allows_day(day) {
        return FieldSet::EMPTY;
    }
    let ready = match op.predecessor() {
        None => FieldSet::all(state.field_count()),
        Some(prev) => state.done(prev),
    };
    let pending = ready.difference(state.done(op));
    FieldSet::from_indices(pending.iter().filter(|&i| rule.allows_gdu(state.gdu[i])))
}

/// Independently filtered candidate vectors for the three operations.
///
/// The joint action space is their Cartesian product, restricted to
/// combinations in which no field receives two operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissibleSets {
    pub plant: Vec<FieldSet>,
    pub detassel: Vec<FieldSet>,
    pub harvest: Vec<FieldSet>,
}

impl AdmissibleSets {
    /// Admissible vectors for `op`.
    #[inline]
    pub fn get(&self, op: Operation) -> &[FieldSet] {
        match op {
            Operation::Plant => &self.plant,
            Operation::Detassel => &self.detassel,
            Operation::Harvest => &self.harvest,
        }
    }

    /// Joint actions in enumeration order: planting vector outermost,
    /// harvesting innermost, each in [`FieldSet::all_subsets`] order
    /// (lexicographic over the `{0,1}` vectors, field 0 most significant).
    /// The first item is always [`JointAction::NOOP`].
    ///
    /// This order is the tie-break for equal-value actions.
    pub fn joint_actions(&self) -> impl Iterator<Item = JointAction> + '_ {
        self.plant.iter().flat_map(move |&p| {
            self.detassel.iter().flat_map(move |&d| {
                self.harvest
                    .iter()
                    .map(move |&h| JointAction::new(p, d, h))
                    .filter(JointAction::is_exclusive)
            })
        })
    }

    /// Number of joint actions.
    pub fn joint_count(&self) -> usize {
        self.joint_actions().count()
    }

    /// Whether `action` is a member of the joint action space.
    pub fn contains(&self, action: &JointAction) -> bool {
        action.is_exclusive()
            && self.plant.contains(&action.plant)
            && self.detassel.contains(&action.detassel)
            && self.harvest.contains(&action.harvest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, OperationRule, Window};

    fn fs(indices: &[usize]) -> FieldSet {
        FieldSet::from_indices(indices.iter().copied())
    }

    fn state(gdu: &[i64], planted: &[usize], detasseled: &[usize], harvested: &[usize]) -> FieldState {
        FieldState {
            gdu: gdu.to_vec(),
            planted: fs(planted),
            detasseled: fs(detasseled),
            harvested: fs(harvested),
        }
    }

    #[test]
    fn test_candidates_respect_capacity() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        // Subsets of 4 with size <= 3: 16 - 1
        assert_eq!(space.candidates(Operation::Plant).len(), 15);
        // Size <= 2: 1 + 4 + 6
        assert_eq!(space.candidates(Operation::Detassel).len(), 11);
        assert_eq!(space.candidates(Operation::Harvest).len(), 11);
        assert_eq!(space.candidates(Operation::Plant)[0], FieldSet::EMPTY);
    }

    #[test]
    fn test_planting_day_zero() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let sets = space.admissible(&p, &FieldState::zero(4), 0);
        assert_eq!(sets.plant.len(), 15);
        assert_eq!(sets.detassel, vec![FieldSet::EMPTY]);
        assert_eq!(sets.harvest, vec![FieldSet::EMPTY]);
        assert_eq!(sets.joint_count(), 15);
    }

    #[test]
    fn test_planting_outside_window() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let sets = space.admissible(&p, &FieldState::zero(4), 6);
        assert_eq!(sets.plant, vec![FieldSet::EMPTY]);
        assert_eq!(sets.joint_count(), 1);
    }

    #[test]
    fn test_no_replanting() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let s = state(&[0, 0, 0, 0], &[0, 1], &[], &[]);
        let sets = space.admissible(&p, &s, 1);
        assert!(sets.plant.iter().all(|v| v.is_subset(fs(&[2, 3]))));
        assert_eq!(sets.plant, vec![FieldSet::EMPTY, fs(&[3]), fs(&[2]), fs(&[2, 3])]);
    }

    #[test]
    fn test_detassel_requires_planting_and_gdu() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        // Field 0 planted, in GDU window. Field 1 planted, too young.
        // Field 2 unplanted with (artificial) GDU in window.
        let s = state(&[800, 700, 800, 0], &[0, 1], &[], &[]);
        let sets = space.admissible(&p, &s, 31);
        assert_eq!(sets.detassel, vec![FieldSet::EMPTY, fs(&[0])]);
    }

    #[test]
    fn test_detassel_outside_day_window() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let s = state(&[800, 800, 800, 800], &[0, 1, 2, 3], &[], &[]);
        assert_eq!(space.admissible(&p, &s, 29).detassel, vec![FieldSet::EMPTY]);
        assert_eq!(space.admissible(&p, &s, 34).detassel, vec![FieldSet::EMPTY]);
        // In window: all pairs allowed, capped at 2
        assert_eq!(space.admissible(&p, &s, 33).detassel.len(), 11);
    }

    #[test]
    fn test_harvest_requires_detassel_and_gdu() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let s = state(&[1450, 1450, 1399, 1450], &[0, 1, 2, 3], &[0, 2, 3], &[3]);
        let sets = space.admissible(&p, &s, 58);
        // Field 1 not detasseled, field 2 too young, field 3 already harvested
        assert_eq!(sets.harvest, vec![FieldSet::EMPTY, fs(&[0])]);
    }

    #[test]
    fn test_gdu_window_bounds_are_closed() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let s = state(&[1400, 1500, 1501, 0], &[0, 1, 2], &[0, 1, 2], &[]);
        let sets = space.admissible(&p, &s, 60);
        assert!(sets.harvest.contains(&fs(&[0, 1])));
        assert!(!sets.harvest.iter().any(|v| v.contains(2)));
    }

    #[test]
    fn test_noop_always_first() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        for day in [0, 3, 31, 59, 60, 61] {
            let sets = space.admissible(&p, &FieldState::zero(4), day);
            assert_eq!(sets.joint_actions().next(), Some(JointAction::NOOP));
            assert!(sets.contains(&JointAction::NOOP));
        }
    }

    #[test]
    fn test_zero_capacity_leaves_only_noop() {
        let p = CropProblem::new(5)
            .with_field(Field::new("F1", 1.0))
            .with_planting(OperationRule::new(0, Window::new(0, 5)));
        let space = ActionSpace::new(&p);
        let sets = space.admissible(&p, &FieldState::zero(1), 0);
        assert_eq!(sets.plant, vec![FieldSet::EMPTY]);
    }

    #[test]
    fn test_joint_actions_exclude_double_operations() {
        // Overlapping windows and an inconsistent state where field 0 is
        // "detasseled" without being planted: plant and harvest both eligible.
        let p = CropProblem::new(5)
            .with_field(Field::new("F1", 1.0))
            .with_gdu_per_day(0);
        let space = ActionSpace::new(&p);
        let s = state(&[1450], &[], &[0], &[]);
        let sets = space.admissible(&p, &s, 0);
        assert_eq!(sets.plant, vec![FieldSet::EMPTY, fs(&[0])]);
        assert_eq!(sets.harvest, vec![FieldSet::EMPTY, fs(&[0])]);

        let joint: Vec<JointAction> = sets.joint_actions().collect();
        assert_eq!(joint.len(), 3);
        assert!(joint.iter().all(JointAction::is_exclusive));
        assert!(!sets.contains(&JointAction::new(fs(&[0]), FieldSet::EMPTY, fs(&[0]))));
    }

    #[test]
    fn test_joint_action_order() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let sets = space.admissible(&p, &FieldState::zero(4), 0);
        let joint: Vec<JointAction> = sets.joint_actions().collect();
        assert!(joint
            .windows(2)
            .all(|w| w[0].plant.to_binary(4) < w[1].plant.to_binary(4)));
        assert_eq!(joint[1].plant, fs(&[3]));
        assert_eq!(joint[2].plant, fs(&[2]));
        assert_eq!(joint[3].plant, fs(&[2, 3]));
    }

    #[test]
    fn test_eligible_fields() {
        let p = CropProblem::reference();
        let s = state(&[775, 0, 0, 0], &[0], &[], &[]);
        assert_eq!(eligible_fields(&p, &s, 2, Operation::Plant), fs(&[1, 2, 3]));
        assert_eq!(eligible_fields(&p, &s, 32, Operation::Detassel), fs(&[0]));
        assert_eq!(eligible_fields(&p, &s, 32, Operation::Harvest), FieldSet::EMPTY);
    }

    #[test]
    #[should_panic(expected = "fields")]
    fn test_dimension_mismatch_panics() {
        let p = CropProblem::reference();
        let space = ActionSpace::new(&p);
        let _ = space.admissible(&p, &FieldState::zero(3), 0);
    }
}
