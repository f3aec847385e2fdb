//! Problem definition: fields, horizon, operation rules and reward curve.
//!
//! A [`CropProblem`] holds every constant of one scheduling run. It is
//! immutable for the duration of a solve; validate it with
//! [`validate_problem`](crate::validation::validate_problem) first.

use serde::{Deserialize, Serialize};

use super::{Field, Operation, OperationRule, Window};

/// Harvest quality as a function of accumulated GDU.
///
/// `quality(g) = 1 - |g - target_gdu| / scale`. Quality peaks at 1.0 on
/// target and is not clamped: far from target it goes negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QualityCurve {
    /// GDU at which quality peaks.
    pub target_gdu: f64,
    /// GDU distance over which quality falls by 1.0.
    pub scale: f64,
}

impl QualityCurve {
    pub fn new(target_gdu: f64, scale: f64) -> Self {
        Self { target_gdu, scale }
    }

    /// Quality of a harvest at `gdu`.
    #[inline]
    pub fn quality(&self, gdu: i64) -> f64 {
        1.0 - (gdu as f64 - self.target_gdu).abs() / self.scale
    }
}

impl Default for QualityCurve {
    fn default() -> Self {
        Self::new(1450.0, 1000.0)
    }
}

/// Complete set of constants for one crop-scheduling run.
///
/// # Time Representation
/// Days are integers `0..=horizon`; day `horizon` is the last day an
/// operation may be applied.
///
/// # Examples
///
/// ```
/// use u_crop_schedule::models::{CropProblem, Field, OperationRule, Window};
///
/// let problem = CropProblem::new(60)
///     .with_field(Field::new("F1", 10.0))
///     .with_planting(OperationRule::new(1, Window::new(0, 2)));
/// assert_eq!(problem.field_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProblem {
    /// Fields, indexed by position.
    pub fields: Vec<Field>,
    /// Last day of the schedule (inclusive).
    pub horizon: i64,
    pub planting: OperationRule,
    pub detasseling: OperationRule,
    pub harvesting: OperationRule,
    /// GDU gained per day by a planted, unharvested field.
    pub gdu_per_day: i64,
    /// Harvest reward curve.
    pub quality: QualityCurve,
}

impl CropProblem {
    /// Creates a problem with no fields and operation rules that admit
    /// every day of the horizon at unit capacity.
    pub fn new(horizon: i64) -> Self {
        let all_days = Window::new(0, horizon);
        Self {
            fields: Vec::new(),
            horizon,
            planting: OperationRule::new(1, all_days),
            detasseling: OperationRule::new(1, all_days),
            harvesting: OperationRule::new(1, all_days),
            gdu_per_day: 25,
            quality: QualityCurve::default(),
        }
    }

    /// The reference four-field instance.
    ///
    /// Areas 10 / 20 / 15 / 20, capacities 3 / 2 / 2, planting days
    /// `[0, 5]`, detasseling days `[30, 33]` at GDU `[750, 1000]`,
    /// harvesting days `[58, 60]` at GDU `[1400, 1500]`, 25 GDU per day,
    /// quality target 1450 over 1000.
    pub fn reference() -> Self {
        Self::new(60)
            .with_field(Field::new("F1", 10.0))
            .with_field(Field::new("F2", 20.0))
            .with_field(Field::new("F3", 15.0))
            .with_field(Field::new("F4", 20.0))
            .with_planting(OperationRule::new(3, Window::new(0, 5)))
            .with_detasseling(
                OperationRule::new(2, Window::new(30, 33)).with_gdu_window(Window::new(750, 1000)),
            )
            .with_harvesting(
                OperationRule::new(2, Window::new(58, 60)).with_gdu_window(Window::new(1400, 1500)),
            )
            .with_gdu_per_day(25)
            .with_quality(QualityCurve::new(1450.0, 1000.0))
    }

    /// Adds a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Replaces all fields.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_planting(mut self, rule: OperationRule) -> Self {
        self.planting = rule;
        self
    }

    pub fn with_detasseling(mut self, rule: OperationRule) -> Self {
        self.detasseling = rule;
        self
    }

    pub fn with_harvesting(mut self, rule: OperationRule) -> Self {
        self.harvesting = rule;
        self
    }

    /// Sets the daily GDU accrual rate.
    pub fn with_gdu_per_day(mut self, rate: i64) -> Self {
        self.gdu_per_day = rate;
        self
    }

    /// Sets the harvest quality curve.
    pub fn with_quality(mut self, quality: QualityCurve) -> Self {
        self.quality = quality;
        self
    }

    /// Number of fields (N).
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Scheduling rule for `op`.
    #[inline]
    pub fn rule(&self, op: Operation) -> &OperationRule {
        match op {
            Operation::Plant => &self.planting,
            Operation::Detassel => &self.detasseling,
            Operation::Harvest => &self.harvesting,
        }
    }

    /// Area weight of field `i`.
    #[inline]
    pub fn area(&self, i: usize) -> f64 {
        self.fields[i].area
    }

    /// Position of the field with the given ID.
    pub fn field_index(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Number of days in the schedule (`horizon + 1`).
    pub fn day_count(&self) -> usize {
        (self.horizon + 1).max(0) as usize
    }
}
