//! Schedule (solution) model.
//!
//! A crop schedule is the flat list of (day, field, operation) events a
//! trajectory implies, plus any constraint violations found when auditing
//! it. This is the form a chart renderer consumes.

use serde::{Deserialize, Serialize};

use super::{CropProblem, JointAction, Operation, Trajectory};

/// A complete crop schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropSchedule {
    /// Operation events in (day, operation, field) order.
    pub events: Vec<OperationEvent>,
    /// Constraint violations detected in this schedule.
    pub violations: Vec<Violation>,
}

/// One operation applied to one field on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationEvent {
    /// Day of the operation.
    pub day: i64,
    /// Field position in the problem.
    pub field_index: usize,
    /// Field ID (denormalized for query convenience).
    pub field_id: String,
    pub operation: Operation,
}

/// A constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Day on which the violation occurs.
    pub day: i64,
    /// Field involved, if the violation is field-specific.
    pub field_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// More fields than the daily capacity received an operation.
    CapacityExceeded,
    /// Operation applied outside its day window.
    OutsideDayWindow,
    /// Operation applied to a field outside its GDU window.
    OutsideGduWindow,
    /// Operation repeated, or applied before its predecessor.
    OrderingViolated,
    /// A field received more than one operation on the same day.
    ConflictingOperations,
    /// An action vector refers to a field that does not exist.
    WrongDimension,
    /// More actions than days in the horizon.
    BeyondHorizon,
}

impl OperationEvent {
    pub fn new(day: i64, field_index: usize, field_id: impl Into<String>, operation: Operation) -> Self {
        Self {
            day,
            field_index,
            field_id: field_id.into(),
            operation,
        }
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        day: i64,
        field_index: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        let severity = match violation_type {
            ViolationType::OutsideGduWindow => 70,
            ViolationType::OutsideDayWindow | ViolationType::CapacityExceeded => 80,
            ViolationType::OrderingViolated | ViolationType::ConflictingOperations => 90,
            ViolationType::WrongDimension | ViolationType::BeyondHorizon => 100,
        };
        Self {
            violation_type,
            day,
            field_index,
            message: message.into(),
            severity,
        }
    }
}

impl CropSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a sequence of daily actions (day 0 first) into events.
    pub fn from_actions(problem: &CropProblem, actions: &[JointAction]) -> Self {
        let mut schedule = Self::new();
        for (day, action) in actions.iter().enumerate() {
            for op in Operation::ALL {
                for i in action.get(op).iter() {
                    let field_id = problem.fields.get(i).map(|f| f.id.as_str()).unwrap_or("");
                    schedule.add_event(OperationEvent::new(day as i64, i, field_id, op));
                }
            }
        }
        schedule
    }

    /// Flattens a trajectory into events.
    pub fn from_trajectory(problem: &CropProblem, trajectory: &Trajectory) -> Self {
        Self::from_actions(problem, &trajectory.actions)
    }

    pub fn add_event(&mut self, event: OperationEvent) {
        self.events.push(event);
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the schedule has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// All events for a field, in day order.
    pub fn events_for_field(&self, field_index: usize) -> Vec<&OperationEvent> {
        self.events
            .iter()
            .filter(|e| e.field_index == field_index)
            .collect()
    }

    /// All events on a day.
    pub fn events_on_day(&self, day: i64) -> Vec<&OperationEvent> {
        self.events.iter().filter(|e| e.day == day).collect()
    }

    /// Day on which `op` was applied to a field.
    pub fn operation_day(&self, field_index: usize, op: Operation) -> Option<i64> {
        self.events
            .iter()
            .find(|e| e.field_index == field_index && e.operation == op)
            .map(|e| e.day)
    }

    /// Per-field timeline: `timeline[field][day]` is the operation applied
    /// to that field on that day, if any.
    pub fn timeline(&self, field_count: usize, day_count: usize) -> Vec<Vec<Option<Operation>>> {
        let mut rows = vec![vec![None; day_count]; field_count];
        for e in &self.events {
            if let Some(slot) = rows
                .get_mut(e.field_index)
                .and_then(|row| row.get_mut(e.day as usize))
            {
                *slot = Some(e.operation);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, FieldSet};

    fn fs(indices: &[usize]) -> FieldSet {
        FieldSet::from_indices(indices.iter().copied())
    }

    fn sample() -> (CropProblem, CropSchedule) {
        let problem = CropProblem::new(4)
            .with_field(Field::new("A", 1.0))
            .with_field(Field::new("B", 2.0));
        let actions = vec![
            JointAction::new(fs(&[0, 1]), FieldSet::EMPTY, FieldSet::EMPTY),
            JointAction::NOOP,
            JointAction::new(FieldSet::EMPTY, fs(&[1]), FieldSet::EMPTY),
            JointAction::new(FieldSet::EMPTY, fs(&[0]), FieldSet::EMPTY),
            JointAction::new(FieldSet::EMPTY, FieldSet::EMPTY, fs(&[0, 1])),
        ];
        let schedule = CropSchedule::from_actions(&problem, &actions);
        (problem, schedule)
    }

    #[test]
    fn test_from_actions_events() {
        let (_, s) = sample();
        assert_eq!(s.event_count(), 6);
        assert_eq!(s.events[0], OperationEvent::new(0, 0, "A", Operation::Plant));
        assert_eq!(s.events[1], OperationEvent::new(0, 1, "B", Operation::Plant));
        assert!(s.events.windows(2).all(|w| w[0].day <= w[1].day));
    }

    #[test]
    fn test_operation_day() {
        let (_, s) = sample();
        assert_eq!(s.operation_day(0, Operation::Detassel), Some(3));
        assert_eq!(s.operation_day(1, Operation::Detassel), Some(2));
        assert_eq!(s.operation_day(1, Operation::Harvest), Some(4));
    }

    #[test]
    fn test_events_for_field_and_day() {
        let (_, s) = sample();
        assert_eq!(s.events_for_field(0).len(), 3);
        assert_eq!(s.events_on_day(0).len(), 2);
        assert!(s.events_on_day(1).is_empty());
    }

    #[test]
    fn test_timeline() {
        let (problem, s) = sample();
        let t = s.timeline(problem.field_count(), problem.day_count());
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].len(), 5);
        assert_eq!(t[0][0], Some(Operation::Plant));
        assert_eq!(t[0][1], None);
        assert_eq!(t[1][2], Some(Operation::Detassel));
        assert_eq!(t[1][4], Some(Operation::Harvest));
    }

    #[test]
    fn test_validity() {
        let (_, mut s) = sample();
        assert!(s.is_valid());
        s.add_violation(Violation::new(
            ViolationType::CapacityExceeded,
            0,
            None,
            "over capacity",
        ));
        assert!(!s.is_valid());
        assert_eq!(s.violations[0].severity, 80);
    }
}
