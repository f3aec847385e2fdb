//! Constraint audit of arbitrary action sequences.
//!
//! Replays a day-ordered action sequence from the zero state and reports
//! every constraint it breaks. Independent of the admissible-action
//! generator, so it can check any schedule (hand-written, heuristic or
//! optimal) against the problem's rules.

use crate::dp::dynamics;
use crate::models::{
    CropProblem, CropSchedule, FieldState, JointAction, Operation, Violation, ViolationType,
};

/// Checks `actions` (day 0 first) against `problem`.
///
/// # Checks
/// - sequence no longer than the horizon
/// - action vectors within the field count
/// - no field receives two operations on one day
/// - per operation: daily capacity, day window, GDU window, no repeat,
///   predecessor already applied
///
/// Days whose action refers to non-existent fields are reported and
/// skipped (the state is carried over unchanged).
pub fn audit_actions(problem: &CropProblem, actions: &[JointAction]) -> Vec<Violation> {
    let n = problem.field_count();
    let mut violations = Vec::new();
    let mut state = FieldState::zero(n);

    for (day, action) in actions.iter().enumerate() {
        let day = day as i64;

        if day > problem.horizon {
            violations.push(Violation::new(
                ViolationType::BeyondHorizon,
                day,
                None,
                format!("Action on day {day} is past horizon {}", problem.horizon),
            ));
        }

        if !action.fits(n) {
            violations.push(Violation::new(
                ViolationType::WrongDimension,
                day,
                None,
                format!("Action on day {day} refers to fields beyond {n}"),
            ));
            continue;
        }

        for i in 0..n {
            let ops: Vec<Operation> = Operation::ALL
                .into_iter()
                .filter(|&op| action.get(op).contains(i))
                .collect();
            if ops.len() > 1 {
                violations.push(Violation::new(
                    ViolationType::ConflictingOperations,
                    day,
                    Some(i),
                    format!("Field {i} receives {} operations on day {day}", ops.len()),
                ));
            }
        }

        for op in Operation::ALL {
            audit_operation(problem, &state, action, op, day, &mut violations);
        }

        state = dynamics::transition(problem, &state, action);
    }

    violations
}

fn audit_operation(
    problem: &CropProblem,
    state: &FieldState,
    action: &JointAction,
    op: Operation,
    day: i64,
    violations: &mut Vec<Violation>,
) {
    let rule = problem.rule(op);
    let applied = action.get(op);

    if applied.len() > rule.max_fields() {
        violations.push(Violation::new(
            ViolationType::CapacityExceeded,
            day,
            None,
            format!(
                "{} fields receive {op} on day {day}; capacity is {}",
                applied.len(),
                rule.capacity
            ),
        ));
    }

    for i in applied.iter() {
        if !rule.allows_day(day) {
            violations.push(Violation::new(
                ViolationType::OutsideDayWindow,
                day,
                Some(i),
                format!(
                    "{op} of field {i} on day {day} is outside [{}, {}]",
                    rule.days.start, rule.days.end
                ),
            ));
        }
        if !rule.allows_gdu(state.gdu[i]) {
            violations.push(Violation::new(
                ViolationType::OutsideGduWindow,
                day,
                Some(i),
                format!("{op} of field {i} at GDU {} is outside its window", state.gdu[i]),
            ));
        }
        if state.done(op).contains(i) {
            violations.push(Violation::new(
                ViolationType::OrderingViolated,
                day,
                Some(i),
                format!("Field {i} already received {op}"),
            ));
        }
        if let Some(prev) = op.predecessor() {
            if !state.done(prev).contains(i) {
                violations.push(Violation::new(
                    ViolationType::OrderingViolated,
                    day,
                    Some(i),
                    format!("{op} of field {i} before {prev}"),
                ));
            }
        }
    }
}

/// Flattens `actions` into a schedule with its audit violations attached.
pub fn audited_schedule(problem: &CropProblem, actions: &[JointAction]) -> CropSchedule {
    let mut schedule = CropSchedule::from_actions(problem, actions);
    for v in audit_actions(problem, actions) {
        schedule.add_violation(v);
    }
    schedule
}
