//! Transition and reward functions.
//!
//! Both are pure and deterministic. GDU accrual is gated by the flags
//! *before* the day's action: a field planted today starts accruing
//! tomorrow, a field harvested today still accrues today.

use crate::models::{CropProblem, FieldState, JointAction};

/// Next state after applying `action` to `state`.
///
/// - `gdu' = gdu + rate * (planted - harvested)`, per field, pre-step flags
/// - each flag vector gains the corresponding action vector
///
/// # Panics
/// If `state` or `action` does not match the problem's field count.
pub fn transition(problem: &CropProblem, state: &FieldState, action: &JointAction) -> FieldState {
    check_dimensions(problem, state, action);
    let rate = problem.gdu_per_day;
    let gdu = state
        .gdu
        .iter()
        .enumerate()
        .map(|(i, &g)| {
            let growing = i64::from(state.planted.contains(i)) - i64::from(state.harvested.contains(i));
            g + rate * growing
        })
        .collect();

    FieldState {
        gdu,
        planted: state.planted.union(action.plant),
        detasseled: state.detasseled.union(action.detassel),
        harvested: state.harvested.union(action.harvest),
    }
}

/// Immediate reward of `action` in `state`.
///
/// Only harvesting pays: `Σ area[i] * quality(gdu[i])` over the fields
/// harvested today, evaluated at their current (pre-step) GDU.
///
/// # Panics
/// If `state` or `action` does not match the problem's field count.
pub fn reward(problem: &CropProblem, state: &FieldState, action: &JointAction) -> f64 {
    check_dimensions(problem, state, action);
    action
        .harvest
        .iter()
        .map(|i| problem.area(i) * problem.quality.quality(state.gdu[i]))
        .sum()
}

fn check_dimensions(problem: &CropProblem, state: &FieldState, action: &JointAction) {
    let n = problem.field_count();
    assert_eq!(state.field_count(), n, "state has {} fields, problem has {n}", state.field_count());
    assert!(action.fits(n), "action refers to fields beyond {n}");
}
