//! Forward policy extraction.
//!
//! Walks forward from the initial state, choosing each day the joint action
//! that maximizes `reward + V(next, t+1)`. Continuation values are only
//! read from the [`ValueTable`]; nothing is recomputed. Ties go to the
//! first maximal action in [`AdmissibleSets::joint_actions`] order, which
//! makes the no-op win whenever doing nothing is as good as acting.
//!
//! [`AdmissibleSets::joint_actions`]: super::AdmissibleSets::joint_actions

use serde::{Deserialize, Serialize};

use crate::models::{CropProblem, CropSchedule, FieldState, JointAction, Trajectory};

use super::{CropModel, SolveError, ValueTable};

/// An optimal policy realized from the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// `V(initial, 0)` as stored in the value table.
    pub optimal_value: f64,
    /// Chosen actions, resulting states and rewards, day 0 first.
    pub trajectory: Trajectory,
}

impl Policy {
    /// Chosen joint action per day, chronological.
    pub fn actions(&self) -> &[JointAction] {
        &self.trajectory.actions
    }

    /// State after each day's action, chronological.
    pub fn states(&self) -> &[FieldState] {
        &self.trajectory.states
    }

    /// Flattened (day, field, operation) events.
    pub fn schedule(&self, problem: &CropProblem) -> CropSchedule {
        CropSchedule::from_trajectory(problem, &self.trajectory)
    }
}

/// The arg-max action of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: JointAction,
    pub next: FieldState,
    pub reward: f64,
    /// `reward + V(next, t+1)`.
    pub value: f64,
}

impl CropModel<'_> {
    /// Best admissible action for `state` on `day`, using cached
    /// continuation values only.
    pub fn best_action(
        &self,
        table: &ValueTable,
        state: &FieldState,
        day: i64,
    ) -> Result<Decision, SolveError> {
        let mut best: Option<Decision> = None;
        for action in self.admissible_actions(state, day).joint_actions() {
            let reward = self.reward(state, &action);
            let next = self.transition(state, &action);
            let continuation = table
                .lookup(&next, day + 1)
                .ok_or(SolveError::MissingValue { day: day + 1 })?;
            let value = reward + continuation;
            if best.as_ref().map_or(true, |b| value > b.value) {
                best = Some(Decision {
                    action,
                    next,
                    reward,
                    value,
                });
            }
        }
        best.ok_or(SolveError::NoFeasibleAction { day })
    }

    /// Re-derives the optimal action sequence from `initial` on day 0.
    ///
    /// `table` must already hold `V(initial, 0)` and everything reachable
    /// from it (see [`CropModel::value`]).
    pub fn extract_policy(&self, table: &ValueTable, initial: &FieldState) -> Result<Policy, SolveError> {
        let optimal_value = table
            .lookup(initial, 0)
            .ok_or(SolveError::MissingValue { day: 0 })?;

        let mut trajectory = Trajectory::new(initial.clone());
        let mut state = initial.clone();
        for day in 0..=self.horizon() {
            let decision = self.best_action(table, &state, day)?;
            if !decision.action.is_noop() {
                tracing::debug!(
                    day,
                    plant = %decision.action.plant,
                    detassel = %decision.action.detassel,
                    harvest = %decision.action.harvest,
                    reward = decision.reward,
                    "policy step"
                );
            }
            trajectory.push(decision.action, decision.next.clone(), decision.reward);
            state = decision.next;
        }

        Ok(Policy {
            optimal_value,
            trajectory,
        })
    }
}
