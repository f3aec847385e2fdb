//! Realized day-by-day trajectories.

use serde::{Deserialize, Serialize};

use super::{FieldState, JointAction};

/// A chronological run from an initial state: one joint action per day,
/// the state each action produced, and the reward it earned.
///
/// Entry `t` of every vector belongs to day `t` (day 0 first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// State at the start of day 0.
    pub initial: FieldState,
    /// Action chosen on each day.
    pub actions: Vec<JointAction>,
    /// State after each day's action (start of the following day).
    pub states: Vec<FieldState>,
    /// Immediate reward of each day's action.
    pub rewards: Vec<f64>,
}

impl Trajectory {
    /// Creates an empty trajectory starting at `initial`.
    pub fn new(initial: FieldState) -> Self {
        Self {
            initial,
            actions: Vec::new(),
            states: Vec::new(),
            rewards: Vec::new(),
        }
    }

    /// Appends one day.
    pub fn push(&mut self, action: JointAction, next: FieldState, reward: f64) {
        self.actions.push(action);
        self.states.push(next);
        self.rewards.push(reward);
    }

    /// Number of days recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sum of per-day rewards.
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// State at the start of `day` (`day == len()` gives the final state).
    pub fn state_at(&self, day: usize) -> Option<&FieldState> {
        match day {
            0 => Some(&self.initial),
            d => self.states.get(d - 1),
        }
    }

    /// State after the last recorded day.
    pub fn final_state(&self) -> &FieldState {
        self.states.last().unwrap_or(&self.initial)
    }

    /// Iterates `(day, state before, action, reward)`.
    pub fn steps(&self) -> impl Iterator<Item = (usize, &FieldState, &JointAction, f64)> + '_ {
        self.actions
            .iter()
            .zip(&self.rewards)
            .enumerate()
            .map(move |(day, (action, &reward))| {
                let before = if day == 0 {
                    &self.initial
                } else {
                    &self.states[day - 1]
                };
                (day, before, action, reward)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldSet;

    #[test]
    fn test_trajectory_push_and_lookup() {
        let s0 = FieldState::zero(1);
        let mut s1 = s0.clone();
        s1.planted = FieldSet::from_indices([0]);

        let mut t = Trajectory::new(s0.clone());
        assert!(t.is_empty());
        assert_eq!(t.final_state(), &s0);

        t.push(JointAction::new(s1.planted, FieldSet::EMPTY, FieldSet::EMPTY), s1.clone(), 0.0);
        t.push(JointAction::NOOP, s1.clone(), 2.5);

        assert_eq!(t.len(), 2);
        assert_eq!(t.state_at(0), Some(&s0));
        assert_eq!(t.state_at(1), Some(&s1));
        assert_eq!(t.state_at(2), Some(&s1));
        assert_eq!(t.state_at(3), None);
        assert!((t.total_reward() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_steps_pairs_state_before_action() {
        let s0 = FieldState::zero(1);
        let mut s1 = s0.clone();
        s1.planted = FieldSet::from_indices([0]);

        let mut t = Trajectory::new(s0.clone());
        t.push(JointAction::NOOP, s0.clone(), 0.0);
        t.push(JointAction::NOOP, s1.clone(), 1.0);

        let steps: Vec<_> = t.steps().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].1, &s0);
        assert_eq!(steps[1].1, &s0);
        assert_eq!(steps[1].0, 1);
        assert!((steps[1].3 - 1.0).abs() < 1e-12);
    }
}
