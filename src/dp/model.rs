//! The crop-scheduling decision process.

use crate::models::{CropProblem, FieldState, JointAction, Operation};
use crate::validation::validate_problem;

use super::admissible::{ActionSpace, AdmissibleSets};
use super::{dynamics, SolveError};

/// A validated problem together with its precomputed action space.
///
/// Bundles the admissible-action generator, the transition function and
/// the reward function behind one handle; the value function and policy
/// extractor are implemented on top of it.
#[derive(Debug, Clone)]
pub struct CropModel<'a> {
    problem: &'a CropProblem,
    space: ActionSpace,
}

impl<'a> CropModel<'a> {
    /// Validates `problem` and enumerates its candidate action vectors.
    pub fn new(problem: &'a CropProblem) -> Result<Self, SolveError> {
        validate_problem(problem).map_err(SolveError::InvalidProblem)?;
        let space = ActionSpace::new(problem);
        tracing::debug!(
            fields = problem.field_count(),
            horizon = problem.horizon,
            plant_candidates = space.candidates(Operation::Plant).len(),
            detassel_candidates = space.candidates(Operation::Detassel).len(),
            harvest_candidates = space.candidates(Operation::Harvest).len(),
            "crop model built"
        );
        Ok(Self { problem, space })
    }

    #[inline]
    pub fn problem(&self) -> &'a CropProblem {
        self.problem
    }

    #[inline]
    pub fn horizon(&self) -> i64 {
        self.problem.horizon
    }

    /// The all-zero state every run starts from.
    pub fn initial_state(&self) -> FieldState {
        FieldState::zero(self.problem.field_count())
    }

    /// Admissible per-operation vectors for `state` on `day`.
    pub fn admissible_actions(&self, state: &FieldState, day: i64) -> AdmissibleSets {
        self.space.admissible(self.problem, state, day)
    }

    #[inline]
    pub fn transition(&self, state: &FieldState, action: &JointAction) -> FieldState {
        dynamics::transition(self.problem, state, action)
    }

    #[inline]
    pub fn reward(&self, state: &FieldState, action: &JointAction) -> f64 {
        dynamics::reward(self.problem, state, action)
    }
}
