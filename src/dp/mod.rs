//! Exact dynamic-programming scheduler.
//!
//! Solves the crop-operation problem as a finite-horizon, deterministic,
//! discrete-action decision process by backward induction over the
//! reachable state space.
//!
//! # Components
//!
//! - [`admissible`]: per-operation candidate vectors and their state/day filters
//! - [`dynamics`]: transition and reward functions
//! - [`CropModel`]: validated problem + precomputed action space
//! - [`ValueTable`] / [`CropModel::value`]: memoized optimal values
//! - [`CropModel::extract_policy`]: forward arg-max re-derivation
//! - [`DpSolver`]: one-shot solve
//!
//! # Complexity
//! One evaluation per reachable `(state, day)` pair; each evaluation visits
//! the joint actions admissible there. Candidate vectors are enumerated
//! once per problem (`O(2^N)` per operation).
//!
//! # Reference
//! - Bellman (1957), "Dynamic Programming"
//! - Puterman (1994), "Markov Decision Processes", Ch. 4 (finite-horizon backward induction)

pub mod admissible;
pub mod dynamics;
mod model;
mod policy;
mod solver;
mod value;

pub use admissible::{ActionSpace, AdmissibleSets};
pub use model::CropModel;
pub use policy::{Decision, Policy};
pub use solver::{DpSolver, Solution};
pub use value::ValueTable;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while solving.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The problem failed validation; nothing was solved.
    #[error("Invalid problem: {}", format_validation(.0))]
    InvalidProblem(Vec<ValidationError>),

    /// No joint action was admissible on a day.
    #[error("No feasible action on day {day}")]
    NoFeasibleAction { day: i64 },

    /// A continuation value was needed but never computed.
    #[error("Value table has no entry for day {day}")]
    MissingValue { day: i64 },
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropProblem;

    #[test]
    fn test_invalid_problem_message_lists_errors() {
        let p = CropProblem::new(10);
        let err = DpSolver::new(&p).unwrap_err();
        assert_eq!(err.to_string(), "Invalid problem: Problem has no fields");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SolveError::NoFeasibleAction { day: 7 }.to_string(),
            "No feasible action on day 7"
        );
        assert_eq!(
            SolveError::MissingValue { day: 3 }.to_string(),
            "Value table has no entry for day 3"
        );
    }
}
