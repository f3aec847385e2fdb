//! One-shot exact solver.

use crate::models::{CropProblem, CropSchedule};

use super::{CropModel, Policy, SolveError, ValueTable};

/// Result of a full solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The optimal policy realized from the zero state.
    pub policy: Policy,
    /// Number of `(state, day)` pairs evaluated.
    pub states_evaluated: usize,
}

impl Solution {
    /// Optimal total reward.
    #[inline]
    pub fn optimal_value(&self) -> f64 {
        self.policy.optimal_value
    }

    /// Flattened (day, field, operation) events of the optimal policy.
    pub fn schedule(&self, problem: &CropProblem) -> CropSchedule {
        self.policy.schedule(problem)
    }
}

/// Exact dynamic-programming scheduler.
///
/// Each call to [`solve`](Self::solve) builds a fresh [`ValueTable`],
/// evaluates `V(zero, 0)` by backward induction and re-derives the
/// optimal policy from the filled table. Solves share no state.
///
/// # Example
///
/// ```
/// use u_crop_schedule::dp::DpSolver;
/// use u_crop_schedule::models::{CropProblem, Field, Operation, OperationRule, Window};
///
/// let problem = CropProblem::new(60)
///     .with_field(Field::new("F1", 10.0))
///     .with_planting(OperationRule::new(1, Window::new(0, 2)))
///     .with_detasseling(
///         OperationRule::new(1, Window::new(30, 31)).with_gdu_window(Window::new(750, 800)),
///     )
///     .with_harvesting(
///         OperationRule::new(1, Window::new(58, 59)).with_gdu_window(Window::new(1400, 1450)),
///     );
///
/// let solver = DpSolver::new(&problem).unwrap();
/// let solution = solver.solve().unwrap();
/// assert!((solution.optimal_value() - 10.0).abs() < 1e-9);
///
/// let schedule = solution.schedule(&problem);
/// assert_eq!(schedule.operation_day(0, Operation::Harvest), Some(59));
/// ```
#[derive(Debug, Clone)]
pub struct DpSolver<'a> {
    model: CropModel<'a>,
}

impl<'a> DpSolver<'a> {
    /// Validates `problem` and prepares its action space.
    pub fn new(problem: &'a CropProblem) -> Result<Self, SolveError> {
        Ok(Self {
            model: CropModel::new(problem)?,
        })
    }

    /// The underlying decision process.
    pub fn model(&self) -> &CropModel<'a> {
        &self.model
    }

    /// Solves from the zero state on day 0.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        let mut table = ValueTable::new(self.model.horizon());
        let policy = self.solve_with(&mut table)?;
        Ok(Solution {
            policy,
            states_evaluated: table.len(),
        })
    }

    /// Solves using a caller-owned table, which is left filled for
    /// further queries (e.g. [`CropModel::best_action`] from other states).
    pub fn solve_with(&self, table: &mut ValueTable) -> Result<Policy, SolveError> {
        let initial = self.model.initial_state();
        let optimal_value = self.model.value(table, &initial, 0)?;
        let policy = self.model.extract_policy(table, &initial)?;

        let operations: usize = policy.actions().iter().map(|a| a.operation_count()).sum();
        tracing::info!(
            optimal_value,
            states = table.len(),
            operations,
            "crop schedule solved"
        );
        Ok(policy)
    }
}
