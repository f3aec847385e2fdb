//! Myopic greedy scheduler.
//!
//! # Algorithm
//!
//! Each day, in order harvest → detassel → plant:
//! 1. Take the operation's admissible vectors for the current state.
//! 2. Drop vectors touching a field already chosen for another operation today.
//! 3. Pick the vector covering the most fields, then the largest total
//!    area; remaining ties go to the first vector in candidate order.
//!
//! Every operation is therefore applied as early and as widely as the
//! rules allow. This ignores harvest timing entirely (a field is harvested
//! the first day it is admissible, not at peak quality), so it is a
//! baseline, not an optimum.
//!
//! # Complexity
//! O(T * c) where T = horizon, c = admissible vectors per day.

use crate::dp::{CropModel, SolveError};
use crate::models::{CropProblem, FieldSet, JointAction, Operation, Trajectory};

/// Greedy "as soon as possible" scheduler.
///
/// # Example
///
/// ```
/// use u_crop_schedule::models::CropProblem;
/// use u_crop_schedule::scheduler::GreedyScheduler;
///
/// let problem = CropProblem::reference();
/// let trajectory = GreedyScheduler::new().schedule(&problem).unwrap();
/// assert_eq!(trajectory.len(), 61);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Schedules every day of the horizon from the zero state.
    pub fn schedule(&self, problem: &CropProblem) -> Result<Trajectory, SolveError> {
        let model = CropModel::new(problem)?;
        let mut state = model.initial_state();
        let mut trajectory = Trajectory::new(state.clone());

        for day in 0..=model.horizon() {
            let sets = model.admissible_actions(&state, day);
            let mut used = FieldSet::EMPTY;
            let mut pick = |op: Operation| -> FieldSet {
                let chosen = widest(problem, sets.get(op), used);
                used = used.union(chosen);
                chosen
            };
            let harvest = pick(Operation::Harvest);
            let detassel = pick(Operation::Detassel);
            let plant = pick(Operation::Plant);
            let action = JointAction::new(plant, detassel, harvest);

            let reward = model.reward(&state, &action);
            let next = model.transition(&state, &action);
            trajectory.push(action, next.clone(), reward);
            state = next;
        }

        tracing::debug!(
            total_reward = trajectory.total_reward(),
            "greedy schedule built"
        );
        Ok(trajectory)
    }
}

/// Widest candidate disjoint from `used`, by (field count, total area).
fn widest(problem: &CropProblem, candidates: &[FieldSet], used: FieldSet) -> FieldSet {
    let area = |s: FieldSet| -> f64 { s.iter().map(|i| problem.area(i)).sum() };
    let mut best = FieldSet::EMPTY;
    let mut best_area = 0.0;
    for &c in candidates.iter().filter(|c| c.is_disjoint(used)) {
        let a = area(c);
        if c.len() > best.len() || (c.len() == best.len() && a > best_area) {
            best = c;
            best_area = a;
        }
    }
    best
}
