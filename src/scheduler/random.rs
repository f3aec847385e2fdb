//! Random rollout scheduler.
//!
//! Samples one admissible joint action uniformly at random each day.
//! Repeated rollouts give a Monte-Carlo baseline against which the exact
//! optimum can be compared.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::dp::{CropModel, SolveError};
use crate::models::{CropProblem, JointAction, Trajectory};

/// Uniform random admissible-action scheduler.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_crop_schedule::models::CropProblem;
/// use u_crop_schedule::scheduler::RandomScheduler;
///
/// let problem = CropProblem::reference();
/// let mut rng = SmallRng::seed_from_u64(7);
/// let best = RandomScheduler::new().best_of(&problem, 20, &mut rng).unwrap();
/// assert!(best.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomScheduler;

impl RandomScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// One rollout over the whole horizon.
    pub fn rollout<R: Rng + ?Sized>(
        &self,
        problem: &CropProblem,
        rng: &mut R,
    ) -> Result<Trajectory, SolveError> {
        let model = CropModel::new(problem)?;
        rollout_with(&model, rng)
    }

    /// Best of `n` rollouts by total reward (first wins ties).
    ///
    /// Returns `None` when `n == 0`.
    pub fn best_of<R: Rng + ?Sized>(
        &self,
        problem: &CropProblem,
        n: usize,
        rng: &mut R,
    ) -> Result<Option<Trajectory>, SolveError> {
        let model = CropModel::new(problem)?;
        let mut best: Option<Trajectory> = None;
        for _ in 0..n {
            let t = rollout_with(&model, rng)?;
            if best
                .as_ref()
                .map_or(true, |b| t.total_reward() > b.total_reward())
            {
                best = Some(t);
            }
        }
        if let Some(b) = &best {
            tracing::debug!(
                rollouts = n,
                best_reward = b.total_reward(),
                "random rollouts finished"
            );
        }
        Ok(best)
    }
}

fn rollout_with<R: Rng + ?Sized>(model: &CropModel<'_>, rng: &mut R) -> Result<Trajectory, SolveError> {
    let mut state = model.initial_state();
    let mut trajectory = Trajectory::new(state.clone());

    for day in 0..=model.horizon() {
        let actions: Vec<JointAction> = model.admissible_actions(&state, day).joint_actions().collect();
        let action = *actions
            .choose(rng)
            .ok_or(SolveError::NoFeasibleAction { day })?;

        let reward = model.reward(&state, &action);
        let next = model.transition(&state, &action);
        trajectory.push(action, next.clone(), reward);
        state = next;
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::audit_actions;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_rollout_is_admissible() {
        let p = CropProblem::reference();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10 {
            let t = RandomScheduler::new().rollout(&p, &mut rng).unwrap();
            assert_eq!(t.len(), p.day_count());
            assert!(audit_actions(&p, &t.actions).is_empty());
            assert!(t.states.iter().all(|s| s.is_consistent()));
        }
    }

    #[test]
    fn test_rollout_reproducible_with_seed() {
        let p = CropProblem::reference();
        let a = RandomScheduler::new()
            .rollout(&p, &mut SmallRng::seed_from_u64(3))
            .unwrap();
        let b = RandomScheduler::new()
            .rollout(&p, &mut SmallRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_best_of_zero_is_none() {
        let p = CropProblem::reference();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(RandomScheduler::new().best_of(&p, 0, &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_best_of_not_worse_than_single() {
        let p = CropProblem::reference();
        let single = RandomScheduler::new()
            .rollout(&p, &mut SmallRng::seed_from_u64(9))
            .unwrap();
        let best = RandomScheduler::new()
            .best_of(&p, 5, &mut SmallRng::seed_from_u64(9))
            .unwrap()
            .unwrap();
        // The first of the five rollouts is `single`.
        assert!(best.total_reward() >= single.total_reward());
    }
}
