//! Baseline schedulers, schedule audit and KPI evaluation.
//!
//! The exact optimum lives in [`crate::dp`]; this module provides what is
//! needed to judge it and to judge other schedules.
//!
//! # Algorithms
//!
//! `GreedyScheduler` applies every operation as early and as widely as the
//! rules allow. `RandomScheduler` samples uniformly among admissible joint
//! actions. Neither is optimal; both provide fast baselines.
//!
//! # Audit
//!
//! `audit_actions` replays any action sequence and reports each rule it
//! breaks as a [`Violation`](crate::models::Violation).
//!
//! # KPI
//!
//! `ScheduleKpi` computes total reward, harvest rate, mean harvest quality,
//! peak daily usage and capacity utilization.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Bertsekas (2017), "Dynamic Programming and Optimal Control", Vol. I, Ch. 6 (rollout)

mod audit;
mod greedy;
mod kpi;
mod random;

pub use audit::{audit_actions, audited_schedule};
pub use greedy::GreedyScheduler;
pub use kpi::ScheduleKpi;
pub use random::RandomScheduler;
