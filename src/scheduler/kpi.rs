//! Schedule quality metrics (KPIs).
//!
//! Computes crop-schedule performance indicators from a problem and a
//! realized trajectory.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Reward | Sum of daily harvest rewards |
//! | Harvest Rate | Fraction of fields harvested |
//! | Mean Harvest Quality | Mean quality(gdu) over harvest events |
//! | Peak Daily Usage | Max fields receiving an operation on one day |
//! | Capacity Utilization | Operations applied / (capacity × window days) |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CropProblem, Operation, Trajectory};

/// Crop-schedule performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Sum of per-day rewards.
    pub total_reward: f64,
    /// Number of fields planted by the end of the run.
    pub fields_planted: usize,
    /// Number of fields detasseled by the end of the run.
    pub fields_detasseled: usize,
    /// Number of fields harvested by the end of the run.
    pub fields_harvested: usize,
    /// Fraction of fields harvested (0.0..1.0).
    pub harvest_rate: f64,
    /// Mean harvest quality over harvest events (0.0 if none).
    pub mean_harvest_quality: f64,
    /// Largest number of fields receiving each operation on a single day.
    pub peak_daily: HashMap<Operation, usize>,
    /// Share of each operation's capacity (over its in-horizon window) used.
    pub capacity_utilization: HashMap<Operation, f64>,
}

impl ScheduleKpi {
    /// Computes KPIs for a trajectory of `problem`.
    ///
    /// # Panics
    /// If the trajectory's states or actions do not match the problem's
    /// field count.
    pub fn calculate(problem: &CropProblem, trajectory: &Trajectory) -> Self {
        let n = problem.field_count();
        let last = trajectory.final_state();
        assert_eq!(
            trajectory.initial.field_count(),
            n,
            "trajectory has {} fields, problem has {n}",
            trajectory.initial.field_count()
        );
        assert!(
            trajectory.actions.iter().all(|a| a.fits(n)),
            "trajectory action refers to fields beyond {n}"
        );

        let mut quality_sum = 0.0;
        let mut harvest_events = 0usize;
        let mut peak_daily: HashMap<Operation, usize> = HashMap::new();
        let mut applied: HashMap<Operation, usize> = HashMap::new();

        for (_, before, action, _) in trajectory.steps() {
            for op in Operation::ALL {
                let count = action.get(op).len();
                let peak = peak_daily.entry(op).or_insert(0);
                *peak = (*peak).max(count);
                *applied.entry(op).or_insert(0) += count;
            }
            for i in action.harvest.iter() {
                quality_sum += problem.quality.quality(before.gdu[i]);
                harvest_events += 1;
            }
        }

        let capacity_utilization = Operation::ALL
            .into_iter()
            .map(|op| {
                let rule = problem.rule(op);
                let days = rule.days.start.max(0)..=rule.days.end.min(problem.horizon);
                let window_days = (days.end() - days.start() + 1).max(0);
                let slots = window_days * i64::from(rule.capacity.max(0));
                let used = applied.get(&op).copied().unwrap_or(0);
                let util = if slots == 0 {
                    0.0
                } else {
                    used as f64 / slots as f64
                };
                (op, util)
            })
            .collect();

        let fields_harvested = last.harvested.len();
        Self {
            total_reward: trajectory.total_reward(),
            fields_planted: last.planted.len(),
            fields_detasseled: last.detasseled.len(),
            fields_harvested,
            harvest_rate: if n == 0 {
                0.0
            } else {
                fields_harvested as f64 / n as f64
            },
            mean_harvest_quality: if harvest_events == 0 {
                0.0
            } else {
                quality_sum / harvest_events as f64
            },
            peak_daily,
            capacity_utilization,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_reward: f64, min_harvest_rate: f64) -> bool {
        self.total_reward >= min_reward && self.harvest_rate >= min_harvest_rate
    }
}
