//! Exact scheduling of field crop operations.
//!
//! Decides, day by day over a finite season, which fields to plant, detassel
//! and harvest so that total harvest value is maximized. Each field accrues
//! growing degree units (GDU) from planting until harvest; harvest value is
//! the field's area times a quality score peaked at a target GDU.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Field`, `FieldSet`, `Operation`,
//!   `OperationRule`, `CropProblem`, `FieldState`, `JointAction`,
//!   `Trajectory`, `CropSchedule`
//! - **`validation`**: Input integrity checks (field count, duplicate IDs,
//!   capacities, windows)
//! - **`dp`**: Memoized backward induction and optimal policy extraction
//! - **`scheduler`**: Greedy and random baselines, action audit, KPIs
//!
//! # Example
//!
//! ```
//! use u_crop_schedule::dp::DpSolver;
//! use u_crop_schedule::models::{CropProblem, Field, OperationRule, Window};
//!
//! let problem = CropProblem::new(60)
//!     .with_field(Field::new("F1", 10.0))
//!     .with_planting(OperationRule::new(1, Window::new(0, 2)))
//!     .with_detasseling(
//!         OperationRule::new(1, Window::new(30, 31)).with_gdu_window(Window::new(750, 800)),
//!     )
//!     .with_harvesting(
//!         OperationRule::new(1, Window::new(58, 59)).with_gdu_window(Window::new(1400, 1450)),
//!     );
//!
//! let solution = DpSolver::new(&problem).unwrap().solve().unwrap();
//! assert!((solution.optimal_value() - 10.0).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Bellman (1957), "Dynamic Programming"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dp;
pub mod models;
pub mod scheduler;
pub mod validation;
