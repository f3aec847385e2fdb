//! Crop-scheduling domain models.
//!
//! Provides the data types for representing a crop-operation scheduling
//! problem (fields, operation rules, reward curve) and its solutions
//! (per-day joint actions, state trajectories, flattened schedules).
//!
//! # Domain Mappings
//!
//! | u-crop-schedule | Meaning |
//! |-----------------|---------|
//! | Field | Unit of land, weighted by area |
//! | Operation | Plant / Detassel / Harvest |
//! | FieldState | GDU and operation flags of every field on a day |
//! | JointAction | Fields receiving each operation on a day |
//! | CropSchedule | Flat (day, field, operation) event list |

mod field;
mod field_set;
mod operation;
mod problem;
mod schedule;
mod state;
mod trajectory;
mod window;

pub use field::Field;
pub use field_set::{FieldSet, MAX_FIELDS};
pub use operation::{Operation, OperationRule};
pub use problem::{CropProblem, QualityCurve};
pub use schedule::{CropSchedule, OperationEvent, Violation, ViolationType};
pub use state::{FieldState, JointAction, StateKey};
pub use trajectory::Trajectory;
pub use window::Window;
