//! Crop operations and their scheduling rules.
//!
//! Each field goes through three operations in a fixed order:
//! planting → detasseling → harvesting. An [`OperationRule`] bounds how
//! often (daily capacity), when (day window) and at what maturity
//! (GDU window) an operation may be applied.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Window;

/// One of the three crop operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Plant,
    Detassel,
    Harvest,
}

impl Operation {
    /// All operations in precedence order.
    pub const ALL: [Operation; 3] = [Operation::Plant, Operation::Detassel, Operation::Harvest];

    /// Short label.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Plant => "plant",
            Operation::Detassel => "detassel",
            Operation::Harvest => "harvest",
        }
    }

    /// The operation that must already have been applied to a field
    /// before this one. `None` for planting.
    pub fn predecessor(self) -> Option<Operation> {
        match self {
            Operation::Plant => None,
            Operation::Detassel => Some(Operation::Plant),
            Operation::Harvest => Some(Operation::Detassel),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-operation scheduling rule.
///
/// # Examples
///
/// ```
/// use u_crop_schedule::models::{OperationRule, Window};
///
/// let rule = OperationRule::new(2, Window::new(30, 33)).with_gdu_window(Window::new(750, 1000));
/// assert!(rule.allows_day(31));
/// assert!(rule.allows_gdu(800));
/// assert!(!rule.allows_gdu(1001));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OperationRule {
    /// Maximum number of fields the operation may be applied to per day.
    pub capacity: i32,
    /// Days on which the operation may be applied.
    pub days: Window,
    /// Required GDU range of a field at the time of the operation.
    /// `None` = no maturity requirement.
    pub gdu: Option<Window>,
}

impl OperationRule {
    /// Creates a rule without a GDU requirement.
    pub fn new(capacity: i32, days: Window) -> Self {
        Self {
            capacity,
            days,
            gdu: None,
        }
    }

    /// Sets the GDU window.
    pub fn with_gdu_window(mut self, gdu: Window) -> Self {
        self.gdu = Some(gdu);
        self
    }

    /// Capacity as a count (negative capacities admit nothing).
    #[inline]
    pub fn max_fields(&self) -> usize {
        self.capacity.max(0) as usize
    }

    #[inline]
    pub fn allows_day(&self, day: i64) -> bool {
        self.days.contains(day)
    }

    /// Whether a field with `gdu` is mature enough (always true without a window).
    #[inline]
    pub fn allows_gdu(&self, gdu: i64) -> bool {
        self.gdu.map_or(true, |w| w.contains(gdu))
    }
}
