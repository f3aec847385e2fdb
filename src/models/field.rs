//! Field model.
//!
//! A field is a unit of land that receives the three crop operations
//! (planting, detasseling, harvesting) exactly once each, in that order.
//! Its area weights the harvest reward.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A field to be scheduled.
///
/// Fields are addressed by their position in [`CropProblem::fields`](super::CropProblem);
/// the position is the bit index used by [`FieldSet`](super::FieldSet).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Unique field identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Area (or volume) weight applied to the harvest reward.
    pub area: f64,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Field {
    /// Creates a new field with the given ID and area weight.
    pub fn new(id: impl Into<String>, area: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            area,
            attributes: HashMap::new(),
        }
    }

    /// Sets the field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let f = Field::new("F1", 12.5)
            .with_name("North 40")
            .with_attribute("hybrid", "P1197");
        assert_eq!(f.id, "F1");
        assert_eq!(f.name, "North 40");
        assert!((f.area - 12.5).abs() < 1e-10);
        assert_eq!(f.attributes.get("hybrid").map(String::as_str), Some("P1197"));
    }
}
