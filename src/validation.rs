//! Input validation for crop-scheduling problems.
//!
//! Checks configuration consistency of a [`CropProblem`] before solving.
//! Detects:
//! - Missing or too many fields
//! - Duplicate field IDs
//! - Non-finite or negative area weights
//! - Negative capacities, horizons, rates or window bounds
//! - Inverted windows (`start > end`)
//! - A degenerate quality scale
//!
//! All issues are collected rather than stopping at the first one.

use std::collections::HashSet;

use crate::models::{CropProblem, Operation, Window, MAX_FIELDS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The problem has no fields.
    NoFields,
    /// More fields than the action enumeration supports.
    TooManyFields,
    /// Two fields share the same ID.
    DuplicateId,
    /// A field area is negative, NaN or infinite.
    InvalidArea,
    /// An operation capacity is negative.
    NegativeCapacity,
    /// A day or GDU window has a negative bound.
    NegativeWindow,
    /// A window has `start > end`.
    InvertedWindow,
    /// The horizon is negative.
    NegativeHorizon,
    /// The GDU accrual rate is negative.
    NegativeRate,
    /// The quality scale is zero, negative or not finite.
    InvalidQualityScale,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a crop-scheduling problem.
///
/// Checks:
/// 1. At least one field, at most [`MAX_FIELDS`]
/// 2. No duplicate field IDs
/// 3. All areas finite and non-negative
/// 4. Horizon and GDU rate non-negative
/// 5. Per operation: capacity non-negative, day and GDU windows
///    non-negative and not inverted
/// 6. Quality scale finite and positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &CropProblem) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.fields.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoFields,
            "Problem has no fields",
        ));
    }
    if problem.fields.len() > MAX_FIELDS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyFields,
            format!(
                "Problem has {} fields; at most {MAX_FIELDS} are supported",
                problem.fields.len()
            ),
        ));
    }

    let mut ids = HashSet::new();
    for field in &problem.fields {
        if !ids.insert(field.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate field ID: {}", field.id),
            ));
        }
        if !field.area.is_finite() || field.area < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArea,
                format!("Field '{}' has invalid area {}", field.id, field.area),
            ));
        }
    }

    if problem.horizon < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeHorizon,
            format!("Horizon {} is negative", problem.horizon),
        ));
    }
    if problem.gdu_per_day < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeRate,
            format!("GDU rate {} is negative", problem.gdu_per_day),
        ));
    }

    for op in Operation::ALL {
        let rule = problem.rule(op);
        if rule.capacity < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeCapacity,
                format!("Capacity for {op} is negative ({})", rule.capacity),
            ));
        }
        check_window(&mut errors, op, "day", &rule.days);
        if let Some(gdu) = &rule.gdu {
            check_window(&mut errors, op, "GDU", gdu);
        }
    }

    let scale = problem.quality.scale;
    if !scale.is_finite() || scale <= 0.0 || !problem.quality.target_gdu.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQualityScale,
            format!(
                "Quality curve (target {}, scale {}) is not usable",
                problem.quality.target_gdu, scale
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_window(errors: &mut Vec<ValidationError>, op: Operation, what: &str, w: &Window) {
    if w.has_negative_bound() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeWindow,
            format!("{what} window for {op} has a negative bound [{}, {}]", w.start, w.end),
        ));
    }
    if w.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedWindow,
            format!("{what} window for {op} is inverted [{}, {}]", w.start, w.end),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Field, OperationRule, QualityCurve};

    fn kinds(problem: &CropProblem) -> Vec<ValidationErrorKind> {
        validate_problem(problem)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_reference_is_valid() {
        assert!(validate_problem(&CropProblem::reference()).is_ok());
    }

    #[test]
    fn test_no_fields() {
        assert_eq!(kinds(&CropProblem::new(10)), vec![ValidationErrorKind::NoFields]);
    }

    #[test]
    fn test_too_many_fields() {
        let fields = (0..=MAX_FIELDS)
            .map(|i| Field::new(format!("F{i}"), 1.0))
            .collect();
        let p = CropProblem::new(10).with_fields(fields);
        assert!(kinds(&p).contains(&ValidationErrorKind::TooManyFields));
    }

    #[test]
    fn test_duplicate_field_id() {
        let p = CropProblem::new(10)
            .with_field(Field::new("F1", 1.0))
            .with_field(Field::new("F1", 2.0));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("F1")));
    }

    #[test]
    fn test_invalid_area() {
        let p = CropProblem::new(10)
            .with_field(Field::new("F1", -1.0))
            .with_field(Field::new("F2", f64::NAN));
        let k = kinds(&p);
        assert_eq!(
            k.iter().filter(|&k| *k == ValidationErrorKind::InvalidArea).count(),
            2
        );
    }

    #[test]
    fn test_negative_capacity() {
        let p = CropProblem::reference().with_planting(OperationRule::new(-1, Window::new(0, 5)));
        assert_eq!(kinds(&p), vec![ValidationErrorKind::NegativeCapacity]);
    }

    #[test]
    fn test_inverted_day_window() {
        let p = CropProblem::reference().with_harvesting(
            OperationRule::new(2, Window::new(60, 58)).with_gdu_window(Window::new(1400, 1500)),
        );
        let errors = validate_problem(&p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvertedWindow);
        assert!(errors[0].message.contains("harvest"));
    }

    #[test]
    fn test_negative_gdu_window() {
        let p = CropProblem::reference().with_detasseling(
            OperationRule::new(2, Window::new(30, 33)).with_gdu_window(Window::new(-10, 1000)),
        );
        assert_eq!(kinds(&p), vec![ValidationErrorKind::NegativeWindow]);
    }

    #[test]
    fn test_negative_horizon_and_rate() {
        let mut p = CropProblem::reference().with_gdu_per_day(-25);
        p.horizon = -1;
        let k = kinds(&p);
        assert!(k.contains(&ValidationErrorKind::NegativeHorizon));
        assert!(k.contains(&ValidationErrorKind::NegativeRate));
    }

    #[test]
    fn test_invalid_quality_scale() {
        let p = CropProblem::reference().with_quality(QualityCurve::new(1450.0, 0.0));
        assert_eq!(kinds(&p), vec![ValidationErrorKind::InvalidQualityScale]);
    }

    #[test]
    fn test_multiple_errors() {
        let p = CropProblem::new(10)
            .with_planting(OperationRule::new(-2, Window::new(5, 0)))
            .with_quality(QualityCurve::new(1450.0, -1.0));
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors.len() >= 4);
    }
}
