//! Input validation for brick catalogs.
//!
//! Checks structural integrity of the catalog before planning. Detects:
//! - An empty catalog
//! - Duplicate brick IDs
//! - Non-positive or non-finite unit weights

use std::collections::HashSet;

use crate::error::PlannerError;
use crate::models::Brick;

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
    /// The catalog has no entries.
    EmptyCatalog,
    /// Two bricks share the same ID.
    DuplicateId,
    /// A unit weight is zero, negative, or not finite.
    InvalidWeight,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a brick catalog.
///
/// Checks:
/// 1. The catalog is not empty
/// 2. No duplicate brick IDs
/// 3. Every unit weight is positive and finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &[Brick]) -> ValidationResult {
    let mut errors = Vec::new();

    if catalog.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCatalog,
            "Catalog has no brick types",
        ));
    }

    let mut ids = HashSet::new();
    for brick in catalog {
        if !ids.insert(brick.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate brick ID: {}", brick.id),
            ));
        }

        if !(brick.weight > 0.0 && brick.weight.is_finite()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Brick {} has invalid unit weight {}", brick.id, brick.weight),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collapses validation errors into a single `InvalidInput` error.
pub fn into_planner_error(errors: Vec<ValidationError>) -> PlannerError {
    let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
    PlannerError::InvalidInput(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<Brick> {
        vec![
            Brick::new(1, "ZD-1", 10, 50.0),
            Brick::new(2, "ZB-1", 6, 80.0),
            Brick::new(3, "QX-1", 0, 120.0),
        ]
    }

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&sample_catalog()).is_ok());
    }

    #[test]
    fn test_empty_catalog() {
        let errors = validate_catalog(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyCatalog);
    }

    #[test]
    fn test_duplicate_id() {
        let mut catalog = sample_catalog();
        catalog.push(Brick::new(2, "ZF-1", 2, 60.0));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains('2')));
    }

    #[test]
    fn test_invalid_weight() {
        let catalog = vec![
            Brick::new(1, "ZD-1", 10, 0.0),
            Brick::new(2, "ZD-2", 10, f64::NAN),
            Brick::new(3, "ZD-3", 10, -4.0),
        ];
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidWeight)
                .count(),
            3
        );
    }

    #[test]
    fn test_into_planner_error() {
        let errors = validate_catalog(&[]).unwrap_err();
        let err = into_planner_error(errors);
        assert!(matches!(err, PlannerError::InvalidInput(ref m) if m.contains("no brick types")));
    }
}
