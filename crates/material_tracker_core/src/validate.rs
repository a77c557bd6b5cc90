//! crates/material_tracker_core/src/validate.rs
//!
//! Draft and patch validation. This runs in the caller-facing layer before
//! any store call is made, so a rejected submission never has a persistence
//! side effect.

use crate::domain::{MaterialDraft, MaterialPatch};

/// A user-facing validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The field '{0}' is required")]
    MissingField(&'static str),
    #[error("Weight must be greater than 0")]
    NonPositiveWeight,
}

/// Checks a creation payload: material type and location must be non-empty
/// and the weight strictly positive.
pub fn validate_draft(draft: &MaterialDraft) -> Result<(), ValidationError> {
    if draft.material_type.trim().is_empty() {
        return Err(ValidationError::MissingField("materialType"));
    }
    if draft.location.trim().is_empty() {
        return Err(ValidationError::MissingField("location"));
    }
    if !(draft.weight > 0.0) {
        return Err(ValidationError::NonPositiveWeight);
    }
    Ok(())
}

/// Checks a partial update: only the fields present are validated.
pub fn validate_patch(patch: &MaterialPatch) -> Result<(), ValidationError> {
    if let Some(material_type) = &patch.material_type {
        if material_type.trim().is_empty() {
            return Err(ValidationError::MissingField("materialType"));
        }
    }
    if let Some(location) = &patch.location {
        if location.trim().is_empty() {
            return Err(ValidationError::MissingField("location"));
        }
    }
    if let Some(weight) = patch.weight {
        if !(weight > 0.0) {
            return Err(ValidationError::NonPositiveWeight);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(material_type: &str, weight: f64, location: &str) -> MaterialDraft {
        MaterialDraft {
            material_type: material_type.to_string(),
            weight,
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            location: location.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn rejects_empty_material_type() {
        assert_eq!(
            validate_draft(&draft("", 5.0, "X")),
            Err(ValidationError::MissingField("materialType"))
        );
    }

    #[test]
    fn rejects_non_positive_weight() {
        assert_eq!(
            validate_draft(&draft("oro", -1.0, "X")),
            Err(ValidationError::NonPositiveWeight)
        );
        assert_eq!(
            validate_draft(&draft("oro", 0.0, "X")),
            Err(ValidationError::NonPositiveWeight)
        );
        // NaN must not slip through the comparison.
        assert_eq!(
            validate_draft(&draft("oro", f64::NAN, "X")),
            Err(ValidationError::NonPositiveWeight)
        );
    }

    #[test]
    fn accepts_a_complete_draft() {
        assert_eq!(validate_draft(&draft("oro", 12.5, "Mina Norte")), Ok(()));
    }

    #[test]
    fn patch_validates_only_present_fields() {
        assert_eq!(validate_patch(&MaterialPatch::default()), Ok(()));
        assert_eq!(
            validate_patch(&MaterialPatch {
                weight: Some(0.0),
                ..Default::default()
            }),
            Err(ValidationError::NonPositiveWeight)
        );
        assert_eq!(
            validate_patch(&MaterialPatch {
                location: Some("  ".to_string()),
                ..Default::default()
            }),
            Err(ValidationError::MissingField("location"))
        );
    }
}
