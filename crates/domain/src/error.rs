//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SpotHubError`] via `From`, so handlers only ever match on one enum.

use std::collections::BTreeMap;

/// Per-field validation messages, keyed by the JSON field name.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum SpotHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("forbidden")]
    Forbidden(#[from] ForbiddenError),

    /// Failure inside a persistence adapter. The source is kept for logging
    /// and never shown to clients.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that breaks a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more fields failed their rule set.
    #[error("Bad Request")]
    Fields(FieldErrors),

    #[error("Review text is required")]
    EmptyReview,

    #[error("Review must be 250 characters or less")]
    ReviewTooLong,

    #[error("Stars must be an integer from 1 to 5")]
    StarsOutOfRange,
}

impl ValidationError {
    /// Per-field messages, when the error carries any.
    #[must_use]
    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            Self::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} couldn't be found")]
pub struct NotFoundError {
    /// Human-readable record kind, e.g. `"Spot"`.
    pub entity: &'static str,
    /// The identifier that was looked up, as received.
    pub id: String,
}

/// The caller is authenticated but not allowed to perform the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    /// The caller does not own the spot.
    #[error("Forbidden")]
    NotOwner,

    /// The image exists but is attached to another spot.
    #[error("Forbidden")]
    ImageNotInSpot,

    /// The caller already reviewed this spot.
    #[error("User already has a review for this spot")]
    DuplicateReview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_entity_in_not_found_message() {
        let err = NotFoundError {
            entity: "Spot Image",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Spot Image couldn't be found");
    }

    #[test]
    fn should_expose_field_errors_only_for_field_variant() {
        let mut errors = FieldErrors::new();
        errors.insert("city", "City is required");
        assert_eq!(
            ValidationError::Fields(errors.clone()).fields(),
            Some(&errors)
        );
        assert!(ValidationError::EmptyReview.fields().is_none());
    }

    #[test]
    fn should_convert_forbidden_into_top_level_error() {
        let err: SpotHubError = ForbiddenError::DuplicateReview.into();
        assert!(matches!(
            err,
            SpotHubError::Forbidden(ForbiddenError::DuplicateReview)
        ));
    }
}
