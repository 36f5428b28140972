//! Review — a user's rating of a spot, plus its attached images.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::{ReviewId, ReviewImageId, SpotId, UserId};
use crate::time::{self, Timestamp};
use crate::user::UserSummary;

/// Longest accepted review text, in characters.
pub const MAX_REVIEW_CHARS: usize = 250;

/// Inclusive star range.
pub const STARS: std::ops::RangeInclusive<i64> = 1..=5;

/// A rating left by a user on a spot. At most one exists per `(spot_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub spot_id: SpotId,
    pub user_id: UserId,
    pub review: String,
    pub stars: u8,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An image URL attached to a [`Review`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewImage {
    pub id: ReviewImageId,
    pub review_id: ReviewId,
    pub url: String,
}

/// A review joined with its author and images.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDetails {
    #[serde(flatten)]
    pub review: Review,
    #[serde(rename = "User")]
    pub user: UserSummary,
    #[serde(rename = "ReviewImages")]
    pub images: Vec<ReviewImage>,
}

/// Unvalidated review payload as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
    pub review: Option<Value>,
    pub stars: Option<Value>,
}

impl ReviewInput {
    /// Check the text, then the stars, and build a review of `spot_id` by `user_id`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyReview`] when the text is absent, not a string, or blank.
    /// - [`ValidationError::ReviewTooLong`] above [`MAX_REVIEW_CHARS`].
    /// - [`ValidationError::StarsOutOfRange`] unless stars is an integer in [`STARS`].
    pub fn into_review(self, spot_id: SpotId, user_id: UserId) -> Result<Review, ValidationError> {
        let text = match self.review {
            Some(Value::String(text)) if !text.trim().is_empty() => text,
            _ => return Err(ValidationError::EmptyReview),
        };
        if text.chars().count() > MAX_REVIEW_CHARS {
            return Err(ValidationError::ReviewTooLong);
        }

        let stars = self
            .stars
            .as_ref()
            .and_then(parse_stars)
            .ok_or(ValidationError::StarsOutOfRange)?;

        let now = time::now();
        Ok(Review {
            id: ReviewId::new(),
            spot_id,
            user_id,
            review: text,
            stars,
            created_at: now,
            updated_at: now,
        })
    }
}

fn parse_stars(value: &Value) -> Option<u8> {
    let stars = match value {
        Value::Number(n) => match n.as_i64() {
            Some(stars) => stars,
            None => integral(n.as_f64()?)?,
        },
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if STARS.contains(&stars) {
        u8::try_from(stars).ok()
    } else {
        None
    }
}

/// `3.0` counts as the integer 3; anything with a fractional part does not.
#[allow(clippy::cast_possible_truncation)]
fn integral(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= 1e15).then_some(n as i64)
}
