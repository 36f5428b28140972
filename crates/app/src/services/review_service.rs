//! Review service — list and post reviews on a spot.

use spothub_domain::error::{ForbiddenError, SpotHubError};
use spothub_domain::id::{SpotId, UserId};
use spothub_domain::review::{Review, ReviewDetails, ReviewInput};

use crate::ownership::load_spot;
use crate::ports::{ReviewRepository, SpotRepository};

/// Application service for reviews.
pub struct ReviewService<S, R> {
    spots: S,
    reviews: R,
}

impl<S, R> ReviewService<S, R>
where
    S: SpotRepository + Sync,
    R: ReviewRepository + Sync,
{
    /// Create a new service backed by the given repositories.
    pub fn new(spots: S, reviews: R) -> Self {
        Self { spots, reviews }
    }

    /// List the reviews of a spot with their author and images.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when the spot is missing, or a
    /// storage error from a repository.
    pub async fn list_for_spot(&self, spot_id: SpotId) -> Result<Vec<ReviewDetails>, SpotHubError> {
        let spot = load_spot(&self.spots, spot_id).await?;
        self.reviews.find_details_by_spot(spot.id).await
    }

    /// Post `author`'s review of a spot.
    ///
    /// The existence check is a fast path; a repository with a unique
    /// `(spot_id, user_id)` constraint reports a concurrent duplicate with
    /// the same error.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::Validation`] for bad text or stars,
    /// [`SpotHubError::NotFound`] when the spot is missing,
    /// [`SpotHubError::Forbidden`] when `author` already reviewed it, or a
    /// storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_review(
        &self,
        author: UserId,
        spot_id: SpotId,
        input: ReviewInput,
    ) -> Result<Review, SpotHubError> {
        let review = input.into_review(spot_id, author)?;
        let spot = load_spot(&self.spots, spot_id).await?;

        if self
            .reviews
            .find_by_spot_and_user(spot.id, author)
            .await?
            .is_some()
        {
            return Err(ForbiddenError::DuplicateReview.into());
        }

        self.reviews.create(review).await
    }
}
