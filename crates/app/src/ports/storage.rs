//! Storage port — repository traits for persistence.
//!
//! Each method maps to a single statement (or a read-only join); none of
//! them span a transaction.

use std::future::Future;

use spothub_domain::error::SpotHubError;
use spothub_domain::id::{SpotId, SpotImageId, UserId};
use spothub_domain::review::{Review, ReviewDetails};
use spothub_domain::spot::Spot;
use spothub_domain::spot_image::SpotImage;
use spothub_domain::user::User;

/// Repository for persisting and querying [`Spot`]s.
pub trait SpotRepository {
    /// Create a new spot in storage.
    fn create(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send;

    /// Get a spot by its unique identifier.
    fn get_by_id(
        &self,
        id: SpotId,
    ) -> impl Future<Output = Result<Option<Spot>, SpotHubError>> + Send;

    /// Get all spots, unfiltered.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send;

    /// Get the spots owned by `owner_id`.
    fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send;

    /// Update an existing spot.
    fn update(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send;

    /// Delete a spot by id. Images and reviews go with it.
    fn delete(&self, id: SpotId) -> impl Future<Output = Result<(), SpotHubError>> + Send;
}

/// Repository for [`SpotImage`]s.
pub trait SpotImageRepository {
    /// Attach a new image.
    fn create(
        &self,
        image: SpotImage,
    ) -> impl Future<Output = Result<SpotImage, SpotHubError>> + Send;

    /// Get an image by its unique identifier.
    fn get_by_id(
        &self,
        id: SpotImageId,
    ) -> impl Future<Output = Result<Option<SpotImage>, SpotHubError>> + Send;

    /// Get all images of a spot.
    fn find_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<SpotImage>, SpotHubError>> + Send;

    /// Delete an image by id.
    fn delete(&self, id: SpotImageId) -> impl Future<Output = Result<(), SpotHubError>> + Send;
}

/// Repository for [`Review`]s.
pub trait ReviewRepository {
    /// Insert a new review.
    ///
    /// Implementations backed by a unique `(spot_id, user_id)` constraint
    /// report a violation as
    /// [`ForbiddenError::DuplicateReview`](spothub_domain::error::ForbiddenError::DuplicateReview).
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, SpotHubError>> + Send;

    /// Find the review `user_id` left on `spot_id`, if any.
    fn find_by_spot_and_user(
        &self,
        spot_id: SpotId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Review>, SpotHubError>> + Send;

    /// List a spot's reviews joined with their author and images, oldest first.
    fn find_details_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<ReviewDetails>, SpotHubError>> + Send;
}

/// Repository for [`User`]s.
pub trait UserRepository {
    /// Insert a user. Email and username are unique.
    fn create(&self, user: User) -> impl Future<Output = Result<User, SpotHubError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, SpotHubError>> + Send;
}
