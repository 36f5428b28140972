//! Spot image service — attach images to and remove images from owned spots.

use spothub_domain::error::{NotFoundError, SpotHubError};
use spothub_domain::id::{SpotId, SpotImageId, UserId};
use spothub_domain::spot_image::SpotImage;

use crate::ownership::{load_owned_spot, load_spot};
use crate::ports::{SpotImageRepository, SpotRepository};

/// Application service for spot images.
pub struct SpotImageService<S, I> {
    spots: S,
    images: I,
}

impl<S, I> SpotImageService<S, I>
where
    S: SpotRepository + Sync,
    I: SpotImageRepository + Sync,
{
    /// Create a new service backed by the given repositories.
    pub fn new(spots: S, images: I) -> Self {
        Self { spots, images }
    }

    /// Attach an image to a spot owned by `requester`. `url` and `preview`
    /// are stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when the spot is missing,
    /// [`SpotHubError::Forbidden`] when `requester` is not the owner, or a
    /// storage error from a repository.
    #[tracing::instrument(skip(self, url))]
    pub async fn add_image(
        &self,
        requester: UserId,
        spot_id: SpotId,
        url: String,
        preview: bool,
    ) -> Result<SpotImage, SpotHubError> {
        let spot = load_owned_spot(&self.spots, spot_id, requester).await?;
        self.images
            .create(SpotImage::new(spot.id, url, preview))
            .await
    }

    /// Remove an image from a spot owned by `requester`.
    ///
    /// Both records are looked up before any authorization check: a missing
    /// spot or image is always reported as not-found.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when the spot or image is missing,
    /// [`SpotHubError::Forbidden`] when `requester` does not own the spot or
    /// the image belongs to another spot, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_image(
        &self,
        requester: UserId,
        spot_id: SpotId,
        image_id: SpotImageId,
    ) -> Result<(), SpotHubError> {
        let spot = load_spot(&self.spots, spot_id).await?;
        let image = self
            .images
            .get_by_id(image_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Spot Image",
                id: image_id.to_string(),
            })?;

        spot.ensure_owned_by(requester)?;
        image.ensure_in_spot(spot.id)?;

        self.images.delete(image.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, sample_spot};
    use spothub_domain::error::ForbiddenError;

    fn make_service() -> (InMemoryStore, SpotImageService<InMemoryStore, InMemoryStore>) {
        let store = InMemoryStore::default();
        (store.clone(), SpotImageService::new(store.clone(), store))
    }

    #[tokio::test]
    async fn should_add_image_when_requester_is_owner() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        let spot = store.seed_spot(sample_spot(owner));

        let image = svc
            .add_image(owner, spot.id, "https://img/a.png".to_string(), true)
            .await
            .unwrap();
        assert_eq!(image.spot_id, spot.id);
        assert!(image.preview);
        assert_eq!(store.image(image.id), Some(image));
    }

    #[tokio::test]
    async fn should_forbid_adding_image_to_foreign_spot() {
        let (store, svc) = make_service();
        let spot = store.seed_spot(sample_spot(UserId::new()));

        let result = svc
            .add_image(UserId::new(), spot.id, "https://img/a.png".to_string(), false)
            .await;
        assert!(matches!(
            result,
            Err(SpotHubError::Forbidden(ForbiddenError::NotOwner))
        ));
    }

    #[tokio::test]
    async fn should_report_missing_spot_when_adding_image() {
        let (_, svc) = make_service();
        let result = svc
            .add_image(UserId::new(), SpotId::new(), "u".to_string(), false)
            .await;
        assert!(matches!(result, Err(SpotHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_image_of_owned_spot() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        let spot = store.seed_spot(sample_spot(owner));
        let image = store.seed_image(SpotImage::new(spot.id, "u", false));

        svc.delete_image(owner, spot.id, image.id).await.unwrap();
        assert!(store.image(image.id).is_none());
    }

    #[tokio::test]
    async fn should_forbid_deleting_image_of_another_spot() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        let spot = store.seed_spot(sample_spot(owner));
        let other = store.seed_spot(sample_spot(UserId::new()));
        let image = store.seed_image(SpotImage::new(other.id, "u", false));

        let result = svc.delete_image(owner, spot.id, image.id).await;
        assert!(matches!(
            result,
            Err(SpotHubError::Forbidden(ForbiddenError::ImageNotInSpot))
        ));
        assert!(store.image(image.id).is_some());
    }

    #[tokio::test]
    async fn should_forbid_deleting_image_when_requester_is_not_owner() {
        let (store, svc) = make_service();
        let spot = store.seed_spot(sample_spot(UserId::new()));
        let image = store.seed_image(SpotImage::new(spot.id, "u", false));

        let result = svc.delete_image(UserId::new(), spot.id, image.id).await;
        assert!(matches!(
            result,
            Err(SpotHubError::Forbidden(ForbiddenError::NotOwner))
        ));
    }

    #[tokio::test]
    async fn should_report_missing_image_before_ownership() {
        let (store, svc) = make_service();
        let spot = store.seed_spot(sample_spot(UserId::new()));

        let result = svc
            .delete_image(UserId::new(), spot.id, SpotImageId::new())
            .await;
        assert!(
            matches!(result, Err(SpotHubError::NotFound(ref err)) if err.entity == "Spot Image")
        );
    }
}
