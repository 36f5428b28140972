//! Spot service — use-cases for creating, reading, editing and deleting spots.

use spothub_domain::error::SpotHubError;
use spothub_domain::id::{SpotId, UserId};
use spothub_domain::spot::{Spot, SpotDetails, SpotInput};

use crate::ownership::{load_owned_spot, load_spot};
use crate::ports::{SpotImageRepository, SpotRepository, UserRepository};

/// Application service for spot CRUD operations.
pub struct SpotService<S, I, U> {
    spots: S,
    images: I,
    users: U,
}

impl<S, I, U> SpotService<S, I, U>
where
    S: SpotRepository + Sync,
    I: SpotImageRepository + Sync,
    U: UserRepository + Sync,
{
    /// Create a new service backed by the given repositories.
    pub fn new(spots: S, images: I, users: U) -> Self {
        Self {
            spots,
            images,
            users,
        }
    }

    /// Validate `input` against the create rules and store a spot owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::Validation`] with per-field messages, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_spot(&self, owner: UserId, input: SpotInput) -> Result<Spot, SpotHubError> {
        let spot = input.into_new_spot(owner)?;
        self.spots.create(spot).await
    }

    /// List all spots.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_spots(&self) -> Result<Vec<Spot>, SpotHubError> {
        self.spots.get_all().await
    }

    /// List the spots owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_owned_spots(&self, owner: UserId) -> Result<Vec<Spot>, SpotHubError> {
        self.spots.find_by_owner(owner).await
    }

    /// Look up a spot by id.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when no spot with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_spot(&self, id: SpotId) -> Result<Spot, SpotHubError> {
        load_spot(&self.spots, id).await
    }

    /// Look up a spot with its images and owner.
    ///
    /// A dangling owner reference yields `owner: None` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when no spot with `id` exists,
    /// or a storage error from a repository.
    pub async fn get_spot_details(&self, id: SpotId) -> Result<SpotDetails, SpotHubError> {
        let spot = self.get_spot(id).await?;
        let images = self.images.find_by_spot(spot.id).await?;
        let owner = self.users.get_by_id(spot.owner_id).await?;
        Ok(SpotDetails {
            spot,
            images,
            owner: owner.as_ref().map(spothub_domain::user::User::summary),
        })
    }

    /// Validate `input` against the edit rules, then apply it to a spot
    /// owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns, in this order of precedence, [`SpotHubError::Validation`],
    /// [`SpotHubError::NotFound`], [`SpotHubError::Forbidden`], or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_spot(
        &self,
        requester: UserId,
        id: SpotId,
        input: SpotInput,
    ) -> Result<Spot, SpotHubError> {
        let changes = input.into_changes()?;
        let mut spot = load_owned_spot(&self.spots, id, requester).await?;
        spot.apply(changes);
        self.spots.update(spot).await
    }

    /// Delete a spot owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`], [`SpotHubError::Forbidden`], or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_spot(&self, requester: UserId, id: SpotId) -> Result<(), SpotHubError> {
        let spot = load_owned_spot(&self.spots, id, requester).await?;
        self.spots.delete(spot.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, sample_spot};
    use serde_json::json;
    use spothub_domain::error::{ForbiddenError, ValidationError};
    use spothub_domain::spot_image::SpotImage;

    fn make_service() -> (
        InMemoryStore,
        SpotService<InMemoryStore, InMemoryStore, InMemoryStore>,
    ) {
        let store = InMemoryStore::default();
        let svc = SpotService::new(store.clone(), store.clone(), store.clone());
        (store, svc)
    }

    fn input(value: serde_json::Value) -> SpotInput {
        serde_json::from_value(value).unwrap()
    }

    fn valid_input() -> SpotInput {
        input(json!({
            "address": "1 Main St",
            "city": "X",
            "state": "Y",
            "country": "Z",
            "lat": 10,
            "lng": 10,
            "name": "A",
            "description": "d",
            "price": 5
        }))
    }

    #[tokio::test]
    async fn should_create_spot_owned_by_caller() {
        let (store, svc) = make_service();
        let owner = UserId::new();

        let created = svc.create_spot(owner, valid_input()).await.unwrap();
        assert_eq!(created.owner_id, owner);
        assert_eq!(store.spot(created.id), Some(created));
    }

    #[tokio::test]
    async fn should_not_store_anything_when_create_input_invalid() {
        let (_, svc) = make_service();

        let result = svc.create_spot(UserId::new(), SpotInput::default()).await;
        assert!(matches!(
            result,
            Err(SpotHubError::Validation(ValidationError::Fields(_)))
        ));
        assert!(svc.list_spots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_only_owned_spots() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        store.seed_spot(sample_spot(owner));
        store.seed_spot(sample_spot(UserId::new()));

        assert_eq!(svc.list_spots().await.unwrap().len(), 2);
        let owned = svc.list_owned_spots(owner).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].owner_id, owner);
    }

    #[tokio::test]
    async fn should_return_not_found_when_spot_missing() {
        let (_, svc) = make_service();
        let result = svc.get_spot(SpotId::new()).await;
        assert!(matches!(result, Err(SpotHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_include_images_and_owner_in_details() {
        let (store, svc) = make_service();
        let owner = store.seed_user("Ada");
        let spot = store.seed_spot(sample_spot(owner.id));
        store.seed_image(SpotImage::new(spot.id, "https://img/1.png", true));

        let details = svc.get_spot_details(spot.id).await.unwrap();
        assert_eq!(details.images.len(), 1);
        assert_eq!(details.owner, Some(owner.summary()));
    }

    #[tokio::test]
    async fn should_update_spot_when_requester_is_owner() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        let spot = store.seed_spot(sample_spot(owner));

        let updated = svc
            .update_spot(owner, spot.id, input(json!({"name": "Renamed"})))
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(store.spot(spot.id).unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn should_leave_spot_unchanged_when_requester_is_not_owner() {
        let (store, svc) = make_service();
        let spot = store.seed_spot(sample_spot(UserId::new()));

        let result = svc
            .update_spot(UserId::new(), spot.id, input(json!({"name": "Mine now"})))
            .await;
        assert!(matches!(
            result,
            Err(SpotHubError::Forbidden(ForbiddenError::NotOwner))
        ));
        assert_eq!(store.spot(spot.id), Some(spot));
    }

    #[tokio::test]
    async fn should_validate_before_looking_up_on_update() {
        let (_, svc) = make_service();
        let result = svc
            .update_spot(UserId::new(), SpotId::new(), input(json!({"lat": 91})))
            .await;
        assert!(matches!(result, Err(SpotHubError::Validation(_))));
    }

    #[tokio::test]
    async fn should_delete_spot_when_requester_is_owner() {
        let (store, svc) = make_service();
        let owner = UserId::new();
        let spot = store.seed_spot(sample_spot(owner));

        svc.delete_spot(owner, spot.id).await.unwrap();
        assert!(store.spot(spot.id).is_none());
    }

    #[tokio::test]
    async fn should_keep_spot_when_delete_requester_is_not_owner() {
        let (store, svc) = make_service();
        let spot = store.seed_spot(sample_spot(UserId::new()));

        let result = svc.delete_spot(UserId::new(), spot.id).await;
        assert!(matches!(result, Err(SpotHubError::Forbidden(_))));
        assert!(store.spot(spot.id).is_some());
    }
}
