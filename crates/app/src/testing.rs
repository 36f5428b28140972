//! In-memory implementations of every storage port, shared by service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use spothub_domain::error::{ForbiddenError, SpotHubError};
use spothub_domain::id::{ReviewId, SpotId, SpotImageId, UserId};
use spothub_domain::review::{Review, ReviewDetails, ReviewImage};
use spothub_domain::spot::{Spot, SpotInput};
use spothub_domain::spot_image::SpotImage;
use spothub_domain::user::User;

use crate::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};

#[derive(Default)]
struct Tables {
    spots: HashMap<SpotId, Spot>,
    images: HashMap<SpotImageId, SpotImage>,
    reviews: HashMap<ReviewId, Review>,
    review_images: Vec<ReviewImage>,
    users: HashMap<UserId, User>,
}

/// One store backing all four ports. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn seed_spot(&self, spot: Spot) -> Spot {
        self.tables().spots.insert(spot.id, spot.clone());
        spot
    }

    pub fn seed_user(&self, first_name: &str) -> User {
        let user = User {
            id: UserId::new(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            username: first_name.to_lowercase(),
        };
        self.tables().users.insert(user.id, user.clone());
        user
    }

    pub fn seed_image(&self, image: SpotImage) -> SpotImage {
        self.tables().images.insert(image.id, image.clone());
        image
    }

    pub fn seed_review_image(&self, image: ReviewImage) {
        self.tables().review_images.push(image);
    }

    pub fn spot(&self, id: SpotId) -> Option<Spot> {
        self.tables().spots.get(&id).cloned()
    }

    pub fn image(&self, id: SpotImageId) -> Option<SpotImage> {
        self.tables().images.get(&id).cloned()
    }

    pub fn review_count(&self) -> usize {
        self.tables().reviews.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }
}

/// A valid spot owned by `owner`.
pub fn sample_spot(owner: UserId) -> Spot {
    let input: SpotInput = serde_json::from_value(serde_json::json!({
        "address": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "country": "USA",
        "lat": 39.78,
        "lng": -89.65,
        "name": "Cozy cabin",
        "description": "Quiet place by the lake",
        "price": 120.0
    }))
    .unwrap();
    input.into_new_spot(owner).unwrap()
}

impl SpotRepository for InMemoryStore {
    fn create(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send {
        let spot = self.seed_spot(spot);
        async { Ok(spot) }
    }

    fn get_by_id(
        &self,
        id: SpotId,
    ) -> impl Future<Output = Result<Option<Spot>, SpotHubError>> + Send {
        let result = self.spot(id);
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send {
        let result: Vec<Spot> = self.tables().spots.values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Spot>, SpotHubError>> + Send {
        let result: Vec<Spot> = self
            .tables()
            .spots
            .values()
            .filter(|spot| spot.owner_id == owner_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(&self, spot: Spot) -> impl Future<Output = Result<Spot, SpotHubError>> + Send {
        let spot = self.seed_spot(spot);
        async { Ok(spot) }
    }

    fn delete(&self, id: SpotId) -> impl Future<Output = Result<(), SpotHubError>> + Send {
        let mut tables = self.tables();
        tables.spots.remove(&id);
        tables.images.retain(|_, image| image.spot_id != id);
        tables.reviews.retain(|_, review| review.spot_id != id);
        async { Ok(()) }
    }
}

impl SpotImageRepository for InMemoryStore {
    fn create(
        &self,
        image: SpotImage,
    ) -> impl Future<Output = Result<SpotImage, SpotHubError>> + Send {
        let image = self.seed_image(image);
        async { Ok(image) }
    }

    fn get_by_id(
        &self,
        id: SpotImageId,
    ) -> impl Future<Output = Result<Option<SpotImage>, SpotHubError>> + Send {
        let result = self.image(id);
        async { Ok(result) }
    }

    fn find_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<SpotImage>, SpotHubError>> + Send {
        let result: Vec<SpotImage> = self
            .tables()
            .images
            .values()
            .filter(|image| image.spot_id == spot_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn delete(&self, id: SpotImageId) -> impl Future<Output = Result<(), SpotHubError>> + Send {
        self.tables().images.remove(&id);
        async { Ok(()) }
    }
}

impl ReviewRepository for InMemoryStore {
    fn create(&self, review: Review) -> impl Future<Output = Result<Review, SpotHubError>> + Send {
        let mut tables = self.tables();
        let duplicate = tables
            .reviews
            .values()
            .any(|r| r.spot_id == review.spot_id && r.user_id == review.user_id);
        let result = if duplicate {
            Err(ForbiddenError::DuplicateReview.into())
        } else {
            tables.reviews.insert(review.id, review.clone());
            Ok(review)
        };
        async { result }
    }

    fn find_by_spot_and_user(
        &self,
        spot_id: SpotId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Review>, SpotHubError>> + Send {
        let result = self
            .tables()
            .reviews
            .values()
            .find(|r| r.spot_id == spot_id && r.user_id == user_id)
            .cloned();
        async { Ok(result) }
    }

    fn find_details_by_spot(
        &self,
        spot_id: SpotId,
    ) -> impl Future<Output = Result<Vec<ReviewDetails>, SpotHubError>> + Send {
        let tables = self.tables();
        let mut result: Vec<ReviewDetails> = tables
            .reviews
            .values()
            .filter(|review| review.spot_id == spot_id)
            .filter_map(|review| {
                let user = tables.users.get(&review.user_id)?;
                let images = tables
                    .review_images
                    .iter()
                    .filter(|image| image.review_id == review.id)
                    .cloned()
                    .collect();
                Some(ReviewDetails {
                    review: review.clone(),
                    user: user.summary(),
                    images,
                })
            })
            .collect();
        result.sort_by_key(|details| details.review.created_at);
        async { Ok(result) }
    }
}

impl UserRepository for InMemoryStore {
    fn create(&self, user: User) -> impl Future<Output = Result<User, SpotHubError>> + Send {
        self.tables().users.insert(user.id, user.clone());
        async { Ok(user) }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, SpotHubError>> + Send {
        let result = self.tables().users.get(&id).cloned();
        async { Ok(result) }
    }
}
