//! Shared application state for axum handlers.

use std::sync::Arc;

use spothub_app::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};
use spothub_app::services::review_service::ReviewService;
use spothub_app::services::spot_image_service::SpotImageService;
use spothub_app::services::spot_service::SpotService;
use spothub_app::services::user_service::UserService;

use crate::auth::TokenKeys;

/// Application state shared across all axum handlers.
///
/// Generic over the spot, spot image, review and user repositories to avoid
/// dynamic dispatch. `Clone` is implemented manually so the repositories
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, I, R, U> {
    /// Spot CRUD service.
    pub spot_service: Arc<SpotService<S, I, U>>,
    /// Spot image service.
    pub spot_image_service: Arc<SpotImageService<S, I>>,
    /// Review service.
    pub review_service: Arc<ReviewService<S, R>>,
    /// Resolves token subjects to registered users.
    pub user_service: Arc<UserService<U>>,
    /// Keys used to verify bearer tokens.
    pub token_keys: Arc<TokenKeys>,
}

impl<S, I, R, U> Clone for AppState<S, I, R, U> {
    fn clone(&self) -> Self {
        Self {
            spot_service: Arc::clone(&self.spot_service),
            spot_image_service: Arc::clone(&self.spot_image_service),
            review_service: Arc::clone(&self.review_service),
            user_service: Arc::clone(&self.user_service),
            token_keys: Arc::clone(&self.token_keys),
        }
    }
}

impl<S, I, R, U> AppState<S, I, R, U>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        spot_service: SpotService<S, I, U>,
        spot_image_service: SpotImageService<S, I>,
        review_service: ReviewService<S, R>,
        user_service: UserService<U>,
        token_keys: TokenKeys,
    ) -> Self {
        Self {
            spot_service: Arc::new(spot_service),
            spot_image_service: Arc::new(spot_image_service),
            review_service: Arc::new(review_service),
            user_service: Arc::new(user_service),
            token_keys: Arc::new(token_keys),
        }
    }
}
