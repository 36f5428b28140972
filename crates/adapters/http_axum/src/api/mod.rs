//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod reviews;
#[allow(clippy::missing_errors_doc)]
pub mod spot_images;
#[allow(clippy::missing_errors_doc)]
pub mod spots;

use axum::Router;
use axum::routing::{delete, get, post};
use serde::Serialize;

use spothub_app::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};

use crate::state::AppState;

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    message: &'static str,
}

impl Default for Deleted {
    fn default() -> Self {
        Self {
            message: "Successfully deleted",
        }
    }
}

/// Build the `/api` sub-router.
pub fn routes<S, I, R, U>() -> Router<AppState<S, I, R, U>>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        // Spots
        .route(
            "/spots",
            get(spots::list::<S, I, R, U>).post(spots::create::<S, I, R, U>),
        )
        .route("/spots/current", get(spots::list_current::<S, I, R, U>))
        .route(
            "/spots/{spot_id}",
            get(spots::get::<S, I, R, U>)
                .patch(spots::update::<S, I, R, U>)
                .delete(spots::delete::<S, I, R, U>),
        )
        // Spot images
        .route(
            "/spots/{spot_id}/images",
            post(spot_images::create::<S, I, R, U>),
        )
        .route(
            "/spots/{spot_id}/images/{image_id}",
            delete(spot_images::delete::<S, I, R, U>),
        )
        // Reviews
        .route(
            "/spots/{spot_id}/reviews",
            get(reviews::list::<S, I, R, U>).post(reviews::create::<S, I, R, U>),
        )
}
