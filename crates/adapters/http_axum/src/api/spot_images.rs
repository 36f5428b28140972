//! JSON REST handlers for spot images.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use spothub_app::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};
use spothub_domain::id::{SpotId, SpotImageId};
use spothub_domain::spot_image::SpotImage;

use super::Deleted;
use crate::auth::AuthUser;
use crate::error::{ApiError, ResultExt, parse_id};
use crate::state::AppState;

/// Request body for attaching an image.
#[derive(Deserialize)]
pub struct CreateSpotImageRequest {
    pub url: String,
    #[serde(default)]
    pub preview: bool,
}

/// The attached image, without its spot id.
#[derive(Serialize)]
pub struct CreatedImage {
    pub id: SpotImageId,
    pub url: String,
    pub preview: bool,
}

impl From<SpotImage> for CreatedImage {
    fn from(image: SpotImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            preview: image.preview,
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CreatedImage>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok(Json<Deleted>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/spots/:spot_id/images`
pub async fn create<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    Path(spot_id): Path<String>,
    body: Result<Json<CreateSpotImageRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let image = state
        .spot_image_service
        .add_image(user.user_id, spot_id, req.url, req.preview)
        .await
        .context("Error adding image")?;
    Ok(CreateResponse::Created(Json(image.into())))
}

/// `DELETE /api/spots/:spot_id/images/:image_id`
pub async fn delete<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    Path((spot_id, image_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let image_id: SpotImageId = parse_id(&image_id, "Spot Image")?;
    state
        .spot_image_service
        .delete_image(user.user_id, spot_id, image_id)
        .await
        .context("Error deleting image")?;
    Ok(DeleteResponse::Ok(Json(Deleted::default())))
}
