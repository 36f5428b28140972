//! JSON REST handlers for reviews.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use spothub_app::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};
use spothub_domain::id::SpotId;
use spothub_domain::review::{Review, ReviewDetails, ReviewInput};

use crate::auth::AuthUser;
use crate::error::{ApiError, ResultExt, parse_id};
use crate::state::AppState;

/// `{"Reviews": [...]}`
#[derive(Serialize)]
pub struct ReviewList {
    #[serde(rename = "Reviews")]
    pub reviews: Vec<ReviewDetails>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ReviewList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Review>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/spots/:spot_id/reviews`
pub async fn list<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    Path(spot_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let reviews = state
        .review_service
        .list_for_spot(spot_id)
        .await
        .context("Error fetching reviews")?;
    Ok(ListResponse::Ok(Json(ReviewList { reviews })))
}

/// `POST /api/spots/:spot_id/reviews`
pub async fn create<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    Path(spot_id): Path<String>,
    body: Result<Json<ReviewInput>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Json(input) = body?;
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let review = state
        .review_service
        .create_review(user.user_id, spot_id, input)
        .await
        .context("Error creating review")?;
    Ok(CreateResponse::Created(Json(review)))
}
