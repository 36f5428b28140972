//! JSON REST handlers for spots.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use spothub_app::ports::{ReviewRepository, SpotImageRepository, SpotRepository, UserRepository};
use spothub_domain::id::SpotId;
use spothub_domain::spot::{Spot, SpotDetails, SpotInput};

use super::Deleted;
use crate::auth::AuthUser;
use crate::error::{ApiError, ResultExt, parse_id};
use crate::state::AppState;

/// `{"Spots": [...]}`
#[derive(Serialize)]
pub struct SpotList {
    #[serde(rename = "Spots")]
    pub spots: Vec<Spot>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<SpotList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<SpotDetails>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Spot>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Spot>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
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

/// `GET /api/spots`
pub async fn list<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
) -> Result<ListResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spots = state
        .spot_service
        .list_spots()
        .await
        .context("Error fetching spots")?;
    Ok(ListResponse::Ok(Json(SpotList { spots })))
}

/// `GET /api/spots/current`
pub async fn list_current<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
) -> Result<ListResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spots = state
        .spot_service
        .list_owned_spots(user.user_id)
        .await
        .context("Error fetching spots")?;
    Ok(ListResponse::Ok(Json(SpotList { spots })))
}

/// `GET /api/spots/:spot_id`
pub async fn get<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    Path(spot_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let details = state
        .spot_service
        .get_spot_details(spot_id)
        .await
        .context("Error fetching spot")?;
    Ok(GetResponse::Ok(Json(details)))
}

/// `POST /api/spots`
pub async fn create<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    body: Result<Json<SpotInput>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Json(input) = body?;
    let created = state
        .spot_service
        .create_spot(user.user_id, input)
        .await
        .context("Error creating spot")?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/spots/:spot_id`
pub async fn update<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    Path(spot_id): Path<String>,
    body: Result<Json<SpotInput>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let Json(input) = body?;
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    let updated = state
        .spot_service
        .update_spot(user.user_id, spot_id, input)
        .await
        .context("Error updating spot")?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/spots/:spot_id`
pub async fn delete<S, I, R, U>(
    State(state): State<AppState<S, I, R, U>>,
    user: AuthUser,
    Path(spot_id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    S: SpotRepository + Send + Sync + 'static,
    I: SpotImageRepository + Send + Sync + 'static,
    R: ReviewRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let spot_id: SpotId = parse_id(&spot_id, "Spot")?;
    state
        .spot_service
        .delete_spot(user.user_id, spot_id)
        .await
        .context("Error deleting spot")?;
    Ok(DeleteResponse::Ok(Json(Deleted::default())))
}
