//! HTTP error response mapping.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use spothub_domain::error::{FieldErrors, NotFoundError, SpotHubError};

use crate::auth::TokenError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FieldErrors>,
}

/// Message used for storage failures when a handler attached no context.
const FALLBACK_CONTEXT: &str = "Internal server error";

/// Error returned by every handler.
///
/// Storage failures are logged here and answered with the handler's
/// `context` message; their detail never reaches the client.
#[derive(Debug)]
pub enum ApiError {
    /// A service error, with the message to use if it turns out to be a 500.
    Domain {
        error: SpotHubError,
        context: &'static str,
    },
    /// Missing, malformed or expired bearer token.
    Unauthorized,
    /// The body could not be read as JSON.
    BadRequest,
}

impl From<SpotHubError> for ApiError {
    fn from(error: SpotHubError) -> Self {
        Self::Domain {
            error,
            context: FALLBACK_CONTEXT,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::BadRequest
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::debug!(error = %err, "rejected credentials");
        Self::Unauthorized
    }
}

/// Attach a per-endpoint 500 message to a service result.
pub trait ResultExt<T> {
    /// Convert the error into an [`ApiError`] reporting `message` on storage failure.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is `Err`.
    fn context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, SpotHubError> {
    fn context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::Domain {
            error,
            context: message,
        })
    }
}

/// Parse a path segment as an identifier.
///
/// A malformed id cannot name an existing record, so it is reported as
/// `{entity} couldn't be found`.
///
/// # Errors
///
/// Returns a not-found [`ApiError`] when `raw` does not parse.
pub fn parse_id<T: FromStr>(raw: &str, entity: &'static str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(SpotHubError::from(NotFoundError {
            entity,
            id: raw.to_string(),
        }))
    })
}

fn respond(status: StatusCode, message: String, errors: Option<&FieldErrors>) -> Response {
    (status, Json(ErrorBody { message, errors })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => respond(
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                None,
            ),
            Self::BadRequest => {
                respond(StatusCode::BAD_REQUEST, "Bad Request".to_string(), None)
            }
            Self::Domain { error, context } => match error {
                SpotHubError::Validation(err) => {
                    respond(StatusCode::BAD_REQUEST, err.to_string(), err.fields())
                }
                SpotHubError::NotFound(err) => {
                    respond(StatusCode::NOT_FOUND, err.to_string(), None)
                }
                SpotHubError::Forbidden(err) => {
                    respond(StatusCode::FORBIDDEN, err.to_string(), None)
                }
                SpotHubError::Storage(err) => {
                    tracing::error!(error = %err, context, "storage error");
                    respond(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        context.to_string(),
                        None,
                    )
                }
            },
        }
    }
}
