//! # spothub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api/spots` (spots, their images and
//!   reviews) and a `/health` liveness probe
//! - Verify `Authorization: Bearer` tokens and hand the caller's id to
//!   handlers as an [`auth::AuthUser`]
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `spothub-app` (for port traits and services) and `spothub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod router;
pub mod state;
