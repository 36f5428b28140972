//! # spothub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SpotRepository` — CRUD for spots
//!   - `SpotImageRepository` — create, find and delete spot images
//!   - `ReviewRepository` — create reviews, look up by author, list with details
//!   - `UserRepository` — store and read user accounts
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SpotService` — create, list, show, edit, delete spots
//!   - `SpotImageService` — attach and remove images
//!   - `ReviewService` — list and post reviews
//!   - `UserService` — provision accounts and resolve token subjects
//! - Enforce the request pipeline order: validate, look up, authorize, mutate
//!
//! ## Dependency rule
//! Depends on `spothub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ownership;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
