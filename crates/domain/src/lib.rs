//! # spothub-domain
//!
//! Pure domain model for the spothub rental listings API.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Spots** (rentable listings) and their **Spot images**
//! - Define **Reviews** (one per user per spot) and their **Review images**
//! - Define **Users** as referenced by listings and reviews
//! - Declare the **validation rule sets** applied to incoming payloads
//! - Contain ownership checks and all other invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;
pub mod validation;

pub mod review;
pub mod spot;
pub mod spot_image;
pub mod user;
