//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod review_service;
pub mod spot_image_service;
pub mod spot_service;
pub mod user_service;
