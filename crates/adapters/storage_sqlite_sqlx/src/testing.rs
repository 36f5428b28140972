//! Fixtures shared by the repository tests.

use sqlx::SqlitePool;

use spothub_app::ports::UserRepository;
use spothub_domain::id::UserId;
use spothub_domain::spot::{Spot, SpotInput};
use spothub_domain::user::User;

use crate::pool::Database;
use crate::user_repo::SqliteUserRepository;

/// Fresh in-memory database with migrations applied.
pub(crate) async fn setup() -> SqlitePool {
    Database::connect("sqlite::memory:")
        .await
        .unwrap()
        .pool()
        .clone()
}

/// Insert a user whose email and username derive from `handle`.
pub(crate) async fn seed_user(pool: &SqlitePool, handle: &str) -> User {
    let user = User {
        id: UserId::new(),
        first_name: handle.to_uppercase(),
        last_name: "Tester".to_string(),
        email: format!("{handle}@example.com"),
        username: handle.to_string(),
    };
    SqliteUserRepository::new(pool.clone())
        .create(user)
        .await
        .unwrap()
}

pub(crate) fn sample_spot(owner: UserId) -> Spot {
    let input: SpotInput = serde_json::from_value(serde_json::json!({
        "address": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "country": "USA",
        "lat": 39.78,
        "lng": -89.65,
        "name": "Cozy cabin",
        "description": "Quiet place by the lake",
        "price": 120.0
    }))
    .unwrap();
    input.into_new_spot(owner).unwrap()
}
