//! User service — provision accounts and resolve token subjects.

use spothub_domain::error::{NotFoundError, SpotHubError};
use spothub_domain::id::UserId;
use spothub_domain::user::{NewUser, User};

use crate::ports::UserRepository;

/// Application service for user accounts.
pub struct UserService<U> {
    users: U,
}

impl<U> UserService<U>
where
    U: UserRepository + Sync,
{
    /// Create a new service backed by the given repository.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Validate and store a new account.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::Validation`] for blank fields or a malformed
    /// email, or a storage error (including a taken email or username).
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, SpotHubError> {
        let user = new_user.into_user()?;
        self.users.create(user).await
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`SpotHubError::NotFound`] when no user with `id` exists, or a
    /// storage error from the repository.
    pub async fn get_user(&self, id: UserId) -> Result<User, SpotHubError> {
        self.users.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use spothub_domain::error::ValidationError;

    fn new_user() -> NewUser {
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
        }
    }

    #[tokio::test]
    async fn should_register_user_and_find_it_again() {
        let svc = UserService::new(InMemoryStore::default());

        let user = svc.register(new_user()).await.unwrap();
        assert_eq!(svc.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn should_not_store_user_when_input_invalid() {
        let store = InMemoryStore::default();
        let svc = UserService::new(store.clone());

        let result = svc
            .register(NewUser {
                email: "nope".to_string(),
                ..new_user()
            })
            .await;
        assert!(matches!(
            result,
            Err(SpotHubError::Validation(ValidationError::Fields(_)))
        ));
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_user_unknown() {
        let svc = UserService::new(InMemoryStore::default());

        let result = svc.get_user(UserId::new()).await;
        assert!(matches!(result, Err(SpotHubError::NotFound(err)) if err.entity == "User"));
    }
}
