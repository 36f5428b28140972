//! User — the account that owns spots and writes reviews.

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, ValidationError};
use crate::id::UserId;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl User {
    /// Public display attributes of this user.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// Account details supplied when provisioning a user.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl NewUser {
    /// Check every field and assign a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Fields`] naming each blank field, and the
    /// email when it has no `@`.
    pub fn into_user(self) -> Result<User, ValidationError> {
        let mut errors = FieldErrors::new();
        let required = [
            ("firstName", &self.first_name, "First name is required"),
            ("lastName", &self.last_name, "Last name is required"),
            ("email", &self.email, "Email is required"),
            ("username", &self.username, "Username is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }
        if !errors.contains_key("email") && !self.email.contains('@') {
            errors.insert("email", "Invalid email");
        }
        if !errors.is_empty() {
            return Err(ValidationError::Fields(errors));
        }

        Ok(User {
            id: UserId::new(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
        })
    }
}

/// The subset of a [`User`] shown next to listings and reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}
