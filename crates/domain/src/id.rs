//! Typed identifier newtypes backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Spot`](crate::spot::Spot).
    SpotId
);

define_id!(
    /// Unique identifier for a [`SpotImage`](crate::spot_image::SpotImage).
    SpotImageId
);

define_id!(
    /// Unique identifier for a [`Review`](crate::review::Review).
    ReviewId
);

define_id!(
    /// Unique identifier for a [`ReviewImage`](crate::review::ReviewImage).
    ReviewImageId
);

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(SpotId::new(), SpotId::new());
    }

    #[test]
    fn should_parse_id_from_its_display_form() {
        let id = ReviewId::new();
        let parsed: ReviewId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_bare_uuid_string() {
        let uuid = uuid::Uuid::new_v4();
        let json = serde_json::to_string(&UserId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        assert!(SpotImageId::from_str("42").is_err());
    }
}
