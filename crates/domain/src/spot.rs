//! Spot — a rentable listing owned by a user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ForbiddenError, ValidationError};
use crate::id::{SpotId, UserId};
use crate::spot_image::SpotImage;
use crate::time::{self, Timestamp};
use crate::user::UserSummary;
use crate::validation::{Check, FieldRules, Presence, Rule, RuleSet, as_number, as_text};

/// Longest accepted spot name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// A listing representing a rentable location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: SpotId,
    pub owner_id: UserId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Spot {
    /// Whether `user` owns this spot.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Assert that `user` owns this spot.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenError::NotOwner`] otherwise.
    pub fn ensure_owned_by(&self, user: UserId) -> Result<(), ForbiddenError> {
        if self.is_owned_by(user) {
            Ok(())
        } else {
            Err(ForbiddenError::NotOwner)
        }
    }

    /// Apply a validated partial update and bump `updated_at`.
    pub fn apply(&mut self, changes: SpotChanges) {
        let SpotChanges {
            address,
            city,
            state,
            country,
            lat,
            lng,
            name,
            description,
            price,
        } = changes;

        if let Some(address) = address {
            self.address = address;
        }
        if let Some(city) = city {
            self.city = city;
        }
        if let Some(state) = state {
            self.state = state;
        }
        if let Some(country) = country {
            self.country = country;
        }
        if let Some(lat) = lat {
            self.lat = lat;
        }
        if let Some(lng) = lng {
            self.lng = lng;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        self.updated_at = time::now();
    }
}

const fn rule(check: Check, message: &'static str) -> Rule {
    Rule { check, message }
}

const SPOT_FIELDS: &[FieldRules] = &[
    FieldRules {
        field: "address",
        missing: "Street address is required",
        rules: &[rule(Check::Text, "Street address is required")],
    },
    FieldRules {
        field: "city",
        missing: "City is required",
        rules: &[rule(Check::Text, "City is required")],
    },
    FieldRules {
        field: "state",
        missing: "State is required",
        rules: &[rule(Check::Text, "State is required")],
    },
    FieldRules {
        field: "country",
        missing: "Country is required",
        rules: &[rule(Check::Text, "Country is required")],
    },
    FieldRules {
        field: "lat",
        missing: "Latitude is required",
        rules: &[
            rule(Check::Number, "Latitude must be within -90 and 90"),
            rule(Check::Between(-90.0, 90.0), "Latitude must be within -90 and 90"),
        ],
    },
    FieldRules {
        field: "lng",
        missing: "Longitude is required",
        rules: &[
            rule(Check::Number, "Longitude must be within -180 and 180"),
            rule(
                Check::Between(-180.0, 180.0),
                "Longitude must be within -180 and 180",
            ),
        ],
    },
    FieldRules {
        field: "name",
        missing: "Name is required",
        rules: &[
            rule(Check::Text, "Name is required"),
            rule(
                Check::MaxChars(MAX_NAME_CHARS),
                "Name must be less than 50 characters",
            ),
        ],
    },
    FieldRules {
        field: "description",
        missing: "Description is required",
        rules: &[rule(Check::Text, "Description is required")],
    },
    FieldRules {
        field: "price",
        missing: "Price per day is required",
        rules: &[
            rule(Check::Number, "Price per day must be a positive number"),
            rule(Check::Positive, "Price per day must be a positive number"),
        ],
    },
];

/// Rules for `POST /spots`: every field required.
pub const CREATE_SPOT_RULES: RuleSet = RuleSet {
    presence: Presence::Required,
    fields: SPOT_FIELDS,
};

/// Rules for `PATCH /spots/:id`: same constraints, every field optional.
pub const EDIT_SPOT_RULES: RuleSet = RuleSet {
    presence: Presence::Optional,
    fields: SPOT_FIELDS,
};

/// Unvalidated spot payload as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotInput {
    pub address: Option<Value>,
    pub city: Option<Value>,
    pub state: Option<Value>,
    pub country: Option<Value>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
}

impl SpotInput {
    fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "address" => self.address.as_ref(),
            "city" => self.city.as_ref(),
            "state" => self.state.as_ref(),
            "country" => self.country.as_ref(),
            "lat" => self.lat.as_ref(),
            "lng" => self.lng.as_ref(),
            "name" => self.name.as_ref(),
            "description" => self.description.as_ref(),
            "price" => self.price.as_ref(),
            _ => None,
        }
    }

    fn changes(&self) -> SpotChanges {
        let text = |value: &Option<Value>| value.as_ref().and_then(as_text);
        let number = |value: &Option<Value>| value.as_ref().and_then(as_number);
        SpotChanges {
            address: text(&self.address),
            city: text(&self.city),
            state: text(&self.state),
            country: text(&self.country),
            lat: number(&self.lat),
            lng: number(&self.lng),
            name: text(&self.name),
            description: text(&self.description),
            price: number(&self.price),
        }
    }

    /// Validate against [`CREATE_SPOT_RULES`] and build a new spot owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Fields`] with one message per failing field.
    pub fn into_new_spot(self, owner_id: UserId) -> Result<Spot, ValidationError> {
        CREATE_SPOT_RULES.check(|field| self.field(field))?;

        let changes = self.changes();
        let now = time::now();
        Ok(Spot {
            id: SpotId::new(),
            owner_id,
            address: changes.address.unwrap_or_default(),
            city: changes.city.unwrap_or_default(),
            state: changes.state.unwrap_or_default(),
            country: changes.country.unwrap_or_default(),
            lat: changes.lat.unwrap_or_default(),
            lng: changes.lng.unwrap_or_default(),
            name: changes.name.unwrap_or_default(),
            description: changes.description.unwrap_or_default(),
            price: changes.price.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate against [`EDIT_SPOT_RULES`] and return the fields to change.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Fields`] with one message per failing field.
    pub fn into_changes(self) -> Result<SpotChanges, ValidationError> {
        EDIT_SPOT_RULES.check(|field| self.field(field))?;
        Ok(self.changes())
    }
}

/// Validated partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotChanges {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// A spot together with its images and owner, as shown on the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct SpotDetails {
    #[serde(flatten)]
    pub spot: Spot,
    #[serde(rename = "SpotImages")]
    pub images: Vec<SpotImage>,
    #[serde(rename = "Owner")]
    pub owner: Option<UserSummary>,
}
