//! Spot image — a picture attached to a spot.

use serde::{Deserialize, Serialize};

use crate::error::ForbiddenError;
use crate::id::{SpotId, SpotImageId};

/// An image URL attached to a [`Spot`](crate::spot::Spot).
///
/// `preview` marks the image shown on listing cards. No uniqueness is
/// enforced on it; clients decide which preview to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotImage {
    pub id: SpotImageId,
    pub spot_id: SpotId,
    pub url: String,
    pub preview: bool,
}

impl SpotImage {
    /// Attach a new image to `spot_id`.
    #[must_use]
    pub fn new(spot_id: SpotId, url: impl Into<String>, preview: bool) -> Self {
        Self {
            id: SpotImageId::new(),
            spot_id,
            url: url.into(),
            preview,
        }
    }

    /// Assert that this image belongs to `spot_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenError::ImageNotInSpot`] otherwise.
    pub fn ensure_in_spot(&self, spot_id: SpotId) -> Result<(), ForbiddenError> {
        if self.spot_id == spot_id {
            Ok(())
        } else {
            Err(ForbiddenError::ImageNotInSpot)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_image_of_same_spot() {
        let spot_id = SpotId::new();
        let image = SpotImage::new(spot_id, "https://img/1.png", true);
        assert!(image.ensure_in_spot(spot_id).is_ok());
    }

    #[test]
    fn should_forbid_image_of_other_spot() {
        let image = SpotImage::new(SpotId::new(), "https://img/1.png", false);
        assert_eq!(
            image.ensure_in_spot(SpotId::new()),
            Err(ForbiddenError::ImageNotInSpot)
        );
    }
}
