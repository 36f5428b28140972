//! Shared lookup-then-authorize steps used by every mutating use-case.

use spothub_domain::error::{NotFoundError, SpotHubError};
use spothub_domain::id::{SpotId, UserId};
use spothub_domain::spot::Spot;

use crate::ports::SpotRepository;

/// Load a spot or fail with [`SpotHubError::NotFound`].
///
/// # Errors
///
/// Returns [`SpotHubError::NotFound`] when no spot with `id` exists, or a
/// storage error from the repository.
pub async fn load_spot<S: SpotRepository>(spots: &S, id: SpotId) -> Result<Spot, SpotHubError> {
    spots.get_by_id(id).await?.ok_or_else(|| {
        NotFoundError {
            entity: "Spot",
            id: id.to_string(),
        }
        .into()
    })
}

/// Load a spot and assert that `requester` owns it.
///
/// Existence is checked first, so a missing spot is always reported as
/// not-found rather than forbidden.
///
/// # Errors
///
/// Returns [`SpotHubError::NotFound`] when the spot is missing,
/// [`SpotHubError::Forbidden`] when `requester` is not the owner, or a
/// storage error from the repository.
pub async fn load_owned_spot<S: SpotRepository>(
    spots: &S,
    id: SpotId,
    requester: UserId,
) -> Result<Spot, SpotHubError> {
    let spot = load_spot(spots, id).await?;
    spot.ensure_owned_by(requester)?;
    Ok(spot)
}
