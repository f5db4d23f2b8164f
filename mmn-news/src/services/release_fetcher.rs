//! Release catalog fetcher
//!
//! Fetches one category of an artist's release groups and normalizes each
//! remote record into a [`ReleaseGroup`].

use crate::error::NewsResult;
use crate::models::{ReleaseCategory, ReleaseGroup, ReleaseTypeFilter};
use crate::services::catalog::{ReleaseCatalog, RemoteReleaseGroup};

/// Fetch and normalize release groups; an empty catalog answer is not an error
pub async fn fetch_release_groups(
    catalog: &dyn ReleaseCatalog,
    artist_id: &str,
    filter: ReleaseTypeFilter,
) -> NewsResult<Vec<ReleaseGroup>> {
    let remote = catalog.artist_release_groups(artist_id, filter).await?;
    Ok(remote.into_iter().map(normalize).collect())
}

/// Convert a remote record; an empty first-release date becomes `None`
pub fn normalize(remote: RemoteReleaseGroup) -> ReleaseGroup {
    let release_date = Some(remote.first_release_date).filter(|d| !d.is_empty());
    ReleaseGroup::new(
        remote.title,
        release_date,
        ReleaseCategory::from_remote(&remote.release_type),
        remote.remote_id,
    )
}
