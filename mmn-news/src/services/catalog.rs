//! Remote catalog seam
//!
//! The reconciliation core only talks to the remote catalog through
//! [`ReleaseCatalog`], so tests can substitute an in-memory catalog.

use crate::error::NewsResult;
use crate::models::{ArtistCandidate, ReleaseTypeFilter};

/// Release group exactly as the remote catalog reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReleaseGroup {
    pub title: String,
    /// Empty when the catalog does not know the date
    pub first_release_date: String,
    /// Remote type string (Album, Live, Compilation, EP, ...)
    pub release_type: String,
    pub remote_id: String,
}

/// Remote catalog operations used by the reconciliation workflow
#[async_trait::async_trait]
pub trait ReleaseCatalog: Send + Sync {
    /// Search artists by free-text name
    async fn search_artists(&self, name: &str) -> NewsResult<Vec<ArtistCandidate>>;

    /// All release groups of one category for an artist
    async fn artist_release_groups(
        &self,
        artist_id: &str,
        filter: ReleaseTypeFilter,
    ) -> NewsResult<Vec<RemoteReleaseGroup>>;
}
