//! Artist resolution
//!
//! Maps a local folder name onto one remote artist. Candidates must score
//! strictly above the confidence threshold; the best score wins and equal
//! scores fall back to the lexicographically smallest remote id so repeated
//! runs pick the same artist.

use crate::error::{NewsError, NewsResult, NotFoundReason};
use crate::models::ArtistCandidate;
use crate::services::catalog::ReleaseCatalog;
use std::cmp::Ordering;

/// Default minimum (exclusive) confidence score
pub const DEFAULT_CONFIDENCE_THRESHOLD: u32 = 60;

/// Artist resolver bound to a remote catalog
pub struct ArtistResolver<'a> {
    catalog: &'a dyn ReleaseCatalog,
    threshold: u32,
}

impl<'a> ArtistResolver<'a> {
    pub fn new(catalog: &'a dyn ReleaseCatalog, threshold: u32) -> Self {
        Self { catalog, threshold }
    }

    /// Search for `name` and pick the best confident candidate
    pub async fn resolve(&self, name: &str) -> NewsResult<ArtistCandidate> {
        let candidates = self.catalog.search_artists(name).await?;
        let chosen = select_candidate(name, candidates, self.threshold)?;

        tracing::debug!(
            artist = %name,
            remote_name = %chosen.name,
            remote_id = %chosen.remote_id,
            score = chosen.confidence_score,
            "Resolved artist"
        );

        Ok(chosen)
    }
}

/// Pick the candidate with the highest score above `threshold`
pub fn select_candidate(
    name: &str,
    candidates: Vec<ArtistCandidate>,
    threshold: u32,
) -> NewsResult<ArtistCandidate> {
    if candidates.is_empty() {
        return Err(NewsError::ArtistNotFound {
            name: name.to_string(),
            reason: NotFoundReason::NoResults,
        });
    }

    candidates
        .into_iter()
        .filter(|c| c.confidence_score > threshold)
        .max_by(compare_candidates)
        .ok_or_else(|| NewsError::ArtistNotFound {
            name: name.to_string(),
            reason: NotFoundReason::NoConfidentMatch,
        })
}

/// Higher score is greater; on a tie the smaller remote id is greater
fn compare_candidates(a: &ArtistCandidate, b: &ArtistCandidate) -> Ordering {
    a.confidence_score
        .cmp(&b.confidence_score)
        .then_with(|| b.remote_id.cmp(&a.remote_id))
}
