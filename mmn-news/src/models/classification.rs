//! Per-artist reconciliation result and its interchange rows

use crate::models::ReleaseGroup;
use std::fmt;
use std::str::FromStr;

/// Bucket a release group landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReleaseStatus {
    Found,
    NotFound,
    Excluded,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Found => "found",
            ReleaseStatus::NotFound => "not-found",
            ReleaseStatus::Excluded => "excluded",
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "found" => Ok(ReleaseStatus::Found),
            "not-found" => Ok(ReleaseStatus::NotFound),
            "excluded" => Ok(ReleaseStatus::Excluded),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Complete partition of one artist's fetched release groups
///
/// Every fetched release group sits in exactly one bucket, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub found: Vec<ReleaseGroup>,
    pub not_found: Vec<ReleaseGroup>,
    pub excluded: Vec<ReleaseGroup>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.found.len() + self.not_found.len() + self.excluded.len()
    }

    /// Not-found releases stably sorted by category for display
    pub fn not_found_for_display(&self) -> Vec<&ReleaseGroup> {
        let mut missing: Vec<&ReleaseGroup> = self.not_found.iter().collect();
        missing.sort_by(|a, b| a.category().as_str().cmp(b.category().as_str()));
        missing
    }

    /// Buckets in export order: found, not-found, excluded
    pub fn buckets(&self) -> [(ReleaseStatus, &[ReleaseGroup]); 3] {
        [
            (ReleaseStatus::Found, self.found.as_slice()),
            (ReleaseStatus::NotFound, self.not_found.as_slice()),
            (ReleaseStatus::Excluded, self.excluded.as_slice()),
        ]
    }

    /// Interchange rows for every release group, bucket by bucket
    pub fn to_rows(&self, artist: &str) -> Vec<InterchangeRow> {
        self.buckets()
            .into_iter()
            .flat_map(|(status, releases)| {
                releases
                    .iter()
                    .map(move |rg| InterchangeRow::from_release(artist, rg, status))
            })
            .collect()
    }
}

/// One line of the interchange file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterchangeRow {
    pub artist: String,
    pub title: String,
    pub release_date: Option<String>,
    pub category: String,
    pub status: ReleaseStatus,
}

impl InterchangeRow {
    pub fn from_release(artist: &str, release: &ReleaseGroup, status: ReleaseStatus) -> Self {
        Self {
            artist: artist.to_string(),
            title: release.title().to_string(),
            release_date: release.release_date().map(str::to_string),
            category: release.category().to_string(),
            status,
        }
    }
}
