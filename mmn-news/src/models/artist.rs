//! Artist records: remote search candidates and local folders

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Remote artist search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCandidate {
    pub name: String,
    pub remote_id: String,
    /// Remote relevance, observed range 0-100
    pub confidence_score: u32,
}

impl ArtistCandidate {
    pub fn new(
        name: impl Into<String>,
        remote_id: impl Into<String>,
        confidence_score: u32,
    ) -> Self {
        Self {
            name: name.into(),
            remote_id: remote_id.into(),
            confidence_score,
        }
    }
}

/// One top-level folder of the local collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtist {
    /// Folder name; doubles as display name and search query
    pub folder_name: String,
    /// Absolute path to the artist folder
    pub path: PathBuf,
    /// Sanitized names of the artist's release sub-folders
    pub local_release_folders: BTreeSet<String>,
}

impl LocalArtist {
    /// Location of the artist's preference document
    pub fn preferences_path(&self) -> PathBuf {
        self.path.join(crate::services::preference_store::PREFERENCES_FILE)
    }
}
