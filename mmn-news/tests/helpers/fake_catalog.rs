//! In-memory remote catalog

use async_trait::async_trait;
use mmn_news::models::{ArtistCandidate, ReleaseTypeFilter};
use mmn_news::services::{ReleaseCatalog, RemoteReleaseGroup};
use mmn_news::{NewsError, NewsResult};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeCatalog {
    artists: HashMap<String, Vec<ArtistCandidate>>,
    release_groups: HashMap<String, Vec<RemoteReleaseGroup>>,
    unavailable: HashSet<String>,
    searches: Mutex<Vec<String>>,
    browses: Mutex<Vec<(String, ReleaseTypeFilter)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one confident candidate for `name`
    pub fn with_artist(self, name: &str, remote_id: &str) -> Self {
        self.with_candidates(name, vec![ArtistCandidate::new(name, remote_id, 100)])
    }

    pub fn with_candidates(mut self, name: &str, candidates: Vec<ArtistCandidate>) -> Self {
        self.artists.insert(name.to_string(), candidates);
        self
    }

    pub fn with_release(
        mut self,
        artist_id: &str,
        title: &str,
        date: &str,
        release_type: &str,
    ) -> Self {
        let id = format!("{}-{}", artist_id, self.release_count(artist_id));
        self.release_groups
            .entry(artist_id.to_string())
            .or_default()
            .push(RemoteReleaseGroup {
                title: title.to_string(),
                first_release_date: date.to_string(),
                release_type: release_type.to_string(),
                remote_id: id,
            });
        self
    }

    /// Searches for `name` fail as if the service were down
    pub fn with_unavailable(mut self, name: &str) -> Self {
        self.unavailable.insert(name.to_string());
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn browses(&self) -> Vec<(String, ReleaseTypeFilter)> {
        self.browses.lock().unwrap().clone()
    }

    fn release_count(&self, artist_id: &str) -> usize {
        self.release_groups.get(artist_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl ReleaseCatalog for FakeCatalog {
    async fn search_artists(&self, name: &str) -> NewsResult<Vec<ArtistCandidate>> {
        self.searches.lock().unwrap().push(name.to_string());

        if self.unavailable.contains(name) {
            return Err(NewsError::RemoteUnavailable("rate limited".to_string()));
        }
        Ok(self.artists.get(name).cloned().unwrap_or_default())
    }

    async fn artist_release_groups(
        &self,
        artist_id: &str,
        filter: ReleaseTypeFilter,
    ) -> NewsResult<Vec<RemoteReleaseGroup>> {
        self.browses
            .lock()
            .unwrap()
            .push((artist_id.to_string(), filter));
        Ok(self
            .release_groups
            .get(artist_id)
            .cloned()
            .unwrap_or_default())
    }
}
