//! Process workflow: reconcile every local artist against the remote catalog
//!
//! Artists are handled one at a time in sorted folder order. Each artist is
//! independent: a failure is logged with the artist name and the run moves
//! on. After every artist that reached the remote catalog the run waits for
//! the configured pacing delay.

use crate::config::RunSettings;
use crate::error::{NewsError, NewsResult};
use crate::models::{Classification, Preferences};
use crate::services::artist_resolver::ArtistResolver;
use crate::services::catalog::ReleaseCatalog;
use crate::services::interchange::InterchangeWriter;
use crate::services::{classifier, local_library, preference_store, release_fetcher, report};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

/// One artist that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFailure {
    pub artist: String,
    pub kind: &'static str,
    pub message: String,
}

impl ArtistFailure {
    pub fn new(artist: &str, err: &NewsError) -> Self {
        Self {
            artist: artist.to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Totals for a process run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub artists_seen: usize,
    pub skipped: usize,
    pub processed: usize,
    pub missing_releases: usize,
    pub failures: Vec<ArtistFailure>,
}

impl RunSummary {
    pub fn log(&self) {
        info!("");
        info!(
            "Run complete: {} artists, {} processed, {} skipped, {} failed, {} missing releases",
            self.artists_seen,
            self.processed,
            self.skipped,
            self.failures.len(),
            self.missing_releases
        );
        for failure in &self.failures {
            info!("  ! {} ({}): {}", failure.artist, failure.kind, failure.message);
        }
    }
}

/// Drives the process direction for a whole collection
pub struct Orchestrator<'a> {
    catalog: &'a dyn ReleaseCatalog,
    settings: &'a RunSettings,
}

impl<'a> Orchestrator<'a> {
    pub fn new(catalog: &'a dyn ReleaseCatalog, settings: &'a RunSettings) -> Self {
        Self { catalog, settings }
    }

    /// Process every artist folder under `album_folder`
    ///
    /// When `export` is given, every processed artist's classification is
    /// appended to it. Only enumeration and export write failures abort.
    pub async fn run<W: Write>(
        &self,
        album_folder: &Path,
        mut export: Option<&mut InterchangeWriter<W>>,
    ) -> NewsResult<RunSummary> {
        let mut summary = RunSummary::default();

        for (artist, artist_path) in local_library::artists(album_folder)? {
            summary.artists_seen += 1;
            info!("");
            info!("Working on local {}", artist);

            let preferences = match preference_store::load(&artist_path) {
                Ok(preferences) => preferences,
                Err(e) => {
                    error!(artist = %artist, kind = e.kind(), " {}", e);
                    summary.failures.push(ArtistFailure::new(&artist, &e));
                    continue;
                }
            };

            if preferences.skip {
                info!(" Skipped");
                summary.skipped += 1;
                continue;
            }

            match self.reconcile(&artist, &artist_path, &preferences).await {
                Ok(classification) => {
                    report::log_artist_report(&artist, &classification);
                    if let Some(writer) = export.as_deref_mut() {
                        writer.write_classification(&artist, &classification)?;
                    }
                    summary.processed += 1;
                    summary.missing_releases += classification.not_found.len();
                }
                Err(e) => {
                    error!(artist = %artist, kind = e.kind(), " {}", e);
                    summary.failures.push(ArtistFailure::new(&artist, &e));
                }
            }

            self.pace().await;
        }

        Ok(summary)
    }

    /// Resolve, fetch, scan and classify one artist
    pub async fn reconcile(
        &self,
        artist: &str,
        artist_path: &Path,
        preferences: &Preferences,
    ) -> NewsResult<Classification> {
        let resolver = ArtistResolver::new(self.catalog, self.settings.confidence_threshold);
        let candidate = resolver.resolve(artist).await?;

        let release_groups = release_fetcher::fetch_release_groups(
            self.catalog,
            &candidate.remote_id,
            self.settings.category,
        )
        .await?;

        if release_groups.is_empty() {
            info!(" No release groups found for this artist");
        } else {
            info!(" Found {} release groups", release_groups.len());
        }

        let local = local_library::scan_artist(artist, artist_path)?;

        Ok(classifier::classify(
            &release_groups,
            &local.local_release_folders,
            &preferences.excludes,
        ))
    }

    async fn pace(&self) {
        if !self.settings.pacing_delay.is_zero() {
            tokio::time::sleep(self.settings.pacing_delay).await;
        }
    }
}
