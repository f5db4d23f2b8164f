//! Update workflow: fold an edited interchange file back into `artist.toml`
//!
//! Rows are sorted by artist before grouping; arrival order in the file is
//! never relied on. For each artist the titles marked `excluded` become the
//! complete new exclusion set, and the document is written only when that
//! set differs from what is stored. No remote calls are made.

use crate::error::NewsResult;
use crate::models::{InterchangeRow, ReleaseStatus};
use crate::services::interchange::read_rows;
use crate::services::preference_store;
use crate::workflow::orchestrator::ArtistFailure;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};
use tracing::{debug, error, info, warn};

/// Totals for an update run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub rows_rejected: usize,
    pub artists_seen: usize,
    pub written: usize,
    pub unchanged: usize,
    /// Artists named in the file without a folder under the album folder
    pub missing_folders: usize,
    pub failures: Vec<ArtistFailure>,
}

impl ImportSummary {
    pub fn log(&self) {
        info!(
            "Update complete: {} rows ({} rejected), {} artists",
            self.rows_read,
            self.rows_rejected,
            self.artists_seen
        );
        info!(
            "  {} updated, {} unchanged, {} missing, {} failed",
            self.written,
            self.unchanged,
            self.missing_folders,
            self.failures.len()
        );
        for failure in &self.failures {
            info!("  ! {} ({}): {}", failure.artist, failure.kind, failure.message);
        }
    }
}

/// Sort rows by artist, then group consecutive rows of the same artist
pub fn group_by_artist(mut rows: Vec<InterchangeRow>) -> Vec<(String, Vec<InterchangeRow>)> {
    rows.sort_by(|a, b| a.artist.cmp(&b.artist));

    let mut groups: Vec<(String, Vec<InterchangeRow>)> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some((artist, members)) if *artist == row.artist => members.push(row),
            _ => groups.push((row.artist.clone(), vec![row])),
        }
    }
    groups
}

/// Titles marked excluded within one artist's rows
pub fn excluded_titles(rows: &[InterchangeRow]) -> BTreeSet<String> {
    rows.iter()
        .filter(|r| r.status == ReleaseStatus::Excluded)
        .map(|r| r.title.clone())
        .collect()
}

/// Read `input` and update preference documents under `album_folder`
pub fn import_preferences(album_folder: &Path, input: &Path) -> NewsResult<ImportSummary> {
    let reader = BufReader::new(File::open(input)?);
    let parsed = read_rows(reader)?;

    info!(
        "Read {} rows from {} ({} rejected)",
        parsed.rows.len(),
        input.display(),
        parsed.rejected
    );

    let mut summary = apply_rows(album_folder, parsed.rows);
    summary.rows_rejected = parsed.rejected;
    Ok(summary)
}

/// Apply already-parsed rows
pub fn apply_rows(album_folder: &Path, rows: Vec<InterchangeRow>) -> ImportSummary {
    let mut summary = ImportSummary {
        rows_read: rows.len(),
        ..Default::default()
    };

    for (artist, rows) in group_by_artist(rows) {
        summary.artists_seen += 1;

        if !is_plain_folder_name(&artist) {
            warn!(artist = %artist, "Artist name is not a plain folder name, skipping");
            summary.missing_folders += 1;
            continue;
        }

        let artist_path = album_folder.join(&artist);
        if !artist_path.is_dir() {
            warn!(artist = %artist, "No local folder for artist, skipping");
            summary.missing_folders += 1;
            continue;
        }

        debug!(
            artist = %artist,
            found = rows.iter().filter(|r| r.status == ReleaseStatus::Found).count(),
            not_found = rows.iter().filter(|r| r.status == ReleaseStatus::NotFound).count(),
            excluded = rows.iter().filter(|r| r.status == ReleaseStatus::Excluded).count(),
            "Grouped rows"
        );

        match update_artist(&artist_path, excluded_titles(&rows)) {
            Ok(true) => {
                info!("Updated excludes for {}", artist);
                summary.written += 1;
            }
            Ok(false) => summary.unchanged += 1,
            Err(e) => {
                error!(artist = %artist, kind = e.kind(), "{}", e);
                summary.failures.push(ArtistFailure::new(&artist, &e));
            }
        }
    }

    summary
}

/// Merge and, when needed, save; returns whether a write happened
fn update_artist(artist_path: &Path, excluded: BTreeSet<String>) -> NewsResult<bool> {
    let existing = preference_store::load(artist_path)?;
    let (merged, did_change) = preference_store::merge_excludes(&existing, excluded);

    if did_change {
        preference_store::save(artist_path, &merged)?;
    }
    Ok(did_change)
}

fn is_plain_folder_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
