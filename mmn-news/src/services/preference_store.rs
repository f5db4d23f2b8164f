//! Per-artist preference store
//!
//! Each artist folder may hold an `artist.toml`:
//!
//! ```toml
//! [musicNews]
//! skip = false
//! excludes = ["Some Bootleg", "Deluxe Reissue"]
//! ```
//!
//! Saving only replaces the `[musicNews]` table; any other content of the
//! document is carried over. Writes are atomic (temp file + rename).

use crate::error::{NewsError, NewsResult};
use crate::models::Preferences;
use mmn_common::config::write_toml_document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name of the per-artist document
pub const PREFERENCES_FILE: &str = "artist.toml";

/// Top-level table holding the preferences
pub const SECTION: &str = "musicNews";

/// `[musicNews]` table with defaults for absent keys
#[derive(Debug, Default, Serialize, Deserialize)]
struct MusicNewsSection {
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    excludes: Vec<String>,
}

impl From<MusicNewsSection> for Preferences {
    fn from(section: MusicNewsSection) -> Self {
        Preferences {
            skip: section.skip,
            excludes: section.excludes.into_iter().collect(),
        }
    }
}

impl From<&Preferences> for MusicNewsSection {
    fn from(prefs: &Preferences) -> Self {
        MusicNewsSection {
            skip: prefs.skip,
            excludes: prefs.excludes.iter().cloned().collect(),
        }
    }
}

fn document_path(artist_path: &Path) -> PathBuf {
    artist_path.join(PREFERENCES_FILE)
}

fn malformed(path: &Path, reason: impl Into<String>) -> NewsError {
    NewsError::MalformedPreferences {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Read the raw document, if present
fn read_document(path: &Path) -> NewsResult<Option<toml::Table>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| malformed(path, e.message().to_string()))?;

    Ok(Some(table))
}

/// Load an artist's preferences
///
/// No document means default preferences. A document without a
/// `[musicNews]` table, or one that does not parse, is malformed.
pub fn load(artist_path: &Path) -> NewsResult<Preferences> {
    let path = document_path(artist_path);

    let Some(document) = read_document(&path)? else {
        return Ok(Preferences::default());
    };

    let section = document
        .get(SECTION)
        .ok_or_else(|| malformed(&path, format!("missing [{}] section", SECTION)))?;

    let section: MusicNewsSection = section
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| malformed(&path, e.message().to_string()))?;

    Ok(section.into())
}

/// Replace the exclusion set wholesale
///
/// Returns the updated preferences and whether they differ from `existing`
/// (and so need to be written).
pub fn merge_excludes(
    existing: &Preferences,
    new_excluded_titles: BTreeSet<String>,
) -> (Preferences, bool) {
    let did_change = existing.excludes != new_excluded_titles;
    let merged = Preferences {
        skip: existing.skip,
        excludes: new_excluded_titles,
    };
    (merged, did_change)
}

/// Persist an artist's preferences, creating the document if absent
pub fn save(artist_path: &Path, preferences: &Preferences) -> NewsResult<()> {
    let path = document_path(artist_path);
    let mut document = read_document(&path)?.unwrap_or_default();

    let section = toml::Value::try_from(MusicNewsSection::from(preferences))
        .map_err(|e| malformed(&path, e.to_string()))?;
    document.insert(SECTION.to_string(), section);

    write_toml_document(&document, &path)?;

    tracing::debug!(
        path = %path.display(),
        skip = preferences.skip,
        excludes = preferences.excludes.len(),
        "Saved preferences"
    );
    Ok(())
}
