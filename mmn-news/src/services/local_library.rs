//! Local collection enumeration
//!
//! The album folder holds one sub-directory per artist; each artist folder
//! holds one sub-directory per release. Only immediate sub-directories are
//! considered at both levels.

use crate::error::NewsResult;
use crate::models::LocalArtist;
use crate::services::sanitizer::sanitize;
use mmn_common::Error;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Immediate sub-directories of `path` as (name, path), sorted by name
pub fn subdirectories(path: &Path) -> NewsResult<Vec<(String, PathBuf)>> {
    if !path.exists() {
        return Err(Error::NotFound(format!("Folder not found: {}", path.display())).into());
    }

    if !path.is_dir() {
        return Err(Error::InvalidInput(format!("Not a directory: {}", path.display())).into());
    }

    let walker = WalkDir::new(path)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1);

    let mut entries = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                let name = entry.file_name().to_string_lossy().to_string();
                entries.push((name, entry.path().to_path_buf()));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Error accessing entry under {}: {}", path.display(), e);
            }
        }
    }

    entries.sort();
    Ok(entries)
}

/// Artist folders of the collection, in sorted order
pub fn artists(album_folder: &Path) -> NewsResult<Vec<(String, PathBuf)>> {
    subdirectories(album_folder)
}

/// Read one artist folder, sanitizing release folder names once
pub fn scan_artist(folder_name: &str, path: &Path) -> NewsResult<LocalArtist> {
    let local_release_folders: BTreeSet<String> = subdirectories(path)?
        .into_iter()
        .map(|(name, _)| sanitize(&name, '_'))
        .collect();

    Ok(LocalArtist {
        folder_name: folder_name.to_string(),
        path: path.to_path_buf(),
        local_release_folders,
    })
}
