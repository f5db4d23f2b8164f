//! On-disk collection fixtures

use mmn_news::config::RunSettings;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Create an artist folder with the given release sub-folders
pub fn add_artist(album_folder: &Path, artist: &str, releases: &[&str]) -> PathBuf {
    let path = album_folder.join(artist);
    fs::create_dir_all(&path).unwrap();
    for release in releases {
        add_release_folder(&path, release);
    }
    path
}

pub fn add_release_folder(artist_path: &Path, release: &str) {
    fs::create_dir_all(artist_path.join(release)).unwrap();
}

pub fn write_artist_toml(artist_path: &Path, content: &str) {
    fs::write(artist_path.join("artist.toml"), content).unwrap();
}

/// Default settings without pacing
pub fn test_settings() -> RunSettings {
    RunSettings {
        pacing_delay: Duration::ZERO,
        ..RunSettings::default()
    }
}
