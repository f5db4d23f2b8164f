//! Process workflow tests against an in-memory catalog

mod helpers;

use helpers::{add_artist, test_settings, write_artist_toml, FakeCatalog};
use mmn_news::models::{ReleaseStatus, ReleaseTypeFilter};
use mmn_news::services::interchange::read_rows;
use mmn_news::services::InterchangeWriter;
use mmn_news::workflow::Orchestrator;
use std::io::Cursor;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn beatles_catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with_artist("Beatles", "b-id")
        .with_release("b-id", "Abbey Road", "1969-09-26", "Album")
        .with_release("b-id", "Let It Be", "1970-05-08", "Album")
        .with_release("b-id", "Help!", "1965-08-06", "Album")
        .with_release("b-id", "1", "2000-11-13", "Compilation")
}

#[tokio::test]
async fn test_process_classifies_artist() {
    let temp = TempDir::new().unwrap();
    let beatles = add_artist(
        temp.path(),
        "Beatles",
        &["Abbey Road", "Let It Be (Remastered)"],
    );
    write_artist_toml(&beatles, "[musicNews]\nexcludes = [\"Help!\"]\n");

    let catalog = beatles_catalog();
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let summary = orchestrator
        .run::<Vec<u8>>(temp.path(), None)
        .await
        .unwrap();

    assert_eq!(summary.artists_seen, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.missing_releases, 1);
    assert!(summary.failures.is_empty());
    assert_eq!(catalog.browses(), vec![("b-id".to_string(), ReleaseTypeFilter::All)]);
}

#[tokio::test]
async fn test_process_isolates_failing_artists() {
    let temp = TempDir::new().unwrap();
    add_artist(temp.path(), "Beatles", &["Abbey Road"]);
    add_artist(temp.path(), "Nobody Knows", &["Demo"]);
    let broken = add_artist(temp.path(), "Broken", &["Something"]);
    write_artist_toml(&broken, "[other]\nvalue = 1\n");
    add_artist(temp.path(), "Offline", &[]);

    let catalog = beatles_catalog().with_unavailable("Offline");
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let summary = orchestrator
        .run::<Vec<u8>>(temp.path(), None)
        .await
        .unwrap();

    assert_eq!(summary.artists_seen, 4);
    assert_eq!(summary.processed, 1);

    let failures: Vec<(&str, &str)> = summary
        .failures
        .iter()
        .map(|f| (f.artist.as_str(), f.kind))
        .collect();
    assert_eq!(
        failures,
        vec![
            ("Broken", "MalformedPreferences"),
            ("Nobody Knows", "ArtistNotFound"),
            ("Offline", "RemoteUnavailable"),
        ]
    );

    // Broken never reaches the catalog
    assert_eq!(catalog.searches(), vec!["Beatles", "Nobody Knows", "Offline"]);
}

#[tokio::test]
async fn test_process_honours_skip() {
    let temp = TempDir::new().unwrap();
    let queen = add_artist(temp.path(), "Queen", &["Jazz"]);
    write_artist_toml(&queen, "[musicNews]\nskip = true\n");

    let catalog = FakeCatalog::new().with_artist("Queen", "q-id");
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let summary = orchestrator
        .run::<Vec<u8>>(temp.path(), None)
        .await
        .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 0);
    assert!(catalog.searches().is_empty());
}

#[tokio::test]
async fn test_pacing_only_after_remote_artists() {
    let temp = TempDir::new().unwrap();
    add_artist(temp.path(), "Beatles", &["Abbey Road"]);
    let broken = add_artist(temp.path(), "Broken", &[]);
    write_artist_toml(&broken, "[other]\nvalue = 1\n");
    let queen = add_artist(temp.path(), "Queen", &["Jazz"]);
    write_artist_toml(&queen, "[musicNews]\nskip = true\n");

    let catalog = beatles_catalog();
    let delay = Duration::from_millis(300);
    let settings = mmn_news::config::RunSettings {
        pacing_delay: delay,
        ..test_settings()
    };
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let started = Instant::now();
    let summary = orchestrator
        .run::<Vec<u8>>(temp.path(), None)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(elapsed >= delay, "elapsed {:?}", elapsed);
    assert!(elapsed < delay * 2, "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_process_low_confidence_is_not_found() {
    let temp = TempDir::new().unwrap();
    add_artist(temp.path(), "Cream", &[]);

    let catalog = FakeCatalog::new().with_candidates(
        "Cream",
        vec![mmn_news::models::ArtistCandidate::new("Creamy", "c-id", 40)],
    );
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let summary = orchestrator
        .run::<Vec<u8>>(temp.path(), None)
        .await
        .unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].kind, "ArtistNotFound");
    assert!(catalog.browses().is_empty());
}

#[tokio::test]
async fn test_process_artist_without_releases() {
    let temp = TempDir::new().unwrap();
    add_artist(temp.path(), "Obscure", &["Tape"]);

    let catalog = FakeCatalog::new().with_artist("Obscure", "o-id");
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let mut writer = InterchangeWriter::new(Vec::new());
    let summary = orchestrator
        .run(temp.path(), Some(&mut writer))
        .await
        .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.missing_releases, 0);
    assert_eq!(writer.rows_written(), 0);
}

#[tokio::test]
async fn test_process_missing_album_folder_fails() {
    let temp = TempDir::new().unwrap();
    let catalog = FakeCatalog::new();
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let result = orchestrator
        .run::<Vec<u8>>(&temp.path().join("missing"), None)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_export_header_once_and_buckets() {
    let temp = TempDir::new().unwrap();
    let beatles = add_artist(temp.path(), "Beatles", &["Abbey Road", "Let It Be"]);
    write_artist_toml(&beatles, "[musicNews]\nexcludes = [\"Help!\"]\n");
    add_artist(temp.path(), "Queen", &["Jazz"]);

    let catalog = beatles_catalog()
        .with_artist("Queen", "q-id")
        .with_release("q-id", "Jazz", "1978-11-10", "Album")
        .with_release("q-id", "Live Killers", "", "Live");
    let settings = test_settings();
    let orchestrator = Orchestrator::new(&catalog, &settings);

    let mut writer = InterchangeWriter::new(Vec::new());
    orchestrator
        .run(temp.path(), Some(&mut writer))
        .await
        .unwrap();
    let bytes = writer.finish().unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();

    assert_eq!(text.matches("SEP=;").count(), 1);
    assert_eq!(text.matches("\"artist\";\"title\"").count(), 1);

    let parsed = read_rows(Cursor::new(bytes)).unwrap();
    assert_eq!(parsed.rejected, 0);
    assert_eq!(parsed.rows.len(), 6);

    let status_of = |artist: &str, title: &str| {
        parsed
            .rows
            .iter()
            .find(|r| r.artist == artist && r.title == title)
            .map(|r| r.status)
    };
    assert_eq!(status_of("Beatles", "Abbey Road"), Some(ReleaseStatus::Found));
    assert_eq!(status_of("Beatles", "Help!"), Some(ReleaseStatus::Excluded));
    assert_eq!(status_of("Beatles", "1"), Some(ReleaseStatus::NotFound));
    assert_eq!(status_of("Queen", "Live Killers"), Some(ReleaseStatus::NotFound));

    let live = parsed.rows.iter().find(|r| r.title == "Live Killers").unwrap();
    assert_eq!(live.release_date, None);
    assert_eq!(live.category, "Live");
}
