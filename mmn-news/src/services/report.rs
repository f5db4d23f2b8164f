//! Human-readable per-artist report
//!
//! Missing releases are listed sorted by category. Albums get an arrow,
//! every other category is indented one level further:
//!
//! ```text
//!   - You DON'T have these albums
//!    -> Beatles - Let It Be as of 1970-05-08
//!       Beatles - 1 as of 2000-11-13
//! ```

use crate::models::{Classification, ReleaseGroup};

/// Heading printed above a non-empty missing list
pub const MISSING_HEADING: &str = "  - You DON'T have these albums";

/// One missing-release line
pub fn release_line(artist: &str, release: &ReleaseGroup) -> String {
    let prefix = if release.category().is_album() {
        "   -> "
    } else {
        "      "
    };

    let mut line = format!("{}{} - {}", prefix, artist, release.title());
    if let Some(date) = release.release_date() {
        line.push_str(" as of ");
        line.push_str(date);
    }
    line
}

/// Heading plus one line per missing release; empty when nothing is missing
pub fn missing_lines(artist: &str, classification: &Classification) -> Vec<String> {
    let missing = classification.not_found_for_display();
    if missing.is_empty() {
        return Vec::new();
    }

    std::iter::once(MISSING_HEADING.to_string())
        .chain(missing.into_iter().map(|rg| release_line(artist, rg)))
        .collect()
}

/// Emit the report for one artist through the log
pub fn log_artist_report(artist: &str, classification: &Classification) {
    for release in &classification.excluded {
        tracing::info!("  * Release {} skipped", release.title());
    }

    for line in missing_lines(artist, classification) {
        tracing::info!("{}", line);
    }
}
