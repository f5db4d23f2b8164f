//! Data models for collection reconciliation

pub mod artist;
pub mod classification;
pub mod preferences;
pub mod release;

pub use artist::{ArtistCandidate, LocalArtist};
pub use classification::{Classification, InterchangeRow, ReleaseStatus};
pub use preferences::Preferences;
pub use release::{ReleaseCategory, ReleaseGroup, ReleaseTypeFilter};
