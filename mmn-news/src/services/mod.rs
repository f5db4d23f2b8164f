//! Service modules for collection reconciliation
//!
//! Leaf-first: sanitizer, remote catalog access, artist resolution,
//! release fetching, classification, preference persistence, local
//! enumeration, and the report/interchange sinks.

pub mod artist_resolver;
pub mod catalog;
pub mod classifier;
pub mod interchange;
pub mod local_library;
pub mod musicbrainz_client;
pub mod preference_store;
pub mod release_fetcher;
pub mod report;
pub mod sanitizer;

pub use artist_resolver::ArtistResolver;
pub use catalog::{ReleaseCatalog, RemoteReleaseGroup};
pub use interchange::InterchangeWriter;
pub use musicbrainz_client::MusicBrainzClient;
pub use sanitizer::sanitize;
