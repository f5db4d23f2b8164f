//! Workflows: process (forward) and update (preference import)

pub mod orchestrator;
pub mod preference_import;

pub use orchestrator::{ArtistFailure, Orchestrator, RunSummary};
pub use preference_import::{import_preferences, ImportSummary};
