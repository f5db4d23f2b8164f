//! mmn-news library interface
//!
//! Reconciles a local music collection (one folder per artist, one
//! sub-folder per release) against the MusicBrainz catalog and reports
//! missing releases. Users teach it to ignore releases by editing an exported
//! interchange file and feeding it back through the update workflow.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{NewsError, NewsResult, NotFoundReason};
