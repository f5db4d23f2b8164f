//! Test Helper Utilities
//!
//! Shared utilities for testing mmn-news

#![allow(dead_code)]

pub mod fake_catalog;
pub mod library;

pub use fake_catalog::FakeCatalog;
pub use library::{add_artist, test_settings, write_artist_toml};
