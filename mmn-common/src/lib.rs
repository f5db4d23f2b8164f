//! # MMN Common Library
//!
//! Shared code for the music news tools including:
//! - Error type used across crates
//! - Application configuration loading and atomic TOML writes
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
