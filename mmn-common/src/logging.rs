//! Tracing subscriber setup
//!
//! Console output always; an optional plain-text file layer when the
//! configuration names a log file or log directory.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides `config.level` when set. Returns the log file path
/// actually opened, if any.
pub fn init_tracing(config: &LoggingConfig, program: &str) -> Result<Option<PathBuf>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", config.level, e)))?,
    };

    let (file_layer, log_path) = match &config.file {
        Some(target) => {
            let path = resolve_log_file(target, program);
            let file = open_log_file(&path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Tracing already initialized: {}", e)))?;

    Ok(log_path)
}

/// Map a configured log target to a concrete file
///
/// A directory receives `<program>_<YYYYmmddHHMMSS>.log`; anything else is
/// used as the file path itself.
pub fn resolve_log_file(target: &Path, program: &str) -> PathBuf {
    if target.is_dir() {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        target.join(format!("{}_{}.log", program, stamp))
    } else {
        target.to_path_buf()
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
