//! Configuration loading and TOML persistence
//!
//! The application TOML is read into [`TomlConfig`] with every default applied
//! at load time, so call sites never check for optional keys.
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `MMN_CONFIG` environment variable
//! 3. `<config_dir>/mmn-news/config.toml` when it exists
//! 4. Compiled defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MMN_CONFIG";

/// Default MusicBrainz web service root
pub const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2";

/// Application configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Remote catalog base URL
    pub musicbrainz_url: String,

    /// User-Agent sent to the remote catalog (MusicBrainz rejects anonymous clients)
    pub user_agent: Option<String>,

    /// Fixed wait after each artist that hit the remote catalog
    pub pacing_delay_secs: u64,

    /// Artist candidates must score strictly above this value
    pub confidence_threshold: u32,

    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            musicbrainz_url: DEFAULT_MUSICBRAINZ_URL.to_string(),
            user_agent: None,
            pacing_delay_secs: 5,
            confidence_threshold: 60,
            request_timeout_secs: 30,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file, or a directory that receives one timestamped file per run
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Locate the config file to load, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("mmn-news").join("config.toml"))
        .filter(|p| p.exists())
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file was named or found
    Defaults,
    /// A file was named but does not exist
    Missing(PathBuf),
    File(PathBuf),
}

impl ConfigSource {
    /// Report the source; call once tracing is initialized
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => debug!("No config file, using compiled defaults"),
            ConfigSource::Missing(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
            ConfigSource::File(path) => info!("Config: {}", path.display()),
        }
    }
}

/// Configuration plus its source
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: ConfigSource,
}

/// Load configuration from `path`, falling back to defaults
///
/// A missing file is not fatal: defaults are used and the returned source is
/// [`ConfigSource::Missing`]. Loading runs before the log subscriber exists,
/// so nothing is logged here. A file that exists but does not parse is a
/// configuration error.
pub fn load_toml_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Defaults,
        });
    };

    if !path.exists() {
        return Ok(LoadedConfig {
            config: TomlConfig::default(),
            source: ConfigSource::Missing(path.to_path_buf()),
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

/// Serialize any TOML document and replace `path` atomically
///
/// The document is written to `<path>.tmp` next to the target, flushed to
/// disk, then renamed over the target.
pub fn write_toml_document<T: Serialize>(document: &T, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(document)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    let temp_path = temp_path_for(path);
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }

    debug!("Wrote TOML document {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
