//! Run settings resolution for mmn-news
//!
//! Provides multi-tier resolution with CLI → ENV → TOML → default priority.
//! The TOML tier already carries compiled defaults (see
//! [`mmn_common::config::TomlConfig`]), so the last two tiers collapse into one.

use crate::models::ReleaseTypeFilter;
use crate::services::musicbrainz_client::DEFAULT_USER_AGENT;
use mmn_common::config::TomlConfig;
use std::time::Duration;
use tracing::{info, warn};

/// Environment override for the per-artist pacing delay
pub const PACING_DELAY_ENV_VAR: &str = "MMN_PACING_DELAY_SECS";

/// Environment override for the remote catalog base URL
pub const MUSICBRAINZ_URL_ENV_VAR: &str = "MMN_MUSICBRAINZ_URL";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub pacing_delay_secs: Option<u64>,
    pub category: Option<ReleaseTypeFilter>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub musicbrainz_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Wait after each artist that hit the remote catalog
    pub pacing_delay: Duration,
    pub confidence_threshold: u32,
    pub category: ReleaseTypeFilter,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::resolve(&TomlConfig::default(), &CliOverrides::default())
    }
}

impl RunSettings {
    pub fn resolve(toml_config: &TomlConfig, cli: &CliOverrides) -> Self {
        let pacing_delay_secs = resolve_pacing_delay(toml_config, cli);

        let musicbrainz_url = match env_value(MUSICBRAINZ_URL_ENV_VAR) {
            Some(url) => {
                info!("MusicBrainz URL loaded from environment variable");
                url
            }
            None => toml_config.musicbrainz_url.clone(),
        };

        let user_agent = toml_config
            .user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            musicbrainz_url,
            user_agent,
            request_timeout: Duration::from_secs(toml_config.request_timeout_secs),
            pacing_delay: Duration::from_secs(pacing_delay_secs),
            confidence_threshold: toml_config.confidence_threshold,
            category: cli.category.unwrap_or_default(),
        }
    }
}

fn resolve_pacing_delay(toml_config: &TomlConfig, cli: &CliOverrides) -> u64 {
    if let Some(secs) = cli.pacing_delay_secs {
        info!("Pacing delay {}s from command line", secs);
        return secs;
    }

    if let Some(raw) = env_value(PACING_DELAY_ENV_VAR) {
        match raw.parse::<u64>() {
            Ok(secs) => {
                info!("Pacing delay {}s from environment variable", secs);
                return secs;
            }
            Err(_) => warn!(
                "Ignoring {}={:?}: not a whole number of seconds",
                PACING_DELAY_ENV_VAR, raw
            ),
        }
    }

    toml_config.pacing_delay_secs
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var(PACING_DELAY_ENV_VAR);
        env::remove_var(MUSICBRAINZ_URL_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = RunSettings::default();
        assert_eq!(settings.pacing_delay, Duration::from_secs(5));
        assert_eq!(settings.confidence_threshold, 60);
        assert_eq!(settings.category, ReleaseTypeFilter::All);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(settings.musicbrainz_url, mmn_common::config::DEFAULT_MUSICBRAINZ_URL);
    }

    #[test]
    #[serial]
    fn test_cli_beats_env_beats_toml() {
        clear_env();
        let toml_config = TomlConfig {
            pacing_delay_secs: 9,
            ..Default::default()
        };

        env::set_var(PACING_DELAY_ENV_VAR, "3");
        let from_env = RunSettings::resolve(&toml_config, &CliOverrides::default());
        assert_eq!(from_env.pacing_delay, Duration::from_secs(3));

        let cli = CliOverrides {
            pacing_delay_secs: Some(0),
            category: Some(ReleaseTypeFilter::Live),
        };
        let from_cli = RunSettings::resolve(&toml_config, &cli);
        assert_eq!(from_cli.pacing_delay, Duration::ZERO);
        assert_eq!(from_cli.category, ReleaseTypeFilter::Live);

        env::remove_var(PACING_DELAY_ENV_VAR);
        let from_toml = RunSettings::resolve(&toml_config, &CliOverrides::default());
        assert_eq!(from_toml.pacing_delay, Duration::from_secs(9));
    }

    #[test]
    #[serial]
    fn test_invalid_env_delay_falls_back_to_toml() {
        clear_env();
        env::set_var(PACING_DELAY_ENV_VAR, "soon");

        let settings = RunSettings::resolve(&TomlConfig::default(), &CliOverrides::default());
        assert_eq!(settings.pacing_delay, Duration::from_secs(5));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_url_and_configured_user_agent() {
        clear_env();
        env::set_var(MUSICBRAINZ_URL_ENV_VAR, "http://localhost:8080/ws/2");
        let toml_config = TomlConfig {
            user_agent: Some("collector/1.0 ( me@example.com )".to_string()),
            ..Default::default()
        };

        let settings = RunSettings::resolve(&toml_config, &CliOverrides::default());
        assert_eq!(settings.musicbrainz_url, "http://localhost:8080/ws/2");
        assert_eq!(settings.user_agent, "collector/1.0 ( me@example.com )");

        clear_env();
    }
}
