//! MusicBrainz API client
//!
//! Implements [`ReleaseCatalog`] against the MusicBrainz web service:
//! - artist search: `GET {base}/artist/?query=..&fmt=json`
//! - release group browse: `GET {base}/release-group?artist=..&type=..&fmt=json`
//!   paged 100 at a time until `release-group-count` rows are collected
//!
//! Every HTTP call goes through a minimum-interval rate limiter
//! (1 request/second, the MusicBrainz policy for identified clients).

use crate::error::{NewsError, NewsResult};
use crate::models::{ArtistCandidate, ReleaseTypeFilter};
use crate::services::catalog::{ReleaseCatalog, RemoteReleaseGroup};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Identification sent when the configuration provides none
pub const DEFAULT_USER_AGENT: &str =
    concat!("mmn-news/", env!("CARGO_PKG_VERSION"), " ( local collection report )");

const RATE_LIMIT_MS: u64 = 1000;
const PAGE_SIZE: usize = 100;

/// Artist search response
#[derive(Debug, Deserialize)]
struct MBArtistSearch {
    #[serde(default)]
    artists: Vec<MBArtist>,
}

#[derive(Debug, Deserialize)]
struct MBArtist {
    id: String,
    name: String,
    #[serde(default)]
    score: MBScore,
}

/// Search score: an integer in the JSON API, a string in older responses
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MBScore {
    Number(u32),
    Text(String),
}

impl Default for MBScore {
    fn default() -> Self {
        MBScore::Number(0)
    }
}

impl MBScore {
    fn value(&self) -> u32 {
        match self {
            MBScore::Number(n) => *n,
            MBScore::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

/// Release group browse response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MBReleaseGroupBrowse {
    #[serde(default)]
    release_group_count: usize,
    #[serde(default)]
    release_groups: Vec<MBReleaseGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MBReleaseGroup {
    id: String,
    title: String,
    #[serde(default)]
    first_release_date: Option<String>,
    #[serde(default)]
    primary_type: Option<String>,
    #[serde(default)]
    secondary_types: Vec<String>,
}

impl MBReleaseGroup {
    /// Single type label: Compilation and Live secondary types win over the primary type
    fn release_type(&self) -> String {
        if self.secondary_types.iter().any(|t| t == "Compilation") {
            "Compilation".to_string()
        } else if self.secondary_types.iter().any(|t| t == "Live") {
            "Live".to_string()
        } else {
            self.primary_type.clone().unwrap_or_default()
        }
    }
}

impl From<MBReleaseGroup> for RemoteReleaseGroup {
    fn from(rg: MBReleaseGroup) -> Self {
        let release_type = rg.release_type();
        RemoteReleaseGroup {
            title: rg.title,
            first_release_date: rg.first_release_date.unwrap_or_default(),
            release_type,
            remote_id: rg.id,
        }
    }
}

/// Minimum interval between consecutive requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl MusicBrainzClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> NewsResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| NewsError::RemoteUnavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(Duration::from_millis(RATE_LIMIT_MS)),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> NewsResult<T> {
        self.rate_limiter.wait().await;

        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(url = %url, ?query, "Querying MusicBrainz API");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| NewsError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(NewsError::RemoteUnavailable("rate limit exceeded (503)".to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NewsError::RemoteUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NewsError::RemoteUnavailable(e.to_string()))?;

        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> NewsResult<T> {
    serde_json::from_str(body)
        .map_err(|e| NewsError::RemoteUnavailable(format!("unexpected response: {}", e)))
}

#[async_trait::async_trait]
impl ReleaseCatalog for MusicBrainzClient {
    async fn search_artists(&self, name: &str) -> NewsResult<Vec<ArtistCandidate>> {
        let search: MBArtistSearch = self
            .get_json("artist/", &[("query", name.to_string()), ("fmt", "json".to_string())])
            .await?;

        tracing::debug!(name = %name, results = search.artists.len(), "Artist search complete");

        Ok(search
            .artists
            .into_iter()
            .map(|a| {
                let score = a.score.value();
                ArtistCandidate::new(a.name, a.id, score)
            })
            .collect())
    }

    async fn artist_release_groups(
        &self,
        artist_id: &str,
        filter: ReleaseTypeFilter,
    ) -> NewsResult<Vec<RemoteReleaseGroup>> {
        let mut collected = Vec::new();

        loop {
            let page: MBReleaseGroupBrowse = self
                .get_json(
                    "release-group",
                    &[
                        ("artist", artist_id.to_string()),
                        ("type", filter.remote_type().to_string()),
                        ("fmt", "json".to_string()),
                        ("limit", PAGE_SIZE.to_string()),
                        ("offset", collected.len().to_string()),
                    ],
                )
                .await?;

            let received = page.release_groups.len();
            let total = page.release_group_count;
            collected.extend(page.release_groups.into_iter().map(RemoteReleaseGroup::from));

            if received == 0 || collected.len() >= total {
                break;
            }
        }

        tracing::debug!(
            artist_id = %artist_id,
            filter = %filter,
            count = collected.len(),
            "Fetched release groups"
        );

        Ok(collected)
    }
}
