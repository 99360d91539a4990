//! GBIF species API client
//!
//! Two read endpoints of the GBIF backbone taxonomy:
//! `/species/match` (scientific name -> usageKey, strict matching) and
//! `/species/{usageKey}` (usageKey -> taxonomic detail).
//!
//! Failures here are recoverable by policy: callers substitute an
//! unresolved sentinel and carry on, so a GBIF outage degrades the run
//! to placeholder taxonomy entries instead of aborting it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const USER_AGENT: &str = "exabase-im/0.1.0 (specimen collection importer)";
const RATE_LIMIT_MS: u64 = 200; // courtesy spacing between GBIF requests

/// GBIF client errors
#[derive(Debug, Error)]
pub enum GbifError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Response body of `/species/match`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeciesMatchResponse {
    /// usageKey of the matched backbone taxon; absent when strict
    /// matching found nothing
    #[serde(rename = "usageKey")]
    pub usage_key: Option<i64>,
    #[serde(rename = "matchType")]
    pub match_type: Option<String>,
}

/// Response body of `/species/{usageKey}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NameUsageResponse {
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "canonicalName")]
    pub canonical_name: Option<String>,
    pub authorship: Option<String>,
    #[serde(rename = "scientificName")]
    pub scientific_name: Option<String>,
    pub rank: Option<String>,
}

/// Taxonomic detail for one backbone taxon, as stored locally.
///
/// The backbone has no subfamily/tribe/subgenus in this response shape,
/// so those columns stay empty even for resolved entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonDetail {
    pub order: String,
    pub family: String,
    pub genus: String,
    pub species: String,
    pub canonical_name: String,
    pub authorship: String,
    pub scientific_name: String,
    pub rank: String,
    pub is_in_gbif: i64,
}

impl TaxonDetail {
    /// Sentinel detail for a usageKey whose detail fetch failed
    pub fn unresolved() -> Self {
        Self {
            order: "NA".to_string(),
            family: "NA".to_string(),
            genus: "NA".to_string(),
            species: "NA".to_string(),
            canonical_name: "NA".to_string(),
            authorship: "NA".to_string(),
            scientific_name: "NA".to_string(),
            rank: "NA".to_string(),
            is_in_gbif: 0,
        }
    }
}

impl From<NameUsageResponse> for TaxonDetail {
    fn from(usage: NameUsageResponse) -> Self {
        Self {
            order: usage.order.unwrap_or_default(),
            family: usage.family.unwrap_or_default(),
            genus: usage.genus.unwrap_or_default(),
            species: usage.species.unwrap_or_default(),
            canonical_name: usage.canonical_name.unwrap_or_default(),
            authorship: usage.authorship.unwrap_or_default(),
            scientific_name: usage.scientific_name.unwrap_or_default(),
            rank: usage.rank.unwrap_or_default(),
            is_in_gbif: 1,
        }
    }
}

/// Rate limiter spacing requests to the GBIF API
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the request spacing
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("GBIF rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// GBIF species API client
pub struct GbifClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
}

impl GbifClient {
    /// Client against the API at `base_url` (the config default is the
    /// public GBIF v1 endpoint)
    pub fn new(base_url: String) -> Result<Self, GbifError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GbifError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
            base_url,
        })
    }

    /// Match a scientific name against the backbone taxonomy
    ///
    /// Strict matching: `Ok(None)` means GBIF answered but found no
    /// exact backbone taxon for the name.
    pub async fn match_name(&self, name: &str) -> Result<Option<String>, GbifError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/species/match", self.base_url);

        tracing::debug!(name = %name, url = %url, "Querying GBIF species match");

        let response = self
            .http_client
            .get(&url)
            .query(&[("name", name), ("strict", "true")])
            .send()
            .await
            .map_err(|e| GbifError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GbifError::ApiError(status.as_u16(), error_text));
        }

        let matched: SpeciesMatchResponse = response
            .json()
            .await
            .map_err(|e| GbifError::ParseError(e.to_string()))?;

        match matched.usage_key {
            Some(key) => {
                tracing::info!(name = %name, usage_key = key, "Matched name in GBIF backbone");
                Ok(Some(key.to_string()))
            }
            None => {
                tracing::info!(name = %name, "No strict GBIF match for name");
                Ok(None)
            }
        }
    }

    /// Fetch taxonomic detail for a backbone usageKey
    pub async fn species_detail(&self, usage_key: &str) -> Result<TaxonDetail, GbifError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/species/{}", self.base_url, usage_key);

        tracing::debug!(usage_key = %usage_key, url = %url, "Querying GBIF species detail");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GbifError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GbifError::ApiError(status.as_u16(), error_text));
        }

        let usage: NameUsageResponse = response
            .json()
            .await
            .map_err(|e| GbifError::ParseError(e.to_string()))?;

        tracing::info!(
            usage_key = %usage_key,
            canonical_name = %usage.canonical_name.as_deref().unwrap_or("Unknown"),
            "Retrieved species detail from GBIF"
        );

        Ok(TaxonDetail::from(usage))
    }
}
