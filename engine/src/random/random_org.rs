use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use super::{parse_fraction, RandomnessSource};
use crate::error::BattleError;

/// One two-decimal fraction, plain text.
pub const DEFAULT_RANDOM_ORG_URL: &str =
    "https://www.random.org/decimal-fractions/?num=1&dec=2&col=1&format=plain&rnd=new";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomOrgConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RandomOrgConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RANDOM_ORG_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RandomOrgConfig {
    /// Reads `RANDOM_ORG_URL` and `RANDOM_ORG_TIMEOUT_SECS`, falling back to
    /// the defaults when unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("RANDOM_ORG_URL").unwrap_or(defaults.url);
        let timeout = std::env::var("RANDOM_ORG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        Self { url, timeout }
    }
}

/// Fetches draws from random.org. No retries, no caching, no local fallback.
#[derive(Clone)]
pub struct RandomOrgClient {
    client: Client,
    url: String,
}

impl RandomOrgClient {
    pub fn new(config: RandomOrgConfig) -> Result<Self, BattleError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BattleError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url,
        })
    }

    pub fn from_env() -> Result<Self, BattleError> {
        Self::new(RandomOrgConfig::from_env())
    }
}

fn transport_error(e: reqwest::Error) -> BattleError {
    if e.is_timeout() {
        error!("Request to random.org timed out.");
        BattleError::Unavailable("Request to random.org timed out.".to_string())
    } else {
        error!("Request to random.org failed: {}", e);
        BattleError::Unavailable(format!("Request to random.org failed: {}", e))
    }
}

#[async_trait]
impl RandomnessSource for RandomOrgClient {
    async fn draw(&self) -> Result<f64, BattleError> {
        info!("Fetching random number from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport_error)?;
        let body = response.text().await.map_err(transport_error)?;

        let value = parse_fraction(&body).inspect_err(|_| {
            error!("Invalid response from random.org: {}", body.trim());
        })?;
        info!("Received random number: {:.3}", value);
        Ok(value)
    }
}
