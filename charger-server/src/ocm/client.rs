//! Open Charge Map HTTP client.

use crate::domain::CountryCode;

use super::error::OcmError;
use super::types::Poi;

/// Default base URL for the Open Charge Map POI API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3/poi";

/// Default maximum results per country request.
const DEFAULT_MAX_RESULTS: u32 = 1000;

/// Configuration for the Open Charge Map client.
#[derive(Debug, Clone)]
pub struct OcmConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum results per country request
    pub max_results: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OcmConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the maximum results per country request.
    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Open Charge Map POI API.
#[derive(Debug, Clone)]
pub struct OcmClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl OcmClient {
    /// Create a new Open Charge Map client.
    pub fn new(config: OcmConfig) -> Result<Self, OcmError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            max_results: config.max_results,
        })
    }

    /// Fetch all POIs for a country.
    ///
    /// Requests the full (non-compact) record shape so the status and
    /// address details are inline, avoiding per-record detail fetches.
    pub async fn fetch_pois(&self, country: CountryCode) -> Result<Vec<Poi>, OcmError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("countrycode", country.as_str()),
                ("maxresults", &self.max_results.to_string()),
                ("compact", "false"),
                ("verbose", "false"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OcmError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let pois: Vec<Poi> = serde_json::from_str(&body).map_err(|e| OcmError::Json {
            message: e.to_string(),
        })?;

        Ok(pois)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OcmConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_results, 1000);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = OcmConfig::new("test-api-key")
            .with_base_url("http://localhost:8080/poi")
            .with_max_results(50)
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080/poi");
        assert_eq!(config.max_results, 50);
        assert_eq!(config.timeout_secs, 5);
    }
}
