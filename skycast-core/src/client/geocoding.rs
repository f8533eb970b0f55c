use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    client::{SuggestionSource, truncate_body},
    error::SuggestionFetchError,
    model::Suggestion,
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// OpenWeather direct-geocoding adapter, used for place-name autocomplete.
#[derive(Debug, Clone)]
pub struct GeoDirectClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeoDirectClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different base URL, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    country: String,
}

#[async_trait]
impl SuggestionSource for GeoDirectClient {
    async fn fetch_suggestions(
        &self,
        partial: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, SuggestionFetchError> {
        let url = format!("{}/direct", self.base_url);
        debug!(%url, %partial, limit, "fetching place suggestions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", partial),
                ("limit", &limit.to_string()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(SuggestionFetchError::Provider {
                status,
                body: truncate_body(&body),
            });
        }

        // Zero matches comes back as an empty JSON array, not an error.
        let entries: Vec<GeoEntry> = serde_json::from_str(&body)?;

        Ok(entries
            .into_iter()
            .map(|e| Suggestion {
                name: e.name,
                country: e.country,
            })
            .collect())
    }
}
