use crate::{
    Config,
    error::{DataFetchError, SuggestionFetchError},
    model::{CurrentWeather, Forecast, Suggestion},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod geocoding;
pub mod openweather;

pub use geocoding::GeoDirectClient;
pub use openweather::OpenWeatherClient;

/// Source of current-weather and forecast data for a named place.
///
/// Both calls are independent: independent requests, independent failures.
/// Implementations perform no retries and no caching; every call hits the
/// provider directly.
#[async_trait]
pub trait WeatherDataSource: Send + Sync + Debug {
    async fn fetch_current_weather(&self, place: &str) -> Result<CurrentWeather, DataFetchError>;

    async fn fetch_forecast(&self, place: &str) -> Result<Forecast, DataFetchError>;
}

/// Source of autocomplete candidates for a partial place name.
///
/// The caller is responsible for the length-gating policy (only querying for
/// inputs longer than two characters); it is not enforced here.
#[async_trait]
pub trait SuggestionSource: Send + Sync + Debug {
    /// Returns an empty list rather than failing when the provider has no
    /// matches for `partial`.
    async fn fetch_suggestions(
        &self,
        partial: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, SuggestionFetchError>;
}

/// Construct both client adapters from config. One API key serves both the
/// weather/forecast endpoints and the geocoding endpoint.
pub fn clients_from_config(
    config: &Config,
) -> anyhow::Result<(OpenWeatherClient, GeoDirectClient)> {
    let api_key = config.resolved_api_key()?;
    Ok((
        OpenWeatherClient::new(api_key.clone()),
        GeoDirectClient::new(api_key),
    ))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    // Cut on a char boundary; provider error bodies can carry non-ASCII text.
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
