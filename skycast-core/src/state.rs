use crate::model::{CurrentWeather, Forecast};

/// Session-scoped shared location state: the search text plus the last
/// successfully fetched weather and forecast records.
///
/// Any component may read; mutation goes through the search controller's
/// transition functions only (the commit methods are crate-private), which
/// keeps the single-writer discipline and the last-good-value policy in one
/// place. Both records start empty and are only ever replaced together by a
/// fully successful paired fetch.
#[derive(Debug, Default, Clone)]
pub struct AppLocationState {
    query: String,
    weather: Option<CurrentWeather>,
    forecast: Option<Forecast>,
}

impl AppLocationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The place query text as last typed or selected. Never cleared
    /// automatically.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Most recently fetched current conditions, if any fetch has succeeded.
    pub fn weather(&self) -> Option<&CurrentWeather> {
        self.weather.as_ref()
    }

    /// Most recently fetched forecast, if any fetch has succeeded.
    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub(crate) fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Commit a successful paired fetch. Failure paths never call this.
    pub(crate) fn commit_records(&mut self, weather: CurrentWeather, forecast: Forecast) {
        self.weather = Some(weather);
        self.forecast = Some(forecast);
    }
}
