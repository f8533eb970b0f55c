use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one place, as resolved by the weather provider.
///
/// Always reflects the most recent *successful* fetch; a failed fetch never
/// replaces a stored value (last-good-value policy, enforced by the search
/// controller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub place_name: String,
    pub country: String,
    /// Offset of the place's local time from UTC, in seconds.
    pub timezone_offset_secs: i32,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Reported visibility in metres; the provider omits it in some regions.
    pub visibility_m: Option<u32>,
    /// Primary condition group, e.g. "Clear", "Clouds", "Rain".
    pub condition: String,
    /// Longer condition text, e.g. "scattered clouds".
    pub condition_description: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One step of the multi-point forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub at: DateTime<Utc>,
    pub temperature_c: f64,
}

/// Ordered forecast sequence for one place. The full parsed list is kept;
/// truncation for charting happens in the display layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
}

/// A candidate place returned by the autocomplete provider. Transient: lives
/// in the search controller only and is never stored in the location state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub country: String,
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}
