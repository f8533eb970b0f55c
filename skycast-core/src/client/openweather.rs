use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    client::{WeatherDataSource, truncate_body},
    error::DataFetchError,
    model::{CurrentWeather, Forecast, ForecastPoint},
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather adapter for current conditions and the 5-day/3-hour forecast.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
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

    async fn get_json(&self, endpoint: &str, place: &str) -> Result<String, DataFetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, %place, "fetching from weather provider");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", place),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(DataFetchError::Provider {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentWeather {
    type Error = DataFetchError;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        let primary = raw.weather.first().ok_or(DataFetchError::EmptyResponse)?;

        Ok(CurrentWeather {
            place_name: raw.name,
            country: raw.sys.country,
            timezone_offset_secs: raw.timezone,
            observed_at: unix_to_utc(raw.dt).unwrap_or_else(Utc::now),
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
            visibility_m: raw.visibility,
            condition: primary.main.clone(),
            condition_description: primary.description.clone(),
            sunrise: unix_to_utc(raw.sys.sunrise).unwrap_or_else(Utc::now),
            sunset: unix_to_utc(raw.sys.sunset).unwrap_or_else(Utc::now),
        })
    }
}

#[async_trait]
impl WeatherDataSource for OpenWeatherClient {
    async fn fetch_current_weather(&self, place: &str) -> Result<CurrentWeather, DataFetchError> {
        let body = self.get_json("weather", place).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.try_into()
    }

    async fn fetch_forecast(&self, place: &str) -> Result<Forecast, DataFetchError> {
        let body = self.get_json("forecast", place).await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let points = parsed
            .list
            .into_iter()
            .map(|entry| ForecastPoint {
                at: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                temperature_c: entry.main.temp,
            })
            .collect();

        Ok(Forecast { points })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CURRENT: &str = r#"{
        "name": "London",
        "dt": 1727000000,
        "timezone": 3600,
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 62},
        "weather": [{"main": "Clouds", "description": "scattered clouds"}],
        "wind": {"speed": 4.1},
        "visibility": 10000,
        "sys": {"country": "GB", "sunrise": 1726980000, "sunset": 1727024000}
    }"#;

    #[test]
    fn current_response_maps_into_domain_model() {
        let raw: OwCurrentResponse = serde_json::from_str(SAMPLE_CURRENT).expect("should parse");
        let weather = CurrentWeather::try_from(raw).expect("should convert");

        assert_eq!(weather.place_name, "London");
        assert_eq!(weather.country, "GB");
        assert_eq!(weather.timezone_offset_secs, 3600);
        assert_eq!(weather.humidity_pct, 62);
        assert_eq!(weather.visibility_m, Some(10000));
        assert_eq!(weather.condition, "Clouds");
        assert_eq!(weather.condition_description, "scattered clouds");
        assert_eq!(weather.sunrise.timestamp(), 1726980000);
    }

    #[test]
    fn missing_visibility_is_tolerated() {
        let body = SAMPLE_CURRENT.replace(r#""visibility": 10000,"#, "");
        let raw: OwCurrentResponse = serde_json::from_str(&body).expect("should parse");
        let weather = CurrentWeather::try_from(raw).expect("should convert");
        assert_eq!(weather.visibility_m, None);
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let body = SAMPLE_CURRENT.replace(
            r#"[{"main": "Clouds", "description": "scattered clouds"}]"#,
            "[]",
        );
        let raw: OwCurrentResponse = serde_json::from_str(&body).expect("should parse");
        let err = CurrentWeather::try_from(raw).unwrap_err();
        assert!(matches!(err, DataFetchError::EmptyResponse));
    }

    #[test]
    fn forecast_entries_keep_order() {
        let body = r#"{"list": [
            {"dt": 100, "main": {"temp": 10.0}},
            {"dt": 200, "main": {"temp": 11.5}},
            {"dt": 300, "main": {"temp": 9.0}}
        ]}"#;
        let parsed: OwForecastResponse = serde_json::from_str(body).expect("should parse");
        assert_eq!(parsed.list.len(), 3);
        assert_eq!(parsed.list[1].dt, 200);
        assert!((parsed.list[2].main.temp - 9.0).abs() < f64::EPSILON);
    }
}
