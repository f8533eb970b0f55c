//! Derived display values: glyphs, formatted local times, card rows and the
//! chart series. Pure functions of the stored records, no business logic.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::model::{CurrentWeather, Forecast};

/// Pictogram for the hero panel, chosen from the primary condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGlyph {
    Sun,
    Moon,
    Cloud,
    Rain,
    Snow,
    Fog,
    Wind,
}

impl WeatherGlyph {
    /// Clear skies render as sun or moon depending on whether the
    /// observation falls between sunrise and sunset.
    pub fn for_weather(weather: &CurrentWeather) -> Self {
        let is_day = weather.observed_at >= weather.sunrise && weather.observed_at < weather.sunset;

        match weather.condition.to_lowercase().as_str() {
            "clear" if is_day => Self::Sun,
            "clear" => Self::Moon,
            "clouds" => Self::Cloud,
            "rain" | "drizzle" => Self::Rain,
            "snow" => Self::Snow,
            "mist" | "fog" | "haze" => Self::Fog,
            _ => Self::Wind,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☽",
            Self::Cloud => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Fog => "≈",
            Self::Wind => "≫",
        }
    }
}

fn place_offset(timezone_offset_secs: i32) -> FixedOffset {
    FixedOffset::east_opt(timezone_offset_secs).unwrap_or_else(|| Utc.fix())
}

/// Day name and clock for the hero panel, in the place's local time.
pub fn local_day_and_time(at: DateTime<Utc>, timezone_offset_secs: i32) -> (String, String) {
    let local = at.with_timezone(&place_offset(timezone_offset_secs));
    (
        local.format("%A").to_string(),
        local.format("%I:%M %p").to_string(),
    )
}

/// Clock string for sunrise/sunset cards, in the place's local time.
pub fn local_clock(at: DateTime<Utc>, timezone_offset_secs: i32) -> String {
    at.with_timezone(&place_offset(timezone_offset_secs))
        .format("%I:%M %p")
        .to_string()
}

/// The six condition cards of the dashboard, as label/value pairs.
pub fn card_rows(weather: &CurrentWeather) -> Vec<(&'static str, String)> {
    let tz = weather.timezone_offset_secs;
    vec![
        ("Sunrise", local_clock(weather.sunrise, tz)),
        ("Sunset", local_clock(weather.sunset, tz)),
        ("Wind", format!("{:.0} km/h", weather.wind_speed_mps * 3.6)),
        ("Humidity", format!("{}%", weather.humidity_pct)),
        ("Feels Like", format!("{}°C", weather.feels_like_c.round() as i64)),
        (
            "Visibility",
            match weather.visibility_m {
                Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
                None => "n/a".to_string(),
            },
        ),
    ]
}

/// One column of the temperature chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Local clock label for the forecast step, e.g. "15:00".
    pub label: String,
    pub temperature_c: f64,
}

/// Shape the forecast into a chart series: the first `min(max_points, len)`
/// points, labelled with the place-local clock and rounded to whole degrees.
pub fn chart_series(
    forecast: &Forecast,
    timezone_offset_secs: i32,
    max_points: usize,
) -> Vec<ChartPoint> {
    let offset = place_offset(timezone_offset_secs);

    forecast
        .points
        .iter()
        .take(max_points)
        .map(|p| ChartPoint {
            label: p.at.with_timezone(&offset).format("%H:%M").to_string(),
            temperature_c: p.temperature_c.round(),
        })
        .collect()
}
