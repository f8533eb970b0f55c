//! Terminal rendering of the dashboard: hero panel, condition cards and the
//! temperature chart. Reads state, never mutates it.

use skycast_core::SearchController;
use skycast_core::display::{self, ChartPoint, WeatherGlyph};
use skycast_core::model::CurrentWeather;

const CHART_BAR_WIDTH: usize = 40;

pub fn render(controller: &SearchController, chart_points: usize) {
    println!();

    if let Some(msg) = controller.error_message() {
        println!("  ! {msg}");
        println!();
    }

    let state = controller.state();
    let Some(weather) = state.weather() else {
        println!("  Weather data not available");
        return;
    };

    for line in hero_lines(weather) {
        println!("  {line}");
    }
    println!();

    for line in card_lines(weather) {
        println!("  {line}");
    }

    if let Some(forecast) = state.forecast() {
        let series = display::chart_series(forecast, weather.timezone_offset_secs, chart_points);
        if !series.is_empty() {
            println!();
            println!("  Temperature Forecast");
            for line in chart_lines(&series) {
                println!("  {line}");
            }
        }
    }
    println!();
}

fn hero_lines(weather: &CurrentWeather) -> Vec<String> {
    let (day, time) = display::local_day_and_time(weather.observed_at, weather.timezone_offset_secs);
    let glyph = WeatherGlyph::for_weather(weather).symbol();

    vec![
        format!("{glyph}  {}, {}", weather.place_name, weather.country),
        format!("   {day} {time}"),
        format!(
            "   {}°C  {}",
            weather.temperature_c.round() as i64,
            weather.condition_description
        ),
    ]
}

fn card_lines(weather: &CurrentWeather) -> Vec<String> {
    display::card_rows(weather)
        .into_iter()
        .map(|(label, value)| format!("{label:<12}{value}"))
        .collect()
}

/// One horizontal bar per forecast point, scaled between the series extremes.
fn chart_lines(series: &[ChartPoint]) -> Vec<String> {
    let min = series
        .iter()
        .map(|p| p.temperature_c)
        .fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.temperature_c)
        .fold(f64::NEG_INFINITY, f64::max);

    series
        .iter()
        .map(|p| {
            let bar = "█".repeat(bar_len(p.temperature_c, min, max, CHART_BAR_WIDTH));
            format!("{}  {:>4}°  {bar}", p.label, p.temperature_c.round() as i64)
        })
        .collect()
}

/// Map a temperature onto 1..=width relative to the series extremes. A flat
/// series renders full-width bars.
fn bar_len(temp: f64, min: f64, max: f64, width: usize) -> usize {
    let span = max - min;
    if span <= f64::EPSILON {
        return width;
    }
    let scaled = (temp - min) / span * (width - 1) as f64;
    1 + scaled.round() as usize
}
