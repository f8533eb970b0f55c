//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - HTTP client adapters for the weather and geocoding providers
//! - The shared location state and the search controller state machine
//! - Derived display values (glyphs, local times, chart series)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod search;
pub mod state;

pub use client::{GeoDirectClient, OpenWeatherClient, SuggestionSource, WeatherDataSource};
pub use config::Config;
pub use error::{DataFetchError, SuggestionFetchError};
pub use model::{CurrentWeather, Forecast, ForecastPoint, Suggestion};
pub use search::{SearchController, SearchPhase, SubmitTicket, SuggestionTicket};
pub use state::AppLocationState;
