use thiserror::Error;

/// Failure while fetching current weather or the forecast.
///
/// Recovered locally by the caller: prior good records are preserved and a
/// transient message is shown. Never propagates to a crash.
#[derive(Debug, Error)]
pub enum DataFetchError {
    #[error("failed to reach the weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather provider response contained no usable data")]
    EmptyResponse,
}

/// Failure while fetching autocomplete candidates.
///
/// Recovered locally: the suggestion list is cleared and a transient message
/// is shown. Zero matches is NOT an error; the client returns an empty list.
#[derive(Debug, Error)]
pub enum SuggestionFetchError {
    #[error("failed to reach the geocoding provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoding provider returned status {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode geocoding provider response: {0}")]
    Decode(#[from] serde_json::Error),
}
