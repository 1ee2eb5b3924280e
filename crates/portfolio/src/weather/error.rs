//! Weather lookup error types.

use thiserror::Error;

/// User-facing message when no API key is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Weather service not configured";

/// User-facing message for every other failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API key not configured")]
    NotConfigured,

    #[error("Invalid weather API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Weather API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WeatherError {
    /// The message shown to users; details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_hide_details() {
        assert_eq!(
            WeatherError::NotConfigured.user_message(),
            "Weather service not configured"
        );
        let api = WeatherError::Api {
            status: 403,
            message: "API key has been disabled.".to_string(),
        };
        assert_eq!(api.user_message(), "Failed to fetch weather data");
        assert_eq!(
            WeatherError::Http("reset".to_string()).user_message(),
            "Failed to fetch weather data"
        );
    }
}
