//! Weather response shapes.

use serde::{Deserialize, Serialize};

use super::error::WeatherError;

/// Current conditions for the sidebar widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Condition icon URL, possibly protocol-relative.
    pub weather_icon: String,
    pub location: String,
    /// Local wall-clock time, `HH:MM`, 24-hour.
    pub time: String,
}

/// Either data or a user-facing error message, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub data: Option<WeatherData>,
    pub error: Option<String>,
}

impl WeatherResponse {
    pub fn success(data: WeatherData) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: &WeatherError) -> Self {
        Self {
            data: None,
            error: Some(error.user_message().to_string()),
        }
    }
}

/// Subset of the weather API's `current.json` body that the widget uses.
#[derive(Debug, Default, Deserialize)]
pub struct RawWeather {
    pub current: Option<RawCurrent>,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
pub struct RawCurrent {
    pub temp_c: Option<f64>,
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    pub name: Option<String>,
}
