//! Weather widget backend: current temperature, condition icon and local
//! time for one location.

mod client;
mod error;
mod types;

pub use client::{
    DEFAULT_LOCATION, DEFAULT_WEATHER_API_URL, WEATHER_CACHE_TTL, WeatherClient, sanitize_location,
};
pub use error::{FETCH_FAILED_MESSAGE, NOT_CONFIGURED_MESSAGE, WeatherError};
pub use types::{WeatherData, WeatherResponse};
