//! Current-conditions lookup against a weatherapi.com-compatible endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::error::WeatherError;
use super::types::{RawWeather, WeatherData, WeatherResponse};
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};

/// Default `current.json` endpoint.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Location looked up when none is given.
pub const DEFAULT_LOCATION: &str = "Patra, Greece";

/// How long a successful lookup is reused for the same location.
pub const WEATHER_CACHE_TTL: StdDuration = StdDuration::from_secs(30 * 60);

/// Conditions as returned upstream, before the local time is stamped.
#[derive(Debug, Clone)]
struct Conditions {
    temperature: f64,
    weather_icon: String,
    location: String,
}

struct CachedConditions {
    conditions: Conditions,
    fetched_at: Instant,
}

/// Weather API client.
#[derive(Clone)]
pub struct WeatherClient {
    transport: Arc<dyn HttpTransport>,
    api_key: Option<String>,
    api_url: String,
    cache_ttl: StdDuration,
    cache: Arc<Mutex<HashMap<String, CachedConditions>>>,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>, timeout: StdDuration) -> Result<Self, WeatherError> {
        let transport =
            ReqwestTransport::new(timeout).map_err(|e| WeatherError::Http(e.to_string()))?;
        Ok(Self::new_with_transport(api_key, Arc::new(transport)))
    }

    pub fn new_with_transport(api_key: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_url: DEFAULT_WEATHER_API_URL.to_string(),
            cache_ttl: WEATHER_CACHE_TTL,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: StdDuration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions for `location`, as data or a user-facing error.
    pub async fn current(&self, location: &str) -> WeatherResponse {
        match self.try_current(location).await {
            Ok(data) => WeatherResponse::success(data),
            Err(WeatherError::NotConfigured) => {
                tracing::error!("Weather API key not configured");
                WeatherResponse::failure(&WeatherError::NotConfigured)
            }
            Err(e) => {
                tracing::error!("Error fetching weather data: {e}");
                WeatherResponse::failure(&e)
            }
        }
    }

    pub async fn try_current(&self, location: &str) -> Result<WeatherData, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let query = sanitize_location(location);

        if let Some(conditions) = self.cached(&query).await {
            tracing::debug!(location = %query, "Using cached weather");
            return Ok(stamp(conditions));
        }

        // The cache is not locked while the request is in flight.
        let conditions = self.fetch(api_key, &query, location).await?;

        let mut cache = self.cache.lock().await;
        let ttl = self.cache_ttl;
        cache.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        cache.insert(
            query,
            CachedConditions {
                conditions: conditions.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(stamp(conditions))
    }

    async fn cached(&self, query: &str) -> Option<Conditions> {
        let cache = self.cache.lock().await;
        cache
            .get(query)
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.conditions.clone())
    }

    /// Number of locations currently held in the cache.
    pub async fn cached_locations(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn fetch(
        &self,
        api_key: &str,
        query: &str,
        requested: &str,
    ) -> Result<Conditions, WeatherError> {
        let request = HttpRequest::query(
            &self.api_url,
            &[("key", api_key), ("q", query), ("aqi", "no")],
        )?;

        tracing::debug!(location = %query, "Fetching weather");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| WeatherError::Http(e.to_string()))?;

        if !response.is_success() {
            return Err(WeatherError::Api {
                status: response.status,
                message: response.text(),
            });
        }

        let raw: RawWeather = response.decode()?;
        Ok(to_conditions(raw, requested))
    }
}

/// Keep ASCII word characters, whitespace, `,`, `.` and `-`, after trimming.
pub fn sanitize_location(location: &str) -> String {
    location
        .trim()
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace() || matches!(c, ',' | '.' | '-')
        })
        .collect()
}

fn to_conditions(raw: RawWeather, requested: &str) -> Conditions {
    let (temperature, weather_icon) = match raw.current {
        Some(current) => (
            current.temp_c.unwrap_or(0.0),
            current.condition.and_then(|c| c.icon).unwrap_or_default(),
        ),
        None => (0.0, String::new()),
    };
    let location = raw
        .location
        .and_then(|l| l.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| requested.to_string());

    Conditions {
        temperature,
        weather_icon,
        location,
    }
}

fn stamp(conditions: Conditions) -> WeatherData {
    WeatherData {
        temperature: conditions.temperature,
        weather_icon: conditions.weather_icon,
        location: conditions.location,
        time: chrono::Local::now().format("%H:%M").to_string(),
    }
}
