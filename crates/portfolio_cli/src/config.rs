//! Configuration file support for portfolio.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `PORTFOLIO_`, e.g., `PORTFOLIO_GITHUB_TOKEN`)
//! 3. Config file (./portfolio.toml, then ~/.config/portfolio/config.toml)
//! 4. Legacy credential variables `GITHUB_API_KEY` / `WEATHER_API_KEY`, used
//!    only when no token or key is configured otherwise
//! 5. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use PORTFOLIO_GITHUB_TOKEN / GITHUB_API_KEY
//! login = "CallMeJasonYT"
//! pinned_limit = 6
//! recent_limit = 100
//!
//! [weather]
//! key = "..."  # or use PORTFOLIO_WEATHER_KEY / WEATHER_API_KEY
//! location = "Patra, Greece"
//!
//! [projects]
//! page_size = 6
//! window_size = 4
//!
//! [http]
//! timeout_secs = 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use portfolio::github::{
    DEFAULT_GITHUB_GRAPHQL_URL, DEFAULT_LANGUAGES_LIMIT, DEFAULT_PINNED_LIMIT,
    DEFAULT_RECENT_LIMIT, DEFAULT_TIMEOUT_SECS, DEFAULT_TOPICS_LIMIT, QueryLimits,
};
use portfolio::weather::{DEFAULT_LOCATION, DEFAULT_WEATHER_API_URL};
use portfolio::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE};

/// Account whose repositories are listed when none is configured.
pub const DEFAULT_LOGIN: &str = "CallMeJasonYT";

/// Legacy variable holding the GitHub token.
const LEGACY_GITHUB_TOKEN_VAR: &str = "GITHUB_API_KEY";
/// Legacy variable holding the weather API key.
const LEGACY_WEATHER_KEY_VAR: &str = "WEATHER_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub weather: WeatherConfig,
    pub projects: ProjectsConfig,
    pub http: HttpConfig,
}

/// GitHub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via PORTFOLIO_GITHUB_TOKEN or GITHUB_API_KEY.
    pub token: Option<String>,
    /// Account whose repositories are listed.
    pub login: String,
    /// GraphQL endpoint.
    pub api_url: String,
    pub pinned_limit: u32,
    pub recent_limit: u32,
    pub languages_limit: u32,
    pub topics_limit: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            login: DEFAULT_LOGIN.to_string(),
            api_url: DEFAULT_GITHUB_GRAPHQL_URL.to_string(),
            pinned_limit: DEFAULT_PINNED_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            languages_limit: DEFAULT_LANGUAGES_LIMIT,
            topics_limit: DEFAULT_TOPICS_LIMIT,
        }
    }
}

/// Weather widget configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Weather API key.
    /// Can also be set via PORTFOLIO_WEATHER_KEY or WEATHER_API_KEY.
    pub key: Option<String>,
    pub location: String,
    pub api_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            key: None,
            location: DEFAULT_LOCATION.to_string(),
            api_url: DEFAULT_WEATHER_API_URL.to_string(),
        }
    }
}

/// Project listing display options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    pub page_size: usize,
    pub window_size: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// HTTP client options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/portfolio/config.toml)
    /// 3. Local config file (./portfolio.toml)
    /// 4. Environment variables with PORTFOLIO_ prefix
    ///
    /// Legacy credential variables then fill in a missing token or key.
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("portfolio.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./portfolio.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., PORTFOLIO_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("_")
                .try_parsing(true),
        );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        };

        config.apply_legacy_env(|name| std::env::var(name).ok());
        config
    }

    /// Fill a missing GitHub token or weather key from the legacy variables.
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        if !present(&self.github.token) {
            self.github.token = lookup(LEGACY_GITHUB_TOKEN_VAR).filter(|s| !s.trim().is_empty());
        }
        if !present(&self.weather.key) {
            self.weather.key = lookup(LEGACY_WEATHER_KEY_VAR).filter(|s| !s.trim().is_empty());
        }
    }

    /// Get the GitHub token.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Get the weather API key.
    pub fn weather_key(&self) -> Option<String> {
        self.weather.key.clone()
    }

    /// Query limits for `login`, or for the configured login.
    pub fn query_limits(&self, login: Option<&str>) -> QueryLimits {
        QueryLimits::for_login(login.unwrap_or(&self.github.login))
            .with_pinned(self.github.pinned_limit)
            .with_recent(self.github.recent_limit)
            .with_languages(self.github.languages_limit)
            .with_topics(self.github.topics_limit)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "portfolio").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
