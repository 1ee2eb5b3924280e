//! Portfolio - repository listing for a personal portfolio site.
//!
//! This library aggregates an account's pinned and recently updated GitHub
//! repositories into one display list, and slices that list into pages with
//! a compact page-number row.
//!
//! # Example
//!
//! ```ignore
//! use portfolio::github::{GitHubAggregator, GitHubClient, QueryLimits};
//! use portfolio::{ProjectFeed, ProjectSource, PageState};
//!
//! let client = GitHubClient::new(Some(token), Duration::from_secs(30))?;
//! let feed = ProjectFeed::new(GitHubAggregator::new(client, QueryLimits::for_login("gkze")));
//!
//! let listing = feed.fetch_projects(&CancellationToken::new()).await;
//! let state = PageState::new(6, listing.projects.len());
//! for project in state.visible(&listing.projects) {
//!     println!("{}", project.full_name);
//! }
//! ```

pub mod display;
pub mod feed;
pub mod github;
pub mod http;
pub mod pagination;
pub mod project;
pub mod weather;

pub use feed::ProjectFeed;
pub use github::{GitHubAggregator, GitHubClient, ProjectSource, QueryLimits};
pub use pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE, NavControls, Page, PageChange, PageIndexEntry,
    PageState, build_page_index_plan, page_count, paginate,
};
pub use project::{DEFAULT_LANGUAGE_COLOR, LanguageInfo, ProjectListing, RepositoryRecord};
pub use weather::{WeatherClient, WeatherData, WeatherResponse};
