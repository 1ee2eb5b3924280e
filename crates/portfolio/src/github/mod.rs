//! GitHub repository aggregation.
//!
//! One GraphQL round-trip fetches the account's pinned repositories and its
//! most recently updated ones; the two lists are merged into a single,
//! deduplicated, pinned-first [`ProjectListing`](crate::ProjectListing).
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`query`] - The GraphQL document and its limits
//! - [`types`] - Raw response shapes
//! - [`convert`] - Validation, defaulting and the merge
//! - [`client`] - Transport-backed GraphQL client
//! - [`aggregate`] - The never-failing [`ProjectSource`] implementation
//!
//! ```ignore
//! use portfolio::github::{GitHubAggregator, GitHubClient, ProjectSource, QueryLimits};
//!
//! let client = GitHubClient::new(Some(token), Duration::from_secs(30))?;
//! let aggregator = GitHubAggregator::new(client, QueryLimits::for_login("gkze"));
//! let listing = aggregator.fetch_projects(&CancellationToken::new()).await;
//! ```

mod aggregate;
mod client;
mod convert;
mod error;
mod query;
mod types;

pub use aggregate::{GitHubAggregator, ProjectSource};
pub use client::{DEFAULT_GITHUB_GRAPHQL_URL, DEFAULT_TIMEOUT_SECS, GitHubClient};
pub use convert::{MergedProjects, merge_projects, to_repository_record};
pub use error::{GitHubError, is_rate_limit_error, short_error_message};
pub use query::{
    DEFAULT_LANGUAGES_LIMIT, DEFAULT_PINNED_LIMIT, DEFAULT_RECENT_LIMIT, DEFAULT_TOPICS_LIMIT,
    QueryLimits, REPOSITORIES_QUERY,
};
pub use types::{RawRepository, RawUser};
