//! Pinned + recent repository aggregation.

use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::client::GitHubClient;
use super::convert::{MergedProjects, merge_projects};
use super::error::{GitHubError, is_rate_limit_error, short_error_message};
use super::query::QueryLimits;
use crate::project::ProjectListing;

/// Anything that can produce the project listing.
///
/// Implementations never fail outward: every failure is logged and turned
/// into an empty listing that still reports the elapsed time.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self, cancel: &CancellationToken) -> ProjectListing;
}

/// Builds the project listing from one GitHub GraphQL round-trip.
#[derive(Clone)]
pub struct GitHubAggregator {
    client: GitHubClient,
    limits: QueryLimits,
}

impl GitHubAggregator {
    pub fn new(client: GitHubClient, limits: QueryLimits) -> Self {
        Self { client, limits }
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// Run the query and merge the result, surfacing errors.
    pub async fn try_fetch(&self) -> Result<MergedProjects, GitHubError> {
        let user = self.client.fetch_user_repositories(&self.limits).await?;
        Ok(merge_projects(user, &self.limits))
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[async_trait]
impl ProjectSource for GitHubAggregator {
    async fn fetch_projects(&self, cancel: &CancellationToken) -> ProjectListing {
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(login = %self.limits.login, "Project fetch cancelled");
                return ProjectListing::empty(elapsed_ms(started));
            }
            result = self.try_fetch() => result,
        };
        let response_time_ms = elapsed_ms(started);

        match outcome {
            Ok(merged) => {
                tracing::info!(
                    login = %self.limits.login,
                    projects = merged.projects.len(),
                    total = merged.total_projects,
                    elapsed_ms = response_time_ms,
                    "Fetched projects"
                );
                ProjectListing {
                    projects: merged.projects,
                    total_projects: merged.total_projects,
                    response_time_ms,
                }
            }
            Err(e) => {
                if is_rate_limit_error(&e) {
                    tracing::warn!(login = %self.limits.login, "GitHub rate limit hit: {}", short_error_message(&e));
                } else {
                    tracing::error!(login = %self.limits.login, "Error fetching GitHub projects: {}", short_error_message(&e));
                }
                ProjectListing::empty(response_time_ms)
            }
        }
    }
}
