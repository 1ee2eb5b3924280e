//! Display model shared by the aggregator, the feed and the pagination layer.

use serde::{Deserialize, Serialize};

/// Color used for a language when the hosting API has none on record.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#ccc";

/// A language badge: name plus display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub color: String,
}

/// One repository in the aggregated project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    /// Opaque node id, stable across the pinned and recency queries.
    pub id: String,
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub star_count: u32,
    pub fork_count: u32,
    pub primary_language: Option<String>,
    /// Ordered by source size, largest first.
    pub languages: Vec<LanguageInfo>,
    /// ISO-8601, display only.
    pub created_at: String,
    /// ISO-8601, display only.
    pub updated_at: String,
    pub is_pinned: bool,
    /// Topic names in upstream order.
    pub tags: Vec<String>,
}

/// Result of one aggregation call.
///
/// `total_projects` counts pinned records plus every raw recency node,
/// before archived and duplicate entries are removed, so it can exceed
/// `projects.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    pub projects: Vec<RepositoryRecord>,
    pub total_projects: usize,
    /// Wall-clock time of the call in fractional milliseconds.
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
}

impl ProjectListing {
    /// The listing every failure collapses to.
    #[must_use]
    pub fn empty(response_time_ms: f64) -> Self {
        Self {
            projects: Vec::new(),
            total_projects: 0,
            response_time_ms,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Number of pinned records at the head of the list.
    #[must_use]
    pub fn pinned_count(&self) -> usize {
        self.projects.iter().take_while(|p| p.is_pinned).count()
    }
}
