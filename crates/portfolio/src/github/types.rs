//! Raw GraphQL response shapes.
//!
//! Everything here is lenient: absent or `null` collections decode to empty
//! ones and scalar fields are optional. Validation and defaulting happen
//! once, in [`super::convert`].

use serde::Deserialize;

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the repositories query.
#[derive(Debug, Deserialize)]
pub struct RepositoriesData {
    pub user: Option<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned_items: RawNodes<RawRepository>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repositories: RawNodes<RawRepository>,
}

/// A `{ nodes: [...] }` connection.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RawNodes<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for RawNodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A `{ edges: [{ node }] }` connection.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RawEdges<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<RawEdge<T>>,
}

impl<T> Default for RawEdges<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawEdge<T> {
    pub node: Option<T>,
}

/// A repository node as returned by either half of the query.
///
/// Pinned items of a non-repository type decode to a node with every
/// field absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub id: Option<String>,
    pub name: Option<String>,
    pub name_with_owner: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stargazer_count: Option<u32>,
    pub fork_count: Option<u32>,
    pub is_archived: Option<bool>,
    pub primary_language: Option<RawNamed>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: RawEdges<RawLanguage>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository_topics: RawNodes<RawTopicNode>,
}

impl RawRepository {
    /// Whether upstream flagged the repository as archived.
    #[inline]
    pub fn archived(&self) -> bool {
        self.is_archived.unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawNamed {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguage {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawTopicNode {
    pub topic: Option<RawNamed>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
