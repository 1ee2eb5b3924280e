//! Model conversion from raw GraphQL nodes to project records.

use std::collections::HashSet;

use super::query::QueryLimits;
use super::types::{RawEdges, RawLanguage, RawNodes, RawRepository, RawTopicNode, RawUser};
use crate::project::{DEFAULT_LANGUAGE_COLOR, LanguageInfo, RepositoryRecord};

/// Flatten the languages connection, preserving upstream (size) order.
///
/// Edges without a node or a name are dropped; a missing color falls back
/// to [`DEFAULT_LANGUAGE_COLOR`].
pub fn to_languages(languages: RawEdges<RawLanguage>, limit: usize) -> Vec<LanguageInfo> {
    languages
        .edges
        .into_iter()
        .filter_map(|edge| edge.node)
        .filter_map(|lang| {
            let name = lang.name?;
            let color = lang
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE_COLOR.to_string());
            Some(LanguageInfo { name, color })
        })
        .take(limit)
        .collect()
}

/// Flatten the topics connection into tag names, preserving upstream order.
pub fn to_tags(topics: RawNodes<RawTopicNode>, limit: usize) -> Vec<String> {
    topics
        .nodes
        .into_iter()
        .filter_map(|node| node.topic.and_then(|t| t.name))
        .take(limit)
        .collect()
}

/// Convert a raw node into a [`RepositoryRecord`].
///
/// Returns `None` when the node lacks an `id`, `name` or `url`, which is
/// what a non-repository pinned item or a truncated node looks like.
pub fn to_repository_record(
    repo: RawRepository,
    is_pinned: bool,
    limits: &QueryLimits,
) -> Option<RepositoryRecord> {
    let id = repo.id?;
    let name = repo.name?;
    let url = repo.url?;

    let full_name = repo
        .name_with_owner
        .unwrap_or_else(|| format!("{}/{}", limits.login, name));

    Some(RepositoryRecord {
        id,
        full_name,
        name,
        description: repo.description,
        url,
        star_count: repo.stargazer_count.unwrap_or(0),
        fork_count: repo.fork_count.unwrap_or(0),
        primary_language: repo.primary_language.and_then(|l| l.name),
        languages: to_languages(repo.languages, limits.languages as usize),
        created_at: repo.created_at.unwrap_or_default(),
        updated_at: repo.updated_at.unwrap_or_default(),
        is_pinned,
        tags: to_tags(repo.repository_topics, limits.topics as usize),
    })
}

/// Projects merged from both halves of the query, before timing is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedProjects {
    pub projects: Vec<RepositoryRecord>,
    pub total_projects: usize,
}

/// Merge pinned and recent repositories into one display list.
///
/// - Pinned records come first, in pinned order, and are never filtered
///   for the archived flag.
/// - A recent node is kept only when it is not archived and its id has not
///   been seen yet (pinned ids included).
/// - `total_projects` is the pinned record count plus the raw recent node
///   count, taken before filtering.
pub fn merge_projects(user: RawUser, limits: &QueryLimits) -> MergedProjects {
    let mut seen: HashSet<String> = HashSet::new();
    let mut projects =
        Vec::with_capacity(user.pinned_items.nodes.len() + user.repositories.nodes.len());

    for raw in user.pinned_items.nodes {
        match to_repository_record(raw, true, limits) {
            Some(record) => {
                if seen.insert(record.id.clone()) {
                    projects.push(record);
                }
            }
            None => tracing::warn!("Skipping pinned item without id, name or url"),
        }
    }
    let pinned_count = projects.len();

    let raw_recent_count = user.repositories.nodes.len();
    for raw in user.repositories.nodes {
        if raw.archived() {
            tracing::debug!(id = ?raw.id, "Skipping archived repository");
            continue;
        }
        if raw.id.as_ref().is_some_and(|id| seen.contains(id)) {
            continue;
        }
        match to_repository_record(raw, false, limits) {
            Some(record) => {
                seen.insert(record.id.clone());
                projects.push(record);
            }
            None => tracing::warn!("Skipping repository without id, name or url"),
        }
    }

    MergedProjects {
        projects,
        total_projects: pinned_count + raw_recent_count,
    }
}
