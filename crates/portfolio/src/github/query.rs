//! The combined pinned + recent repositories GraphQL query.

use serde::Serialize;

/// Default number of pinned repositories requested.
pub const DEFAULT_PINNED_LIMIT: u32 = 6;
/// Default number of recently updated repositories requested.
pub const DEFAULT_RECENT_LIMIT: u32 = 100;
/// Default number of languages per repository (largest first).
pub const DEFAULT_LANGUAGES_LIMIT: u32 = 6;
/// Default number of topics per repository.
pub const DEFAULT_TOPICS_LIMIT: u32 = 10;

/// Account identity and per-connection limits for one aggregation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    pub login: String,
    pub pinned: u32,
    pub recent: u32,
    pub languages: u32,
    pub topics: u32,
}

impl QueryLimits {
    /// Limits with the default page sizes for `login`.
    pub fn for_login(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            pinned: DEFAULT_PINNED_LIMIT,
            recent: DEFAULT_RECENT_LIMIT,
            languages: DEFAULT_LANGUAGES_LIMIT,
            topics: DEFAULT_TOPICS_LIMIT,
        }
    }

    #[must_use]
    pub fn with_pinned(mut self, pinned: u32) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub fn with_recent(mut self, recent: u32) -> Self {
        self.recent = recent;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: u32) -> Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_topics(mut self, topics: u32) -> Self {
        self.topics = topics;
        self
    }

    /// Build the POST body for this query.
    pub fn to_request(&self) -> GraphQlRequest<'_> {
        GraphQlRequest {
            query: REPOSITORIES_QUERY,
            variables: QueryVariables {
                login: &self.login,
                pinned: self.pinned,
                recent: self.recent,
                languages: self.languages,
                topics: self.topics,
            },
        }
    }
}

/// JSON body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub variables: QueryVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct QueryVariables<'a> {
    pub login: &'a str,
    pub pinned: u32,
    pub recent: u32,
    pub languages: u32,
    pub topics: u32,
}

/// Pinned items plus the recency-ordered repository list, sharing one
/// field selection.
pub const REPOSITORIES_QUERY: &str = r#"
query PortfolioRepositories($login: String!, $pinned: Int!, $recent: Int!, $languages: Int!, $topics: Int!) {
  user(login: $login) {
    pinnedItems(first: $pinned, types: REPOSITORY) {
      nodes {
        ... on Repository {
          ...RepositoryFields
        }
      }
    }
    repositories(first: $recent, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        ...RepositoryFields
      }
    }
  }
}

fragment RepositoryFields on Repository {
  id
  name
  nameWithOwner
  description
  url
  stargazerCount
  forkCount
  isArchived
  primaryLanguage {
    name
  }
  languages(first: $languages, orderBy: {field: SIZE, direction: DESC}) {
    edges {
      node {
        name
        color
      }
    }
  }
  createdAt
  updatedAt
  repositoryTopics(first: $topics) {
    nodes {
      topic {
        name
      }
    }
  }
}
"#;
