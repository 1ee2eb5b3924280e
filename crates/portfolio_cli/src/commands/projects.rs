use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use portfolio::display::{
    description_or_placeholder, empty_state_message, format_date, page_indicator,
};
use portfolio::github::{GitHubAggregator, GitHubClient, ProjectSource};
use portfolio::{
    NavControls, PageIndexEntry, PageState, ProjectFeed, ProjectListing, RepositoryRecord,
};

use crate::commands::output::{OutputFormat, print_json, table};
use crate::config::Config;

/// Longest description shown in the table before it is cut.
const DESCRIPTION_WIDTH: usize = 60;

/// Options of the `projects` command.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProjectsArgs {
    /// Page to show (clamped to the available pages)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Projects per page (default from config or 6)
    #[arg(short = 's', long)]
    pub page_size: Option<usize>,

    /// Numbered entries in the page row, first and last included (default from config or 4)
    #[arg(short, long)]
    pub window: Option<usize>,

    /// GitHub account to list (default from config)
    #[arg(short, long)]
    pub login: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// One table row.
#[derive(Debug, Clone, Tabled)]
pub(crate) struct ProjectRow {
    #[tabled(rename = "")]
    pub pinned: &'static str,
    #[tabled(rename = "Repository")]
    pub name: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Languages")]
    pub languages: String,
    #[tabled(rename = "Stars")]
    pub stars: u32,
    #[tabled(rename = "Forks")]
    pub forks: u32,
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl ProjectRow {
    pub(crate) fn from_record(record: &RepositoryRecord) -> Self {
        Self {
            pinned: if record.is_pinned { "★" } else { "" },
            name: record.full_name.clone(),
            description: truncate(
                description_or_placeholder(record.description.as_deref()),
                DESCRIPTION_WIDTH,
            ),
            languages: record
                .languages
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            stars: record.star_count,
            forks: record.fork_count,
            tags: record.tags.join(", "),
            updated: format_date(&record.updated_at),
        }
    }
}

/// JSON shape of one rendered page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectsPage<'a> {
    pub current_page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_projects: usize,
    #[serde(rename = "responseTime")]
    pub response_time_ms: f64,
    pub nav: NavControls,
    pub index_plan: Vec<PageIndexEntry>,
    pub projects: &'a [RepositoryRecord],
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Render the page-index row with previous/next controls, e.g.
/// `‹ Prev  1 … 4 [5] … 10  Next ›`.
pub(crate) fn format_page_row(plan: &[PageIndexEntry], current: usize, nav: NavControls) -> String {
    let control = |label: &str, enabled: bool| {
        if enabled {
            label.to_string()
        } else {
            console::style(label).dim().to_string()
        }
    };

    let pages: Vec<String> = plan
        .iter()
        .map(|entry| match entry {
            PageIndexEntry::Page { number } if *number == current => format!("[{number}]"),
            PageIndexEntry::Page { number } => number.to_string(),
            PageIndexEntry::Ellipsis => "…".to_string(),
        })
        .collect();

    format!(
        "{}  {}  {}",
        control("‹ Prev", nav.previous_enabled),
        pages.join(" "),
        control("Next ›", nav.next_enabled)
    )
}

/// Resolve the page to show from the listing and the command options.
pub(crate) fn page_state(
    listing: &ProjectListing,
    page_size: usize,
    page: Option<usize>,
) -> PageState {
    let state = PageState::new(page_size, listing.projects.len());
    match page {
        Some(page) => {
            let change = state.go_to(page);
            tracing::debug!(page = change.scroll_to_page, "Jumping to page");
            change.state
        }
        None => state,
    }
}

pub(crate) async fn handle_projects(
    args: ProjectsArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = GitHubClient::new(config.github_token(), config.http_timeout())?
        .with_api_url(config.github.api_url.clone());
    if !client.has_token() {
        tracing::warn!(
            "No GitHub token configured; set PORTFOLIO_GITHUB_TOKEN or GITHUB_API_KEY"
        );
    }

    let limits = config.query_limits(args.login.as_deref());
    let feed = ProjectFeed::new(GitHubAggregator::new(client, limits));
    let listing = feed.fetch_projects(cancel).await;

    let page_size = args.page_size.unwrap_or(config.projects.page_size);
    let window = args.window.unwrap_or(config.projects.window_size);
    let state = page_state(&listing, page_size, args.page);

    match args.output {
        OutputFormat::Json => print_json(&ProjectsPage {
            current_page: state.current_page(),
            page_count: state.page_count(),
            page_size: state.page_size(),
            total_projects: listing.total_projects,
            response_time_ms: listing.response_time_ms,
            nav: state.nav(),
            index_plan: state.index_plan(window),
            projects: state.visible(&listing.projects),
        })?,
        OutputFormat::Table => {
            if listing.is_empty() {
                println!("{}", empty_state_message());
                return Ok(());
            }

            let rows = state
                .visible(&listing.projects)
                .iter()
                .map(ProjectRow::from_record);
            println!("{}", table(rows));

            if state.page_count() > 1 {
                println!(
                    "{}",
                    format_page_row(&state.index_plan(window), state.current_page(), state.nav())
                );
            }
            if let Some(indicator) =
                page_indicator(&state, listing.projects.len(), listing.response_time_ms)
            {
                println!("{indicator}");
            }
        }
    }

    Ok(())
}
