//! Client-side windowed pagination.
//!
//! The free functions are pure: [`paginate`] slices a list and
//! [`build_page_index_plan`] produces the compact page-number row with
//! ellipses. [`PageState`] wraps the one piece of state a consumer owns, the
//! current page, behind transitions that return a new state.

use serde::Serialize;

/// Default number of projects per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Default number of numbered entries in the page-index row, first and last
/// page included.
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// `ceil(total_items / page_size)`; zero when `page_size` is zero.
#[inline]
#[must_use]
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// One page of a list plus the page count it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_count: usize,
}

/// Slice page `current_page` (1-indexed) out of `items`.
///
/// The page is not clamped: page 0 or a page past the end yields an empty
/// slice.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let page_count = page_count(items.len(), page_size);
    let slice = if current_page == 0 || current_page > page_count {
        &items[..0]
    } else {
        let start = (current_page - 1) * page_size;
        let end = (start + page_size).min(items.len());
        &items[start..end]
    };

    Page {
        items: slice,
        page_count,
    }
}

/// An entry of the page-index row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageIndexEntry {
    Page { number: usize },
    Ellipsis,
}

/// Build the page-index row for `current_page` out of `page_count` pages.
///
/// Page 1 always comes first and `page_count` last (when there is more than
/// one page). Between them sits a contiguous run of interior pages, at most
/// `window_size - 2` wide (never less than one), starting half a window
/// before the current page and shifted left when it would run past
/// `page_count - 1`. Gaps on either side of the run become an ellipsis. The
/// last page never repeats inside the run.
#[must_use]
pub fn build_page_index_plan(
    current_page: usize,
    page_count: usize,
    window_size: usize,
) -> Vec<PageIndexEntry> {
    let mut plan = vec![PageIndexEntry::Page { number: 1 }];
    if page_count <= 1 {
        return plan;
    }

    let current = current_page.clamp(1, page_count);
    let interior = window_size.saturating_sub(2).max(1);

    let mut start = current.saturating_sub(interior / 2).max(2);
    let end = (page_count - 1).min(start + interior - 1);
    if end + 1 < start + interior {
        start = (end + 1).saturating_sub(interior).max(2);
    }

    if start > 2 {
        plan.push(PageIndexEntry::Ellipsis);
    }
    plan.extend((start..=end).map(|number| PageIndexEntry::Page { number }));
    if end < page_count - 1 {
        plan.push(PageIndexEntry::Ellipsis);
    }
    plan.push(PageIndexEntry::Page { number: page_count });

    plan
}

/// Enabled state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Pagination state owned by the consumer.
///
/// `current_page` always lies in `1..=max(page_count, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

/// Result of a page transition: the new state and the page the consumer
/// should scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub state: PageState,
    pub scroll_to_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

impl PageState {
    /// Start on page 1. A zero `page_size` is treated as 1.
    #[must_use]
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_items, self.page_size)
    }

    fn last_page(&self) -> usize {
        self.page_count().max(1)
    }

    /// Go to page `page`, clamped into range.
    #[must_use]
    pub fn go_to(&self, page: usize) -> PageChange {
        let state = Self {
            current_page: page.clamp(1, self.last_page()),
            ..*self
        };
        PageChange {
            scroll_to_page: state.current_page,
            state,
        }
    }

    /// The next page, or `None` on the last page.
    #[must_use]
    pub fn next(&self) -> Option<PageChange> {
        self.nav()
            .next_enabled
            .then(|| self.go_to(self.current_page + 1))
    }

    /// The previous page, or `None` on page 1.
    #[must_use]
    pub fn previous(&self) -> Option<PageChange> {
        self.nav()
            .previous_enabled
            .then(|| self.go_to(self.current_page - 1))
    }

    /// Rebase on a list of a different length, keeping the current page
    /// when it still exists.
    #[must_use]
    pub fn with_total_items(&self, total_items: usize) -> Self {
        let resized = Self {
            total_items,
            ..*self
        };
        Self {
            current_page: self.current_page.clamp(1, resized.last_page()),
            ..resized
        }
    }

    pub fn nav(&self) -> NavControls {
        NavControls {
            previous_enabled: self.current_page > 1,
            next_enabled: self.current_page < self.page_count(),
        }
    }

    /// The items shown on the current page.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.current_page).items
    }

    pub fn index_plan(&self, window_size: usize) -> Vec<PageIndexEntry> {
        build_page_index_plan(self.current_page, self.page_count(), window_size)
    }
}
