//! Single-flight wrapper around a [`ProjectSource`].
//!
//! At most one aggregation runs at a time. A caller that arrives while one is
//! in flight waits for it and receives its result instead of issuing another
//! request. Once a call has completed, the next caller fetches again; nothing
//! is cached beyond the in-flight window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::github::ProjectSource;
use crate::project::ProjectListing;

pub struct ProjectFeed<S> {
    source: S,
    /// Bumped each time a fetch publishes its result.
    generation: AtomicU64,
    last: Mutex<Option<ProjectListing>>,
}

impl<S: ProjectSource> ProjectFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: ProjectSource> ProjectSource for ProjectFeed<S> {
    async fn fetch_projects(&self, cancel: &CancellationToken) -> ProjectListing {
        let started = Instant::now();
        let seen = self.generation.load(Ordering::Acquire);

        let mut last = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return ProjectListing::empty(started.elapsed().as_secs_f64() * 1000.0);
            }
            guard = self.last.lock() => guard,
        };

        if self.generation.load(Ordering::Acquire) != seen
            && let Some(listing) = last.as_ref()
        {
            tracing::debug!("Reusing result of in-flight project fetch");
            return listing.clone();
        }

        let listing = self.source.fetch_projects(cancel).await;
        if cancel.is_cancelled() {
            return listing;
        }

        *last = Some(listing.clone());
        self.generation.fetch_add(1, Ordering::AcqRel);
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct CountingSource {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CountingSource {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProjectSource for CountingSource {
        async fn fetch_projects(&self, cancel: &CancellationToken) -> ProjectListing {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::select! {
                _ = cancel.cancelled() => ProjectListing::empty(0.0),
                _ = tokio::time::sleep(self.delay) => ProjectListing {
                    projects: Vec::new(),
                    total_projects: n,
                    response_time_ms: 1.0,
                },
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_calls_share_one_fetch() {
        let feed = ProjectFeed::new(CountingSource::new(Duration::from_millis(100)));
        let cancel = CancellationToken::new();

        let (a, b, c) = tokio::join!(
            feed.fetch_projects(&cancel),
            feed.fetch_projects(&cancel),
            feed.fetch_projects(&cancel)
        );

        assert_eq!(feed.source().calls(), 1);
        assert_eq!(a.total_projects, 1);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_calls_fetch_again() {
        let feed = ProjectFeed::new(CountingSource::new(Duration::from_millis(10)));
        let cancel = CancellationToken::new();

        let first = feed.fetch_projects(&cancel).await;
        let second = feed.fetch_projects(&cancel).await;

        assert_eq!(feed.source().calls(), 2);
        assert_eq!(first.total_projects, 1);
        assert_eq!(second.total_projects, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_cancelled_while_waiting_gets_empty_listing() {
        let feed = ProjectFeed::new(CountingSource::new(Duration::from_millis(100)));
        let leader_cancel = CancellationToken::new();
        let waiter_cancel = CancellationToken::new();

        let (leader, _, waiter) = tokio::join!(
            feed.fetch_projects(&leader_cancel),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                waiter_cancel.cancel();
            },
            feed.fetch_projects(&waiter_cancel)
        );

        assert_eq!(feed.source().calls(), 1);
        assert_eq!(leader.total_projects, 1);
        assert!(waiter.is_empty());
        assert_eq!(waiter.total_projects, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_is_not_shared() {
        let feed = ProjectFeed::new(CountingSource::new(Duration::from_millis(100)));
        let cancel = CancellationToken::new();
        let (first, _) = tokio::join!(feed.fetch_projects(&cancel), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        });
        assert_eq!(first.total_projects, 0);

        let fresh = feed.fetch_projects(&CancellationToken::new()).await;
        assert_eq!(fresh.total_projects, 2);
        assert_eq!(feed.source().calls(), 2);
    }
}
