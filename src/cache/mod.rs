//! Revalidating snapshot of the first listing page
//!
//! The first page is fetched at most once per `max_age`. While a refresh is
//! running other readers wait for it instead of issuing their own request.
//! When a refresh fails the previous snapshot keeps being served.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::content::{ContentError, PostPage};

#[derive(Debug, Clone)]
struct Snapshot {
    fetched_at: Instant,
    page: PostPage,
}

/// Cached first page with time-based revalidation
#[derive(Debug)]
pub struct FirstPageCache {
    max_age: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl FirstPageCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            snapshot: RwLock::new(None),
        }
    }

    /// Return the cached page, calling `fetch` when it is missing or too old
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<PostPage, ContentError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PostPage, ContentError>>,
    {
        if let Some(page) = self.fresh(&*self.snapshot.read().await) {
            return Ok(page);
        }

        let mut snapshot = self.snapshot.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(page) = self.fresh(&snapshot) {
            return Ok(page);
        }

        match fetch().await {
            Ok(page) => {
                tracing::info!("Revalidated first page ({} posts)", page.results.len());
                *snapshot = Some(Snapshot {
                    fetched_at: Instant::now(),
                    page: page.clone(),
                });
                Ok(page)
            }
            Err(e) => match snapshot.as_ref() {
                Some(stale) => {
                    tracing::warn!("Revalidation failed, serving stale first page: {}", e);
                    Ok(stale.page.clone())
                }
                None => Err(e),
            },
        }
    }

    /// Drop the snapshot so the next read refetches
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    fn fresh(&self, snapshot: &Option<Snapshot>) -> Option<PostPage> {
        snapshot
            .as_ref()
            .filter(|s| s.fetched_at.elapsed() < self.max_age)
            .map(|s| s.page.clone())
    }
}
