//! Incremental post list behind the home page
//!
//! The list starts from the initial page and grows by appending whole pages
//! as "load more" is triggered. Pagination is either [`Pagination::HasMore`]
//! with the cursor of the next page, or [`Pagination::Exhausted`], which is
//! terminal.

use crate::content::{ContentError, Cursor, PageSource, Post, PostPage};

/// Where the list stands in the paginated query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    HasMore(Cursor),
    Exhausted,
}

impl Pagination {
    pub fn from_next_page(next_page: Option<String>) -> Self {
        match next_page {
            Some(cursor) => Pagination::HasMore(Cursor::new(cursor)),
            None => Pagination::Exhausted,
        }
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        match self {
            Pagination::HasMore(cursor) => Some(cursor),
            Pagination::Exhausted => None,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self, Pagination::HasMore(_))
    }
}

/// Permission to fetch one page, stamped with the request sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    cursor: Cursor,
}

impl LoadTicket {
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// User-facing notification raised by a failed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// What went wrong, for logs; the user sees a fixed message
    pub detail: String,
}

/// Result of one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// `added` posts were appended
    Appended { added: usize },
    /// Nothing left to load; state untouched
    Exhausted,
    /// A newer load was issued after this one; the result was dropped
    Stale,
    /// The fetch failed; state untouched
    Failed(Notice),
}

/// The posts shown on the home page and the cursor for the next batch
#[derive(Debug, Clone)]
pub struct PostList {
    posts: Vec<Post>,
    pagination: Pagination,
    pages_loaded: usize,
    issued: u64,
}

impl PostList {
    /// Seed the list from the initial page
    pub fn new(initial: PostPage) -> Self {
        Self {
            posts: initial.results,
            pagination: Pagination::from_next_page(initial.next_page),
            pages_loaded: 1,
            issued: 0,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    /// Number of pages merged so far, the initial one included
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Start a load; `None` once the list is exhausted
    ///
    /// Each ticket supersedes every ticket issued before it.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let cursor = self.pagination.cursor()?.clone();
        self.issued += 1;
        Some(LoadTicket {
            seq: self.issued,
            cursor,
        })
    }

    /// Merge the result of a load started with `ticket`
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<PostPage, ContentError>,
    ) -> LoadOutcome {
        if ticket.seq != self.issued {
            tracing::debug!(
                "Dropping stale page for request {} (latest {})",
                ticket.seq,
                self.issued
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let added = page.results.len();
                self.posts.extend(page.results);
                self.pagination = Pagination::from_next_page(page.next_page);
                self.pages_loaded += 1;
                tracing::debug!(
                    "Appended {} posts ({} total, more: {})",
                    added,
                    self.posts.len(),
                    self.has_more()
                );
                LoadOutcome::Appended { added }
            }
            Err(e) => {
                tracing::warn!("Failed to load more posts from {}: {}", ticket.cursor, e);
                LoadOutcome::Failed(Notice {
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Fetch the next page from `source` and append it
    pub async fn load_more<S: PageSource>(&mut self, source: &S) -> LoadOutcome {
        let Some(ticket) = self.begin_load() else {
            return LoadOutcome::Exhausted;
        };
        let result = source.fetch_page(ticket.cursor()).await;
        self.apply(ticket, result)
    }
}
