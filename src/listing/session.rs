//! Listing session state machine
//!
//! One load-more interaction is one round trip through an explicit
//! state machine. The phases make the single-in-flight-fetch rule
//! structural: a trigger that arrives while a fetch is outstanding is
//! rejected instead of racing, and a failed fetch settles in `Failed`
//! with the accumulated listing untouched so a retry re-issues the
//! same page request.

use serde::Serialize;

use super::{Cursor, Listing, ListingPage};
use crate::source::{ContentSource, SourceError};

/// Phase of a listing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Created; nothing fetched yet
    Idle,
    /// Exactly one fetch outstanding
    Fetching,
    /// The last fetch merged successfully
    Loaded,
    /// The last fetch failed; a retry is allowed
    Failed,
}

/// What the content source should be asked for next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// The initial page, no cursor
    First,
    /// A continuation from an opaque cursor token
    Continue(String),
}

/// Why a load-more trigger was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadMoreRejected {
    /// A fetch is already outstanding for this session
    #[error("a page fetch is already in flight")]
    AlreadyFetching,

    /// The cursor is exhausted; there is nothing left to load
    #[error("the listing has no further pages")]
    Exhausted,
}

/// Result of one load-more round trip
#[derive(Debug)]
pub enum LoadOutcome {
    /// A page was fetched and merged
    Loaded,
    /// The trigger was rejected; nothing changed
    Rejected(LoadMoreRejected),
    /// The fetch failed; the listing is unchanged and retryable
    Failed(SourceError),
}

/// Client-side pagination state for one listing session
#[derive(Debug, Clone)]
pub struct ListingSession {
    listing: Listing,
    phase: SessionPhase,
    /// False until a first page has merged; the cursor in `listing` is
    /// only meaningful afterwards
    seeded: bool,
    page_size: usize,
}

impl ListingSession {
    /// A session that has not fetched anything yet
    pub fn new(page_size: usize) -> Self {
        Self {
            listing: Listing::new(),
            phase: SessionPhase::Idle,
            seeded: false,
            page_size,
        }
    }

    /// A session seeded with a page some collaborator already fetched
    pub fn seeded(first_page: ListingPage, page_size: usize) -> Self {
        let mut listing = Listing::new();
        listing.merge(first_page);
        Self {
            listing,
            phase: SessionPhase::Loaded,
            seeded: true,
            page_size,
        }
    }

    /// The accumulated listing
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Page size requested from the source
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether the load-more affordance should be offered right now
    pub fn can_load_more(&self) -> bool {
        self.phase != SessionPhase::Fetching && (!self.seeded || self.listing.has_more())
    }

    /// Accept a load-more trigger
    ///
    /// Moves the session to `Fetching` and hands back the page request
    /// to perform. While a fetch is outstanding, or once the cursor is
    /// exhausted, the trigger is rejected and no state changes.
    pub fn request_more(&mut self) -> Result<PageRequest, LoadMoreRejected> {
        if self.phase == SessionPhase::Fetching {
            return Err(LoadMoreRejected::AlreadyFetching);
        }

        let request = if !self.seeded {
            PageRequest::First
        } else {
            match &self.listing.next {
                Cursor::HasMore(token) => PageRequest::Continue(token.clone()),
                Cursor::Exhausted => return Err(LoadMoreRejected::Exhausted),
            }
        };

        self.phase = SessionPhase::Fetching;
        Ok(request)
    }

    /// Apply the page a `request_more` fetch brought back
    ///
    /// Valid only while `Fetching`; merges the page and settles in
    /// `Loaded`.
    pub fn complete(&mut self, page: ListingPage) {
        debug_assert_eq!(self.phase, SessionPhase::Fetching);
        self.listing.merge(page);
        self.seeded = true;
        self.phase = SessionPhase::Loaded;
    }

    /// Record that the outstanding fetch failed
    ///
    /// Releases the in-flight guard without touching the listing; the
    /// next `request_more` re-issues the same page request.
    pub fn fail(&mut self) {
        debug_assert_eq!(self.phase, SessionPhase::Fetching);
        self.phase = SessionPhase::Failed;
    }

    /// Drive one full load-more round trip against a source
    ///
    /// Convenience for single-owner callers; the server splits the
    /// transition and the fetch so its session lock is never held
    /// across the network call.
    pub async fn load_more<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: ContentSource + ?Sized,
    {
        let request = match self.request_more() {
            Ok(request) => request,
            Err(rejected) => return LoadOutcome::Rejected(rejected),
        };

        let cursor = match &request {
            PageRequest::First => None,
            PageRequest::Continue(token) => Some(token.as_str()),
        };

        match source.query_listing(self.page_size, cursor).await {
            Ok(page) => {
                self.complete(page);
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::warn!("listing fetch failed: {}", err);
                self.fail();
                LoadOutcome::Failed(err)
            }
        }
    }
}
