//! Listing pagination
//!
//! Listing results arrive one page at a time. The accumulated listing
//! is the concatenation of every fetched page in fetch order plus the
//! most recently returned continuation cursor. Pages are never
//! re-sorted or de-duplicated here; the API's return order is the
//! display order, and if the API hands back an entry twice it shows
//! twice.

mod session;

pub use session::{ListingSession, LoadMoreRejected, LoadOutcome, PageRequest, SessionPhase};

use serde::{Deserialize, Serialize};

use crate::content::PostSummary;

/// Continuation state of a listing
///
/// The token is opaque to everything in this crate; the observed API
/// hands back the full URL of the next page. `Exhausted` is terminal
/// and callers must withdraw the load-more affordance on seeing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    /// More pages exist; pass the token back to continue
    HasMore(String),
    /// The listing is complete
    Exhausted,
}

impl Cursor {
    /// Map the API's nullable next-page field to a cursor
    pub fn from_next_page(next_page: Option<String>) -> Self {
        match next_page {
            Some(token) => Cursor::HasMore(token),
            None => Cursor::Exhausted,
        }
    }

    /// Whether a further page can be requested
    pub fn has_more(&self) -> bool {
        matches!(self, Cursor::HasMore(_))
    }
}

/// One page of listing results as returned by the content source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Continuation for the page after this one
    pub next: Cursor,

    /// Post summaries in the API's return order
    pub results: Vec<PostSummary>,
}

/// The accumulated listing for one browsing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Every summary fetched so far, in fetch order
    pub results: Vec<PostSummary>,

    /// Continuation carried over from the last merged page; only
    /// meaningful once a first page has been merged
    pub next: Cursor,
}

impl Listing {
    /// An empty listing with nothing fetched yet
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            next: Cursor::Exhausted,
        }
    }

    /// Append a successfully fetched page
    ///
    /// Existing entries are never dropped or reordered: the page's
    /// results go after them and the page's cursor replaces the current
    /// one. Failed fetches are never merged, so the listing always
    /// reflects exactly the pages that arrived.
    pub fn merge(&mut self, page: ListingPage) {
        self.results.extend(page.results);
        self.next = page.next;
    }

    /// Number of accumulated entries
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has accumulated
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether the cursor allows a further page
    pub fn has_more(&self) -> bool {
        self.next.has_more()
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+00:00".to_string()),
            title: uid.to_uppercase(),
            subtitle: String::new(),
            author: "Ana".to_string(),
        }
    }

    fn page(uids: &[&str], next: Cursor) -> ListingPage {
        ListingPage {
            next,
            results: uids.iter().map(|uid| summary(uid)).collect(),
        }
    }

    fn uids(listing: &Listing) -> Vec<&str> {
        listing.results.iter().map(|s| s.uid.as_str()).collect()
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut listing = Listing::new();
        listing.merge(page(&["a", "b"], Cursor::HasMore("p2".to_string())));
        listing.merge(page(&["c", "d"], Cursor::Exhausted));

        assert_eq!(uids(&listing), vec!["a", "b", "c", "d"]);
        assert_eq!(listing.len(), 4);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_merge_replaces_cursor() {
        let mut listing = Listing::new();
        listing.merge(page(&["a"], Cursor::HasMore("p2".to_string())));
        assert_eq!(listing.next, Cursor::HasMore("p2".to_string()));

        listing.merge(page(&["b"], Cursor::HasMore("p3".to_string())));
        assert_eq!(listing.next, Cursor::HasMore("p3".to_string()));
    }

    #[test]
    fn test_merge_length_is_sum_of_parts() {
        let mut listing = Listing::new();
        let first = page(&["a", "b", "c"], Cursor::HasMore("p2".to_string()));
        let second = page(&["d", "e"], Cursor::Exhausted);

        let expected = first.results.len() + second.results.len();
        listing.merge(first);
        listing.merge(second);
        assert_eq!(listing.len(), expected);
    }

    #[test]
    fn test_merge_order_is_batch_order() {
        // Merging pages one at a time ends the same as merging their
        // concatenation in one page
        let mut one_at_a_time = Listing::new();
        one_at_a_time.merge(page(&["a", "b"], Cursor::HasMore("p2".to_string())));
        one_at_a_time.merge(page(&["c"], Cursor::Exhausted));

        let mut all_at_once = Listing::new();
        all_at_once.merge(page(&["a", "b", "c"], Cursor::Exhausted));

        assert_eq!(uids(&one_at_a_time), uids(&all_at_once));
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let mut listing = Listing::new();
        listing.merge(page(&["a", "b"], Cursor::HasMore("p2".to_string())));
        listing.merge(page(&["b", "c"], Cursor::Exhausted));

        assert_eq!(uids(&listing), vec!["a", "b", "b", "c"]);
    }

    #[test]
    fn test_merge_empty_page_still_updates_cursor() {
        let mut listing = Listing::new();
        listing.merge(page(&["a"], Cursor::HasMore("p2".to_string())));
        listing.merge(page(&[], Cursor::Exhausted));

        assert_eq!(uids(&listing), vec!["a"]);
        assert!(!listing.has_more());
    }

    #[test]
    fn test_cursor_from_next_page() {
        assert_eq!(
            Cursor::from_next_page(Some("http://api/page/2".to_string())),
            Cursor::HasMore("http://api/page/2".to_string())
        );
        assert_eq!(Cursor::from_next_page(None), Cursor::Exhausted);
    }
}
