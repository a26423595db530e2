//! Content source boundary
//!
//! Everything the front-end knows about the CMS goes through
//! [`ContentSource`]: one paged listing query, one full-index fetch for
//! navigation, and one by-uid document fetch. The HTTP implementation
//! talks to the hosted content API; the fixture implementation serves a
//! local JSON file for tests and offline runs.

mod fixture;
mod http;

pub use fixture::FixtureSource;
pub use http::HttpSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::{Post, PostRef};
use crate::listing::ListingPage;

/// Errors surfaced by a content source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The API could not be reached or the transfer broke off
    #[error("content API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("content API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape
    #[error("could not decode content API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A continuation token the source cannot use
    #[error("unusable continuation cursor: {0:?}")]
    Cursor(String),

    /// No document with the requested uid exists
    #[error("no post with uid {0:?}")]
    NotFound(String),

    /// A fixture file could not be read
    #[error("could not read fixture: {0}")]
    Fixture(#[from] std::io::Error),
}

impl SourceError {
    /// Whether retrying the same request may succeed
    ///
    /// Transport trouble and server-side failures are retryable; a
    /// missing document or an undecodable body is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Transport(_) => true,
            SourceError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// A headless content API, reduced to the three reads the front-end
/// performs
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one listing page
    ///
    /// `cursor` is `None` for the first page and the opaque
    /// continuation token from the previous page afterwards. Results
    /// come back in the API's own order, newest first by convention.
    async fn query_listing(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<ListingPage, SourceError>;

    /// Fetch the slim index of every published post, consistently
    /// ordered by publication date, for neighbor navigation
    async fn fetch_full_index(&self) -> Result<Vec<PostRef>, SourceError>;

    /// Fetch one full post document by uid
    async fn fetch_by_uid(&self, uid: &str) -> Result<Post, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let gateway = SourceError::Status {
            status: 502,
            url: "http://api/documents".to_string(),
        };
        assert!(gateway.is_retryable());

        let client_side = SourceError::Status {
            status: 404,
            url: "http://api/documents/nope".to_string(),
        };
        assert!(!client_side.is_retryable());

        assert!(!SourceError::NotFound("nope".to_string()).is_retryable());
        assert!(!SourceError::Cursor("junk".to_string()).is_retryable());
    }
}
