//! Fixture-backed content source
//!
//! Serves posts from memory or from a local JSON file (an array of
//! full post documents) with the same contract as the hosted API:
//! newest first, opaque continuation cursors, summaries on listing
//! pages. Used by tests and by offline runs behind `--fixture`.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use super::{ContentSource, SourceError};
use crate::content::{Post, PostRef};
use crate::helpers::date::parse_timestamp;
use crate::listing::{Cursor, ListingPage};

/// Content source backed by an in-memory list of posts
#[derive(Debug, Clone)]
pub struct FixtureSource {
    posts: Vec<Post>,
}

impl FixtureSource {
    /// Build a source over the given posts
    ///
    /// Posts are ordered newest first, like the hosted API; undated or
    /// unparseable dates sort to the end.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| instant(b).cmp(&instant(a)));
        Self { posts }
    }

    /// Load a fixture file: a JSON array of post documents
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let body = std::fs::read_to_string(path)?;
        let posts: Vec<Post> = serde_json::from_str(&body)?;
        tracing::debug!("loaded {} fixture posts from {:?}", posts.len(), path);
        Ok(Self::new(posts))
    }

    /// Number of posts served
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the fixture is empty
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn instant(post: &Post) -> Option<DateTime<FixedOffset>> {
    post.first_publication_date
        .as_deref()
        .and_then(|ts| parse_timestamp(ts).ok())
}

#[async_trait]
impl ContentSource for FixtureSource {
    async fn query_listing(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<ListingPage, SourceError> {
        // A zero page size would never advance the cursor
        let page_size = page_size.max(1);

        let start = match cursor {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| SourceError::Cursor(token.to_string()))?,
            None => 0,
        };
        let start = start.min(self.posts.len());
        let end = (start + page_size).min(self.posts.len());

        let results = self.posts[start..end].iter().map(Post::summary).collect();
        let next = if end < self.posts.len() {
            Cursor::HasMore(end.to_string())
        } else {
            Cursor::Exhausted
        };

        Ok(ListingPage { next, results })
    }

    async fn fetch_full_index(&self) -> Result<Vec<PostRef>, SourceError> {
        Ok(self.posts.iter().map(Post::to_ref).collect())
    }

    async fn fetch_by_uid(&self, uid: &str) -> Result<Post, SourceError> {
        self.posts
            .iter()
            .find(|post| post.uid == uid)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(uid.to_string()))
    }
}
