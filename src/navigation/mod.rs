//! Chronological post navigation
//!
//! Given the full index of published posts, find the ones published
//! immediately before and after the current post. The index may arrive
//! newest-first (the API default) or oldest-first; the scan orders the
//! entries itself rather than trusting the caller, so both neighbors
//! are truly adjacent whatever order the index came in.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::content::PostRef;
use crate::helpers::date::{parse_timestamp, InvalidDate};

/// Direction of a navigation link, with its fixed display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Label shown under the link text
    pub fn label(self) -> &'static str {
        match self {
            Direction::Previous => "Previous post",
            Direction::Next => "Next post",
        }
    }
}

/// A link to a neighboring post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    /// Target document uid
    pub uid: String,

    /// Link text
    pub title: String,

    /// Which side of the current post this neighbor sits on
    pub direction: Direction,
}

/// Both neighbors of a post
///
/// A missing side means no post exists in that direction and no link
/// is rendered for it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Neighbors {
    pub previous: Option<NavigationEntry>,
    pub next: Option<NavigationEntry>,
}

/// Locate the chronological neighbors of the current post
///
/// `previous` is the nearest post published strictly before
/// `current_date` and `next` the nearest published strictly after.
/// The current post's own uid and entries without a publication date
/// are skipped; posts sharing the exact instant sit on neither side.
/// An unparseable date anywhere in the index is an error.
pub fn neighbors(
    index: &[PostRef],
    current_uid: &str,
    current_date: &str,
) -> Result<Neighbors, InvalidDate> {
    let current = parse_timestamp(current_date)?;

    let mut dated: Vec<(DateTime<FixedOffset>, &PostRef)> = Vec::with_capacity(index.len());
    for post in index {
        if post.uid == current_uid {
            continue;
        }
        // Undated entries cannot be placed on the timeline
        let Some(ts) = post.first_publication_date.as_deref() else {
            continue;
        };
        dated.push((parse_timestamp(ts)?, post));
    }
    dated.sort_by_key(|(instant, _)| *instant);

    let previous = dated
        .iter()
        .rev()
        .find(|(instant, _)| *instant < current)
        .map(|(_, post)| entry(post, Direction::Previous));

    let next = dated
        .iter()
        .find(|(instant, _)| *instant > current)
        .map(|(_, post)| entry(post, Direction::Next));

    Ok(Neighbors { previous, next })
}

fn entry(post: &PostRef, direction: Direction) -> NavigationEntry {
    NavigationEntry {
        uid: post.uid.clone(),
        title: post.title.clone(),
        direction,
    }
}
