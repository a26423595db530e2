//! View models handed to the rendering layer
//!
//! Pages are rendered elsewhere; this module only assembles the plain
//! data a renderer needs: formatted dates, reading minutes, keyed
//! content sections, neighbor links and the state of the load-more
//! affordance. Everything serializes and nothing here talks to the
//! network.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::date::{format_display, InvalidDate};
use crate::listing::{ListingSession, SessionPhase};
use crate::navigation::{NavigationEntry, Neighbors};

/// One card on the listing page
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Formatted publication date; absent when the document carries none
    pub published_on: Option<String>,
}

/// The listing page
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    /// Every accumulated post, in the order the API returned them
    pub posts: Vec<PostCard>,
    /// Whether the load-more trigger should be offered
    pub can_load_more: bool,
    /// A fetch is outstanding; the trigger stays withdrawn meanwhile
    pub fetching: bool,
    /// The last fetch failed; prior results are intact and a retry is
    /// allowed
    pub failed: bool,
    /// Show the exit-preview affordance
    pub preview: bool,
}

impl ListingView {
    /// Assemble the view for a session's current state
    pub fn from_session(session: &ListingSession, config: &SiteConfig) -> Result<Self, InvalidDate> {
        let results = &session.listing().results;
        let mut posts = Vec::with_capacity(results.len());
        for summary in results {
            let published_on = match summary.first_publication_date.as_deref() {
                Some(ts) => Some(format_display(ts, &config.language)?),
                None => None,
            };
            posts.push(PostCard {
                uid: summary.uid.clone(),
                title: summary.title.clone(),
                subtitle: summary.subtitle.clone(),
                author: summary.author.clone(),
                published_on,
            });
        }

        Ok(Self {
            posts,
            can_load_more: session.can_load_more(),
            fetching: session.phase() == SessionPhase::Fetching,
            failed: session.phase() == SessionPhase::Failed,
            preview: config.preview,
        })
    }
}

/// One content section of the post page
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    /// Stable render key: slugified heading plus position
    pub key: String,
    pub heading: Option<String>,
    /// Pre-rendered rich-text markup
    pub body_html: String,
}

/// A link to a chronological neighbor
#[derive(Debug, Clone, Serialize)]
pub struct NavLinkView {
    pub uid: String,
    pub title: String,
    /// Fixed label for the link's side
    pub label: &'static str,
}

impl NavLinkView {
    fn from_entry(entry: NavigationEntry) -> Self {
        Self {
            label: entry.direction.label(),
            uid: entry.uid,
            title: entry.title,
        }
    }
}

/// The post page
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    /// Formatted publication date; absent when the document carries none
    pub published_on: Option<String>,
    /// Estimated minutes to read
    pub reading_minutes: u32,
    /// Content sections with stable render keys
    pub sections: Vec<SectionView>,
    pub previous: Option<NavLinkView>,
    pub next: Option<NavLinkView>,
    /// Show the exit-preview affordance
    pub preview: bool,
}

impl PostView {
    /// Assemble the post page from a fetched document and its neighbors
    pub fn build(post: &Post, neighbors: Neighbors, config: &SiteConfig) -> Result<Self, InvalidDate> {
        let published_on = match post.first_publication_date.as_deref() {
            Some(ts) => Some(format_display(ts, &config.language)?),
            None => None,
        };

        let sections = post
            .content
            .iter()
            .enumerate()
            .map(|(position, block)| SectionView {
                key: block.key(position),
                heading: block.heading.clone(),
                body_html: block.body.as_html(),
            })
            .collect();

        Ok(Self {
            uid: post.uid.clone(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            banner_url: post.banner.url.clone(),
            published_on,
            reading_minutes: post.reading_time(),
            sections,
            previous: neighbors.previous.map(NavLinkView::from_entry),
            next: neighbors.next.map(NavLinkView::from_entry),
            preview: config.preview,
        })
    }
}
