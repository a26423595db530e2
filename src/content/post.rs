//! Post models
//!
//! Two document shapes come back from the content API: the summary
//! used on listing pages and the full document used on post pages.
//! [`PostRef`] is the slim index entry the navigator scans. Publication
//! dates stay in their wire form here; unpublished documents carry none.

use serde::{Deserialize, Serialize};

use super::RichText;

/// A post as it appears in listing results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Document uid, also the URL slug
    pub uid: String,

    /// Publication timestamp as delivered by the API
    pub first_publication_date: Option<String>,

    /// Post title
    pub title: String,

    /// Short description shown on the card
    pub subtitle: String,

    /// Author display name
    pub author: String,
}

/// Banner image attached to a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    /// Image URL
    #[serde(default)]
    pub url: String,
}

/// One content section of a post: an optional heading plus rich text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Section heading, absent for lead-in sections
    #[serde(default)]
    pub heading: Option<String>,

    /// Section body
    #[serde(default)]
    pub body: RichText,
}

impl ContentBlock {
    /// Stable render key for this section
    ///
    /// Derived from the slugified heading plus the section position, so
    /// the same document always yields the same keys across renders.
    pub fn key(&self, position: usize) -> String {
        match self.heading.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(heading) => format!("{}-{}", slug::slugify(heading), position),
            None => format!("section-{}", position),
        }
    }
}

/// A full post document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Document uid, also the URL slug
    pub uid: String,

    /// Publication timestamp as delivered by the API
    pub first_publication_date: Option<String>,

    /// Post title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub subtitle: String,

    /// Author display name
    #[serde(default)]
    pub author: String,

    /// Banner image
    #[serde(default)]
    pub banner: Banner,

    /// Ordered content sections
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl Post {
    /// The listing-shaped view of this post
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
        }
    }

    /// The index entry the navigator scans
    pub fn to_ref(&self) -> PostRef {
        PostRef {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date.clone(),
            title: self.title.clone(),
        }
    }

    /// Estimated reading time in whole minutes
    pub fn reading_time(&self) -> u32 {
        crate::helpers::estimate(&self.content)
    }
}

/// Slim index entry for chronological navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRef {
    /// Document uid
    pub uid: String,

    /// Publication timestamp as delivered by the API
    pub first_publication_date: Option<String>,

    /// Post title, shown as the link text
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_key_is_stable() {
        let block = ContentBlock {
            heading: Some("Getting Started".to_string()),
            body: RichText::default(),
        };
        assert_eq!(block.key(0), "getting-started-0");
        assert_eq!(block.key(0), "getting-started-0");
        assert_eq!(block.key(3), "getting-started-3");
    }

    #[test]
    fn test_block_key_without_heading_uses_position() {
        let block = ContentBlock::default();
        assert_eq!(block.key(2), "section-2");

        let blank = ContentBlock {
            heading: Some("   ".to_string()),
            body: RichText::default(),
        };
        assert_eq!(blank.key(5), "section-5");
    }

    #[test]
    fn test_duplicate_headings_get_distinct_keys() {
        let block = ContentBlock {
            heading: Some("Notes".to_string()),
            body: RichText::default(),
        };
        assert_ne!(block.key(1), block.key(4));
    }

    #[test]
    fn test_summary_and_ref_carry_the_date() {
        let post = Post {
            uid: "hello".to_string(),
            first_publication_date: Some("2021-03-15T19:25:28+00:00".to_string()),
            title: "Hello".to_string(),
            subtitle: "A first post".to_string(),
            author: "Ana".to_string(),
            banner: Banner::default(),
            content: Vec::new(),
        };

        let summary = post.summary();
        assert_eq!(summary.uid, "hello");
        assert_eq!(summary.first_publication_date, post.first_publication_date);

        let entry = post.to_ref();
        assert_eq!(entry.title, "Hello");
        assert_eq!(entry.first_publication_date, post.first_publication_date);
    }
}
