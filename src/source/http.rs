//! HTTP content source
//!
//! Consumes the hosted content API. Listing pages come from the
//! documents endpoint; continuation is the API's own next-page URL,
//! carried around as the opaque cursor token and fetched verbatim.
//! Cursors never come from clients, only from prior API responses.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

use super::{ContentSource, SourceError};
use crate::content::{Banner, ContentBlock, Post, PostRef, PostSummary};
use crate::listing::{Cursor, ListingPage};

/// Characters escaped when a uid is embedded in a URL path segment
const UID_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// Page size used when walking the full index
const INDEX_PAGE_SIZE: usize = 100;

/// Upper bound on index pages walked in one call
const MAX_INDEX_PAGES: usize = 1000;

/// HTTP consumer of the content API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpSource {
    /// Build a source for the configured API endpoint
    ///
    /// Every request carries the given timeout, so a hung API turns
    /// into a retryable failure instead of a load-more trigger that
    /// never answers.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn listing_url(&self, page_size: usize) -> String {
        format!("{}/documents?type=post&page_size={}", self.api_url, page_size)
    }

    fn document_url(&self, uid: &str) -> String {
        format!(
            "{}/documents/{}",
            self.api_url,
            utf8_percent_encode(uid, UID_SEGMENT)
        )
    }

    async fn get_json(&self, url: &str) -> Result<String, SourceError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn query_listing(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> Result<ListingPage, SourceError> {
        let url = match cursor {
            // The token is the next-page URL the API handed back
            Some(token) => token.to_string(),
            None => self.listing_url(page_size),
        };
        parse_listing(&self.get_json(&url).await?)
    }

    async fn fetch_full_index(&self) -> Result<Vec<PostRef>, SourceError> {
        let mut refs = Vec::new();
        let mut url = self.listing_url(INDEX_PAGE_SIZE);

        for _ in 0..MAX_INDEX_PAGES {
            let raw: ApiListing = serde_json::from_str(&self.get_json(&url).await?)?;
            refs.extend(raw.results.into_iter().map(into_ref));
            match raw.next_page {
                Some(next) => url = next,
                None => return Ok(refs),
            }
        }

        tracing::warn!("full index walk stopped after {} pages", MAX_INDEX_PAGES);
        Ok(refs)
    }

    async fn fetch_by_uid(&self, uid: &str) -> Result<Post, SourceError> {
        let url = self.document_url(uid);
        match self.get_json(&url).await {
            Ok(body) => parse_document(&body),
            Err(SourceError::Status { status: 404, .. }) => {
                Err(SourceError::NotFound(uid.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

/// Listing response as the API sends it
#[derive(Debug, Deserialize)]
struct ApiListing {
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    results: Vec<ApiDocument>,
}

/// One document in an API response
#[derive(Debug, Deserialize)]
struct ApiDocument {
    uid: String,
    #[serde(default)]
    first_publication_date: Option<String>,
    #[serde(default)]
    data: ApiData,
}

/// The document payload; every field may be absent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiData {
    title: String,
    subtitle: String,
    author: String,
    banner: Banner,
    content: Vec<ContentBlock>,
}

fn parse_listing(body: &str) -> Result<ListingPage, SourceError> {
    let raw: ApiListing = serde_json::from_str(body)?;
    Ok(ListingPage {
        next: Cursor::from_next_page(raw.next_page),
        results: raw.results.into_iter().map(into_summary).collect(),
    })
}

fn parse_document(body: &str) -> Result<Post, SourceError> {
    let doc: ApiDocument = serde_json::from_str(body)?;
    Ok(into_post(doc))
}

fn into_summary(doc: ApiDocument) -> PostSummary {
    PostSummary {
        uid: doc.uid,
        first_publication_date: doc.first_publication_date,
        title: doc.data.title,
        subtitle: doc.data.subtitle,
        author: doc.data.author,
    }
}

fn into_ref(doc: ApiDocument) -> PostRef {
    PostRef {
        uid: doc.uid,
        first_publication_date: doc.first_publication_date,
        title: doc.data.title,
    }
}

fn into_post(doc: ApiDocument) -> Post {
    Post {
        uid: doc.uid,
        first_publication_date: doc.first_publication_date,
        title: doc.data.title,
        subtitle: doc.data.subtitle,
        author: doc.data.author,
        banner: doc.data.banner,
        content: doc.data.content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpSource {
        HttpSource::new("http://cms.local/api/", Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_listing_url_strips_trailing_slash() {
        assert_eq!(
            source().listing_url(3),
            "http://cms.local/api/documents?type=post&page_size=3"
        );
    }

    #[test]
    fn test_document_url_escapes_uid() {
        assert_eq!(
            source().document_url("como-utilizar-hooks"),
            "http://cms.local/api/documents/como-utilizar-hooks"
        );
        assert_eq!(
            source().document_url("weird uid/x"),
            "http://cms.local/api/documents/weird%20uid%2Fx"
        );
    }

    #[test]
    fn test_parse_listing_page() {
        let body = r#"{
            "next_page": "http://cms.local/api/documents?type=post&page_size=2&after=xyz",
            "results": [
                {
                    "uid": "first",
                    "first_publication_date": "2021-03-15T19:25:28+0000",
                    "data": {"title": "First", "subtitle": "One", "author": "Ana"}
                },
                {
                    "uid": "second",
                    "first_publication_date": "2021-03-10T08:00:00+0000",
                    "data": {"title": "Second", "subtitle": "Two", "author": "Bruno"}
                }
            ]
        }"#;

        let page = parse_listing(body).unwrap();
        assert!(page.next.has_more());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].uid, "first");
        assert_eq!(page.results[0].title, "First");
        assert_eq!(page.results[1].author, "Bruno");
    }

    #[test]
    fn test_parse_listing_final_page() {
        let body = r#"{"next_page": null, "results": []}"#;
        let page = parse_listing(body).unwrap();
        assert_eq!(page.next, Cursor::Exhausted);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_parse_listing_tolerates_sparse_documents() {
        // No data payload and no publication date
        let body = r#"{"next_page": null, "results": [{"uid": "bare"}]}"#;
        let page = parse_listing(body).unwrap();
        assert_eq!(page.results[0].uid, "bare");
        assert_eq!(page.results[0].first_publication_date, None);
        assert_eq!(page.results[0].title, "");
    }

    #[test]
    fn test_parse_listing_rejects_bad_json() {
        assert!(matches!(
            parse_listing("not json"),
            Err(SourceError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_document() {
        let body = r#"{
            "uid": "hello",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": "Hello",
                "subtitle": "A first post",
                "author": "Ana",
                "banner": {"url": "http://images.local/banner.png"},
                "content": [
                    {
                        "heading": "Intro",
                        "body": [{"type": "paragraph", "text": "Welcome aboard."}]
                    }
                ]
            }
        }"#;

        let post = parse_document(body).unwrap();
        assert_eq!(post.uid, "hello");
        assert_eq!(post.banner.url, "http://images.local/banner.png");
        assert_eq!(post.content.len(), 1);
        assert_eq!(post.content[0].heading.as_deref(), Some("Intro"));
        assert_eq!(post.content[0].body.as_text(), "Welcome aboard.");
    }
}
