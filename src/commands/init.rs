//! Initialize a new waypost site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn run(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("fixtures"))?;

    // Create default _config.yml
    let config_content = r#"# Waypost Configuration

# Site
title: Waypost
subtitle: ''
author: ''
language: en

# Content API
# Base URL of the headless content API. While it is empty the fixture
# below is served instead.
api_url: ''
per_page: 3
timeout_secs: 10
fixture: fixtures/posts.json

# Preview
preview: false
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Sample fixture so list/show/server work before an API is configured
    let sample_posts = r#"[
  {
    "uid": "hello-waypost",
    "first_publication_date": "2021-03-15T19:25:28+0000",
    "title": "Hello Waypost",
    "subtitle": "Your first post, served from a local fixture",
    "author": "Waypost",
    "banner": {"url": ""},
    "content": [
      {
        "heading": "Welcome",
        "body": [
          {"type": "paragraph", "text": "This post comes from fixtures/posts.json. Point api_url at a content API to serve real documents instead."}
        ]
      },
      {
        "heading": "Next steps",
        "body": [
          {"type": "list-item", "text": "Run the list command to page through posts."},
          {"type": "list-item", "text": "Run the show command with a post uid."},
          {"type": "list-item", "text": "Start the server and open a listing session."}
        ]
      }
    ]
  },
  {
    "uid": "pagination-by-cursor",
    "first_publication_date": "2021-04-20T10:00:00+0000",
    "title": "Pagination by cursor",
    "subtitle": "Why the listing loads more instead of numbering pages",
    "author": "Waypost",
    "banner": {"url": ""},
    "content": [
      {
        "heading": null,
        "body": [
          {"type": "paragraph", "text": "Each listing page carries a continuation cursor. When it runs out, the load-more affordance disappears."}
        ]
      }
    ]
  },
  {
    "uid": "reading-time",
    "first_publication_date": "2021-05-02T08:30:00+0000",
    "title": "Reading time",
    "subtitle": "Two hundred words a minute, rounded up",
    "author": "Waypost",
    "banner": {"url": ""},
    "content": [
      {
        "heading": "How it is counted",
        "body": [
          {"type": "paragraph", "text": "Headings and body text are split on whitespace and summed; the total is divided by the reading speed and rounded up to whole minutes."}
        ]
      }
    ]
  }
]
"#;

    fs::write(target_dir.join("fixtures/posts.json"), sample_posts)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Waypost;

    #[test]
    fn test_init_writes_a_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("fixtures/posts.json").exists());

        // The generated site loads and serves its fixture
        let app = Waypost::new(dir.path()).unwrap();
        assert_eq!(app.config.per_page, 3);
        assert!(app.source().is_ok());
    }
}
