//! waypost: a blog front-end engine for cursor-paginated headless
//! content APIs
//!
//! The crate fetches post listings and documents from a headless CMS,
//! accumulates listing pages as the reader asks for more, computes
//! reading times and chronological prev/next links, and hands plain
//! view models to whatever renders the pages.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod listing;
pub mod navigation;
pub mod server;
pub mod source;
pub mod view;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use source::{ContentSource, FixtureSource, HttpSource};

/// The main waypost application
#[derive(Clone)]
pub struct Waypost {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Waypost {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Build the configured content source
    ///
    /// A fixture path wins over the API endpoint, so offline runs never
    /// touch the network by accident.
    pub fn source(&self) -> Result<Arc<dyn ContentSource>> {
        if let Some(fixture) = &self.config.fixture {
            let path = if fixture.is_absolute() {
                fixture.clone()
            } else {
                self.base_dir.join(fixture)
            };
            tracing::debug!("serving content from fixture {:?}", path);
            return Ok(Arc::new(FixtureSource::from_file(&path)?));
        }

        if self.config.api_url.is_empty() {
            anyhow::bail!("no content source configured: set api_url or fixture in _config.yml");
        }
        let timeout = Duration::from_secs(self.config.timeout_secs);
        Ok(Arc::new(HttpSource::new(&self.config.api_url, timeout)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let app = Waypost::new(dir.path()).unwrap();
        assert_eq!(app.config.per_page, 3);
        assert_eq!(app.config.title, "Waypost");
    }

    #[test]
    fn test_source_requires_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let app = Waypost::new(dir.path()).unwrap();
        assert!(app.source().is_err());
    }

    #[test]
    fn test_fixture_path_resolves_against_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "fixture: posts.json\n").unwrap();
        std::fs::write(dir.path().join("posts.json"), "[]").unwrap();

        let app = Waypost::new(dir.path()).unwrap();
        assert!(app.source().is_ok());
    }

    #[test]
    fn test_api_url_builds_http_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "api_url: http://cms.local/api\n",
        )
        .unwrap();

        let app = Waypost::new(dir.path()).unwrap();
        assert!(app.source().is_ok());
    }
}
