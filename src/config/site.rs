//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Language for date display, `en` or `pt-br`
    pub language: String,

    // Content API
    /// Base URL of the headless content API
    pub api_url: String,
    /// Posts fetched per listing page
    pub per_page: usize,
    /// Request timeout in seconds for API calls
    pub timeout_secs: u64,
    /// Local JSON fixture served instead of the API when set
    pub fixture: Option<PathBuf>,

    // Preview
    /// Show draft documents and the exit-preview affordance
    pub preview: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Waypost".to_string(),
            subtitle: String::new(),
            author: String::new(),
            language: "en".to_string(),

            api_url: String::new(),
            per_page: 3,
            timeout_secs: 10,
            fixture: None,

            preview: false,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Waypost");
        assert_eq!(config.per_page, 3);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.language, "en");
        assert!(config.api_url.is_empty());
        assert!(!config.preview);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: spacetraveling
language: pt-br
api_url: http://cms.local/api
per_page: 5
timeout_secs: 30
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "spacetraveling");
        assert_eq!(config.language, "pt-br");
        assert_eq!(config.api_url, "http://cms.local/api");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let yaml = "title: Blog\ncustom_thing: 42\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("custom_thing"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Loaded\nper_page: 7\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Loaded");
        assert_eq!(config.per_page, 7);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(SiteConfig::load("/no/such/_config.yml").is_err());
    }
}
