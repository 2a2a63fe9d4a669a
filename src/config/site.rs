//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // URL
    pub root: String,

    // Header
    pub logo: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,
    pub i18n_dir: String,

    /// Seconds before the cached first page is fetched again
    pub revalidate: u64,

    // Content source
    #[serde(default)]
    pub content: ContentConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            language: "pt-BR".to_string(),

            root: "/".to_string(),

            logo: "/images/logo.svg".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            i18n_dir: "languages".to_string(),

            revalidate: 60 * 3,

            content: ContentConfig::default(),
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

    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate)
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// API root, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: u32,
    /// Field names (without the type prefix) requested for listings
    pub fetch: Vec<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 20,
            fetch: vec![
                "title".to_string(),
                "subtitle".to_string(),
                "author".to_string(),
                "content".to_string(),
            ],
            timeout: 30,
        }
    }
}

impl ContentConfig {
    /// The `fetch` query value, e.g. `posts.title,posts.subtitle`
    pub fn fetch_fields(&self) -> String {
        self.fetch
            .iter()
            .map(|field| format!("{}.{}", self.document_type, field))
            .collect::<Vec<_>>()
            .join(",")
    }
}
