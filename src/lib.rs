//! spacetraveling: a small blog front-end over a headless CMS
//!
//! Posts come from a Prismic-style content API. The home page lists them and
//! grows one page at a time; each post links to its own page. The site can
//! be served over HTTP or exported as static HTML.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod listing;
pub mod server;
pub mod templates;
pub mod views;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// Language overrides directory
    pub i18n_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance with an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let i18n_dir = base_dir.join(&config.i18n_dir);

        Self {
            config,
            base_dir,
            public_dir,
            static_dir,
            i18n_dir,
        }
    }

    /// A content client for this site's CMS
    pub fn client(&self) -> Result<content::ContentClient> {
        Ok(content::ContentClient::new(&self.config.content)?)
    }

    /// UI strings in the site language, with local overrides applied
    pub fn i18n(&self) -> Result<i18n::I18n> {
        let mut i18n = i18n::I18n::new(&self.config.language);
        i18n.load_languages(&self.i18n_dir)?;
        Ok(i18n)
    }

    pub fn views(&self) -> Result<views::Views> {
        views::Views::new(&self.config, self.i18n()?)
    }

    /// Export the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert_eq!(blog.public_dir, dir.path().join("public"));
        assert_eq!(blog.static_dir, dir.path().join("static"));
        // No endpoint configured
        assert!(blog.client().is_err());
    }

    #[test]
    fn test_new_with_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "public_dir: out\ncontent:\n  endpoint: https://repo.cdn.prismic.io/api/v2\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.public_dir, dir.path().join("out"));
        assert!(blog.client().is_ok());
    }

    #[test]
    fn test_language_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("languages")).unwrap();
        fs::write(
            dir.path().join("languages/pt-BR.yml"),
            "load_more: Ver mais\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.i18n().unwrap().get("load_more"), "Ver mais");
    }
}
