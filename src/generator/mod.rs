//! Generator module - exports the site as static HTML files

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::ContentClient;
use crate::helpers;
use crate::listing::{LoadOutcome, PostList};
use crate::views::Views;
use crate::Blog;

/// Static site generator
pub struct Generator {
    public_dir: PathBuf,
    static_dir: PathBuf,
    views: Views,
    client: ContentClient,
}

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub listing_pages: usize,
    pub posts: usize,
    pub assets: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            public_dir: blog.public_dir.clone(),
            static_dir: blog.static_dir.clone(),
            views: blog.views()?,
            client: blog.client()?,
        })
    }

    /// Generate the entire site
    ///
    /// Every listing page holds all posts loaded so far, the same state the
    /// home page reaches after that many loads.
    pub async fn generate(&self) -> Result<GenerateSummary> {
        fs::create_dir_all(&self.public_dir)?;

        let mut summary = GenerateSummary {
            assets: self.copy_static_assets()?,
            ..GenerateSummary::default()
        };

        let mut list = PostList::new(self.client.first_page().await?);
        self.write_listing(&list)?;
        summary.listing_pages += 1;

        loop {
            match list.load_more(&self.client).await {
                LoadOutcome::Appended { .. } => {
                    self.write_listing(&list)?;
                    summary.listing_pages += 1;
                }
                LoadOutcome::Exhausted => break,
                LoadOutcome::Stale => continue,
                LoadOutcome::Failed(notice) => {
                    bail!(
                        "Failed to load page {}: {}",
                        list.pages_loaded() + 1,
                        notice.detail
                    );
                }
            }
        }

        for uid in list.posts().iter().filter_map(|p| p.uid.as_deref()) {
            if self.generate_post(uid).await? {
                summary.posts += 1;
            }
        }

        self.write(Path::new("404.html"), &self.views.not_found()?)?;

        Ok(summary)
    }

    /// Write one post page; `false` when the post can't be exported
    async fn generate_post(&self, uid: &str) -> Result<bool> {
        let dir = helpers::encode_segment(uid);
        if dir.is_empty() || dir == "." || dir == ".." {
            tracing::warn!("Skipping post with unusable uid {:?}", uid);
            return Ok(false);
        }

        let Some(document) = self.client.post_by_uid(uid).await? else {
            tracing::warn!("Post {} disappeared while generating", uid);
            return Ok(false);
        };

        let output = Path::new("post").join(dir).join("index.html");
        self.write(&output, &self.views.post(&document)?)?;
        tracing::debug!("Generated post: {:?}", output);
        Ok(true)
    }

    fn write_listing(&self, list: &PostList) -> Result<()> {
        let output = if list.pages_loaded() == 1 {
            PathBuf::from("index.html")
        } else {
            Path::new("page")
                .join(list.pages_loaded().to_string())
                .join("index.html")
        };
        self.write(&output, &self.views.home(list, None)?)?;
        tracing::debug!("Generated: {:?}", output);
        Ok(())
    }

    fn write(&self, relative: &Path, html: &str) -> Result<()> {
        let path = self.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        Ok(())
    }

    /// Copy everything under the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        if !self.static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(&self.static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.static_dir)?;
            let dest = self.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}
