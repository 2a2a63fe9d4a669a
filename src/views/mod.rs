//! Page views: turn posts and listing state into HTML

use anyhow::Result;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{render_blocks, Post, PostDocument};
use crate::helpers;
use crate::i18n::I18n;
use crate::listing::{Notice, PostList};
use crate::templates::{
    HeaderData, LoadMoreData, PostCard, SectionData, SiteData, TemplateRenderer,
};

/// Renders every page of the site
pub struct Views {
    config: SiteConfig,
    i18n: I18n,
    renderer: TemplateRenderer,
}

impl Views {
    pub fn new(config: &SiteConfig, i18n: I18n) -> Result<Self> {
        let renderer = TemplateRenderer::new(helpers::locale_for(&config.language))?;
        Ok(Self {
            config: config.clone(),
            i18n,
            renderer,
        })
    }

    /// The home listing; the load-more link appears only while the list has more
    pub fn home(&self, list: &PostList, notice: Option<&Notice>) -> Result<String> {
        let mut context = self.base_context(notice);

        let posts: Vec<PostCard> = list
            .posts()
            .iter()
            .enumerate()
            .map(|(index, post)| self.card(index, post))
            .collect();

        let load_more = list.has_more().then(|| LoadMoreData {
            href: format!(
                "{}#post-{}",
                helpers::listing_url(&self.config, list.pages_loaded() + 1),
                list.posts().len()
            ),
            label: self.i18n.get("load_more"),
        });

        context.insert("posts", &posts);
        context.insert("load_more", &load_more);
        self.renderer.render("index.html", &context)
    }

    /// A single post with its content sections
    pub fn post(&self, document: &PostDocument) -> Result<String> {
        let mut context = self.base_context(None);

        let sections: Vec<SectionData> = document
            .data
            .content
            .iter()
            .map(|section| SectionData {
                heading: section.heading.clone(),
                body: render_blocks(&section.body),
            })
            .collect();

        context.insert("post", &self.card(0, &document.summary()));
        context.insert("sections", &sections);
        context.insert("back_label", &self.i18n.get("back_home"));
        self.renderer.render("post.html", &context)
    }

    pub fn not_found(&self) -> Result<String> {
        self.error(404, &self.i18n.get("not_found"))
    }

    pub fn unavailable(&self) -> Result<String> {
        self.error(502, &self.i18n.get("unavailable"))
    }

    fn error(&self, status: u16, message: &str) -> Result<String> {
        let mut context = self.base_context(None);
        context.insert("status", &status);
        context.insert("message", message);
        context.insert("back_label", &self.i18n.get("back_home"));
        self.renderer.render("error.html", &context)
    }

    fn base_context(&self, notice: Option<&Notice>) -> Context {
        let site = SiteData {
            title: self.config.title.clone(),
            language: self.config.language.clone(),
            stylesheet: helpers::url_for(&self.config, "styles.css"),
            home: helpers::url_for(&self.config, ""),
        };
        let header = HeaderData {
            logo: helpers::url_for(&self.config, &self.config.logo),
            alt: self.i18n.format("logo_alt", &self.config.title),
        };
        // Failure details stay in the logs
        let notice = notice.map(|_| self.i18n.get("load_error"));

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("header", &header);
        context.insert("notice", &notice);
        context
    }

    fn card(&self, index: usize, post: &Post) -> PostCard {
        PostCard {
            index,
            href: post
                .uid
                .as_deref()
                .map(|uid| helpers::post_url(&self.config, uid)),
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
            published: post.first_publication_date.clone(),
        }
    }
}
