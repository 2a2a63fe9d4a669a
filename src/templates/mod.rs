//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on for every
//! `.html` template since titles and authors come from the CMS.

use anyhow::Result;
use chrono::Locale;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer; dates are formatted for `locale`
    pub fn new(locale: Locale) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("error.html", include_str!("site/error.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
        ])?;

        tera.register_filter(
            "pub_date",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                pub_date_filter(value, locale)
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a raw publication timestamp, empty when unparseable
fn pub_date_filter(value: &tera::Value, locale: Locale) -> tera::Result<tera::Value> {
    let formatted = value
        .as_str()
        .and_then(|raw| helpers::publication_date(Some(raw), locale))
        .unwrap_or_default();
    Ok(tera::Value::String(formatted))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub stylesheet: String,
    pub home: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderData {
    pub logo: String,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    /// Position in the listing, used as the `post-{index}` anchor
    pub index: usize,
    pub href: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub published: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadMoreData {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    /// Pre-rendered HTML
    pub body: String,
}
