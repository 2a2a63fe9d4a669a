//! Content module - posts from the headless CMS

mod client;
mod error;
mod post;
mod richtext;

pub use client::{ContentClient, PageSource};
pub use error::ContentError;
pub use post::{ContentSection, Cursor, Post, PostData, PostDocument, PostDocumentData, PostPage};
pub use richtext::{render_blocks, RichTextBlock, Span, SpanData};

pub(crate) use post::DocumentPage;
