//! Post and page models, shaped like the content API's JSON

use serde::{Deserialize, Serialize};
use std::fmt;

use super::richtext::RichTextBlock;

/// A blog post as listed on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier used to build the post link
    #[serde(default)]
    pub uid: Option<String>,

    /// Publication timestamp, e.g. `2021-03-25T19:27:35+0000`
    #[serde(default)]
    pub first_publication_date: Option<String>,

    pub data: PostData,
}

/// Fields shown for each post in the listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    /// URL of the next page; `None` on the last page
    #[serde(default)]
    pub next_page: Option<String>,

    #[serde(default)]
    pub results: Vec<Post>,
}

impl PostPage {
    pub fn cursor(&self) -> Option<Cursor> {
        self.next_page.clone().map(Cursor::new)
    }
}

/// Opaque reference to the next page of a paginated query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A full post, as fetched for its own page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    pub data: PostDocumentData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDocumentData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: Vec<ContentSection>,
}

/// A headed section of a post body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

impl PostDocument {
    /// The listing view of this document
    pub fn summary(&self) -> Post {
        Post {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date.clone(),
            data: PostData {
                title: self.data.title.clone(),
                subtitle: self.data.subtitle.clone(),
                author: self.data.author.clone(),
            },
        }
    }
}

/// Result page for single-document queries
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentPage {
    #[serde(default)]
    pub results: Vec<PostDocument>,
}
