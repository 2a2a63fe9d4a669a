//! Shared fixtures for unit tests

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ContentConfig;
use crate::content::{ContentError, Cursor, PageSource, Post, PostData, PostPage};

pub const MASTER_REF: &str = "YF0master";
pub const FIRST_UID: &str = "como-utilizar-hooks";
pub const SECOND_UID: &str = "criando-um-app-cra-do-zero";

pub fn post(uid: &str, title: &str) -> Post {
    Post {
        uid: Some(uid.to_string()),
        first_publication_date: Some("2021-03-25T19:27:35+0000".to_string()),
        data: PostData {
            title: title.to_string(),
            subtitle: format!("{} subtitle", title),
            author: "Danilo Vieira".to_string(),
        },
    }
}

pub fn page(next_page: Option<&str>, results: Vec<Post>) -> PostPage {
    PostPage {
        next_page: next_page.map(str::to_string),
        results,
    }
}

/// In-memory page source keyed by cursor; a `None` entry answers with malformed JSON
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<String, Option<PostPage>>,
}

impl StubSource {
    pub fn with(mut self, cursor: &str, page: PostPage) -> Self {
        self.pages.insert(cursor.to_string(), Some(page));
        self
    }

    pub fn malformed(mut self, cursor: &str) -> Self {
        self.pages.insert(cursor.to_string(), None);
        self
    }
}

impl PageSource for StubSource {
    async fn fetch_page(&self, cursor: &Cursor) -> Result<PostPage, ContentError> {
        match self.pages.get(cursor.as_str()) {
            Some(Some(page)) => Ok(page.clone()),
            Some(None) => Err(serde_json::from_str::<PostPage>("{\"results\":").unwrap_err().into()),
            None => Err(ContentError::InvalidCursor(cursor.to_string())),
        }
    }
}

/// Bind an ephemeral port, build the router with its base URL and serve it
pub async fn spawn_server<F>(build: F) -> String
where
    F: FnOnce(String) -> Router,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = build(base.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

pub fn content_config(base: &str) -> ContentConfig {
    ContentConfig {
        endpoint: format!("{}/api/v2", base),
        ..ContentConfig::default()
    }
}

/// A two-page content API: page 1 holds the hooks post, page 2 the CRA post
pub async fn fake_cms() -> String {
    spawn_server(|base| {
        Router::new()
            .route("/api/v2", get(api_info))
            .route("/api/v2/documents/search", get(search))
            .with_state(Arc::new(base))
    })
    .await
}

async fn api_info() -> Json<serde_json::Value> {
    Json(json!({
        "refs": [
            {"id": "preview", "ref": "YF0preview", "isMasterRef": false},
            {"id": "master", "ref": MASTER_REF, "label": "Master", "isMasterRef": true}
        ]
    }))
}

async fn search(
    State(base): State<Arc<String>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let param = |key: &str| params.get(key).map(String::as_str);

    match param("page") {
        Some("fail") => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("broken") => return "{\"next_page\": ".into_response(),
        Some("2") => {
            return Json(json!({
                "page": 2,
                "next_page": null,
                "results": [document(SECOND_UID, "Criando um app CRA do zero")]
            }))
            .into_response()
        }
        _ => {}
    }

    if param("ref") != Some(MASTER_REF) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let q = param("q").unwrap_or_default();
    if q.contains("my.posts.uid") {
        let results = if q.contains(FIRST_UID) {
            vec![document(FIRST_UID, "Como utilizar Hooks")]
        } else {
            Vec::new()
        };
        return Json(json!({ "next_page": null, "results": results })).into_response();
    }

    if q != "[[at(document.type, \"posts\")]]"
        || param("fetch") != Some("posts.title,posts.subtitle,posts.author,posts.content")
        || param("pageSize") != Some("20")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    Json(json!({
        "page": 1,
        "next_page": format!("{}/api/v2/documents/search?page=2&ref={}", base, MASTER_REF),
        "results": [document(FIRST_UID, "Como utilizar Hooks")]
    }))
    .into_response()
}

fn document(uid: &str, title: &str) -> serde_json::Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": "2021-03-15T19:25:28+0000",
        "data": {
            "title": title,
            "subtitle": "Pensando em sincronização em vez de ciclos de vida",
            "author": "Joseph Oliveira",
            "content": [{
                "heading": "Proin et varius",
                "body": [
                    {"type": "paragraph", "text": "Lorem ipsum dolor sit amet", "spans": [
                        {"start": 0, "end": 5, "type": "strong"}
                    ]}
                ]
            }]
        }
    })
}
