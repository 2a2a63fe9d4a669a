//! HTTP client for the headless CMS

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use super::{ContentError, Cursor, DocumentPage, PostDocument, PostPage};
use crate::config::ContentConfig;

/// Something that can resolve a cursor into the page it points at
pub trait PageSource {
    fn fetch_page(
        &self,
        cursor: &Cursor,
    ) -> impl Future<Output = Result<PostPage, ContentError>> + Send;
}

/// Content API client
///
/// Built from configuration and handed to whoever needs it; clones share
/// one connection pool.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    config: ContentConfig,
}

#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    value: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

impl ContentClient {
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        if config.endpoint.trim().is_empty() {
            return Err(ContentError::NoEndpoint);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Resolve the ref that identifies the published content
    pub async fn master_ref(&self) -> Result<String, ContentError> {
        let mut url = self.endpoint_url("")?;
        self.authorize(&mut url);

        let info: ApiInfo = self.get_json(url).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master)
            .map(|r| r.value)
            .ok_or_else(|| ContentError::NoMasterRef(self.config.endpoint.clone()))
    }

    /// First page of all documents of the configured type
    pub async fn first_page(&self) -> Result<PostPage, ContentError> {
        let master = self.master_ref().await?;
        let predicate = format!("[[at(document.type, \"{}\")]]", self.config.document_type);

        let mut url = self.search_url(&master, &predicate)?;
        url.query_pairs_mut()
            .append_pair("fetch", &self.config.fetch_fields())
            .append_pair("pageSize", &self.config.page_size.to_string());

        tracing::debug!("Querying first page: {}", url);
        let page: PostPage = self.get_json(url).await?;
        tracing::debug!(
            "First page: {} posts, more: {}",
            page.results.len(),
            page.next_page.is_some()
        );
        Ok(page)
    }

    /// Fetch one full document by uid; `None` when no such post exists
    pub async fn post_by_uid(&self, uid: &str) -> Result<Option<PostDocument>, ContentError> {
        if uid.is_empty() || uid.contains(['"', '\\']) {
            return Ok(None);
        }

        let master = self.master_ref().await?;
        let predicate = format!(
            "[[at(my.{}.uid, \"{}\")]]",
            self.config.document_type, uid
        );
        let url = self.search_url(&master, &predicate)?;

        let page: DocumentPage = self.get_json(url).await?;
        Ok(page.results.into_iter().next())
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ContentError> {
        let endpoint = self.config.endpoint.trim_end_matches('/');
        let raw = if path.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}/{}", endpoint, path)
        };
        Url::parse(&raw).map_err(|_| ContentError::InvalidEndpoint(raw))
    }

    fn search_url(&self, master: &str, predicate: &str) -> Result<Url, ContentError> {
        let mut url = self.endpoint_url("documents/search")?;
        url.query_pairs_mut()
            .append_pair("ref", master)
            .append_pair("q", predicate);
        self.authorize(&mut url);
        Ok(url)
    }

    fn authorize(&self, url: &mut Url) {
        if let Some(token) = &self.config.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ContentError> {
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status,
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl PageSource for ContentClient {
    async fn fetch_page(&self, cursor: &Cursor) -> Result<PostPage, ContentError> {
        let url = Url::parse(cursor.as_str())
            .map_err(|_| ContentError::InvalidCursor(cursor.to_string()))?;

        tracing::debug!("Fetching next page: {}", url);
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    async fn client() -> ContentClient {
        let base = testing::fake_cms().await;
        ContentClient::new(&testing::content_config(&base)).unwrap()
    }

    #[test]
    fn test_requires_endpoint() {
        let config = ContentConfig::default();
        assert!(matches!(
            ContentClient::new(&config),
            Err(ContentError::NoEndpoint)
        ));
    }

    #[tokio::test]
    async fn test_master_ref() {
        let client = client().await;
        assert_eq!(client.master_ref().await.unwrap(), testing::MASTER_REF);
    }

    #[tokio::test]
    async fn test_first_page() {
        let client = client().await;
        let page = client.first_page().await.unwrap();

        // The fake API rejects queries without ref, fetch and pageSize
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].uid.as_deref(), Some(testing::FIRST_UID));
        assert!(page.next_page.unwrap().contains("page=2"));
    }

    #[tokio::test]
    async fn test_follow_cursor_to_exhaustion() {
        let client = client().await;
        let first = client.first_page().await.unwrap();

        let second = client.fetch_page(&first.cursor().unwrap()).await.unwrap();
        assert_eq!(second.results[0].uid.as_deref(), Some(testing::SECOND_UID));
        assert_eq!(second.cursor(), None);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let base = testing::fake_cms().await;
        let client = ContentClient::new(&testing::content_config(&base)).unwrap();
        let cursor = Cursor::new(format!("{}/api/v2/documents/search?page=fail", base));

        match client.fetch_page(&cursor).await {
            Err(ContentError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let base = testing::fake_cms().await;
        let client = ContentClient::new(&testing::content_config(&base)).unwrap();
        let cursor = Cursor::new(format!("{}/api/v2/documents/search?page=broken", base));

        assert!(matches!(
            client.fetch_page(&cursor).await,
            Err(ContentError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_cursor() {
        let client = client().await;
        assert!(matches!(
            client.fetch_page(&Cursor::new("link")).await,
            Err(ContentError::InvalidCursor(_))
        ));
    }

    #[tokio::test]
    async fn test_post_by_uid() {
        let client = client().await;

        let doc = client.post_by_uid(testing::FIRST_UID).await.unwrap().unwrap();
        assert_eq!(doc.data.title, "Como utilizar Hooks");
        assert!(!doc.data.content.is_empty());

        assert!(client.post_by_uid("missing").await.unwrap().is_none());
        assert!(client.post_by_uid("bad\"uid").await.unwrap().is_none());
    }
}
