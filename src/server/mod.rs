//! HTTP server rendering the site on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::FirstPageCache;
use crate::content::ContentClient;
use crate::listing::{LoadOutcome, PostList};
use crate::views::Views;
use crate::Blog;

/// Shared, read-mostly server state
pub struct ServerState {
    client: ContentClient,
    views: Views,
    first_page: FirstPageCache,
    static_dir: PathBuf,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            client: blog.client()?,
            views: blog.views()?,
            first_page: FirstPageCache::new(blog.config.revalidate_after()),
            static_dir: blog.static_dir.clone(),
        })
    }
}

/// Build the site router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/page/:pages", get(listing_handler))
        .route("/page/:pages/", get(listing_handler))
        .route("/post/:uid", get(post_handler))
        .route("/post/:uid/", get(post_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    render_listing(&state, 1).await
}

async fn listing_handler(
    State(state): State<Arc<ServerState>>,
    Path(pages): Path<usize>,
) -> Response {
    if pages == 0 {
        return not_found(&state);
    }
    render_listing(&state, pages).await
}

/// Render the listing with `pages` pages loaded
///
/// The list is seeded from the first page and grown one load at a time, so a
/// failed load keeps everything loaded before it and raises the alert.
async fn render_listing(state: &ServerState, pages: usize) -> Response {
    let initial = match state
        .first_page
        .get_or_refresh(|| state.client.first_page())
        .await
    {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to fetch first page: {}", e);
            return unavailable(state);
        }
    };

    let mut list = PostList::new(initial);
    let mut notice = None;

    while list.pages_loaded() < pages {
        match list.load_more(&state.client).await {
            LoadOutcome::Appended { .. } => {}
            LoadOutcome::Failed(failure) => {
                notice = Some(failure);
                break;
            }
            LoadOutcome::Exhausted | LoadOutcome::Stale => break,
        }
    }

    html_page(StatusCode::OK, state.views.home(&list, notice.as_ref()))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(uid): Path<String>,
) -> Response {
    match state.client.post_by_uid(&uid).await {
        Ok(Some(document)) => html_page(StatusCode::OK, state.views.post(&document)),
        Ok(None) => not_found(&state),
        Err(e) => {
            tracing::error!("Failed to fetch post {}: {}", uid, e);
            unavailable(&state)
        }
    }
}

/// Serve static assets, or the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => not_found(&state),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(state: &ServerState) -> Response {
    html_page(StatusCode::NOT_FOUND, state.views.not_found())
}

fn unavailable(state: &ServerState) -> Response {
    html_page(StatusCode::BAD_GATEWAY, state.views.unavailable())
}

fn html_page(status: StatusCode, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
