//! HTTP server rendering landing pages on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::{ContentOrigin, PageLoader};
use crate::generator::{publishable_slugs, Generator};
use crate::seo;
use crate::Landing;

/// Response header naming where the page content came from
pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

/// Server state
struct ServerState {
    app: Landing,
    loader: PageLoader,
    generator: Generator,
    static_dir: PathBuf,
}

/// Build the router for a site
pub fn router(app: &Landing) -> Result<Router> {
    let state = Arc::new(ServerState {
        app: app.clone(),
        loader: app.loader()?,
        generator: Generator::new(app)?,
        static_dir: app.static_dir.clone(),
    });

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(app: &Landing, ip: &str, port: u16, open: bool) -> Result<()> {
    let router = router(app)?;

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
    axum::serve(listener, router).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let slug = state.loader.default_slug().to_string();
    render_slug(&state, &slug).await
}

async fn robots_handler(State(state): State<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots::render(&state.app.config),
    )
        .into_response()
}

async fn sitemap_handler(State(state): State<Arc<ServerState>>) -> Response {
    let slugs = publishable_slugs(state.loader.default_slug(), state.loader.slugs().await);
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        state.generator.sitemap(&slugs),
    )
        .into_response()
}

/// Single-segment paths without an extension are page slugs; everything
/// else is served from the static directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    if let Some(slug) = slug_from_path(request.uri().path()) {
        return render_slug(&state, &slug).await;
    }

    let mut service = ServeDir::new(&state.static_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

async fn render_slug(state: &ServerState, slug: &str) -> Response {
    let page = state.loader.load(slug).await;

    match state.generator.render_page(&page) {
        Ok(html) => {
            let status = match page.origin {
                ContentOrigin::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::OK,
            };
            let mut response = (status, Html(html)).into_response();
            response.headers_mut().insert(
                CONTENT_SOURCE_HEADER,
                HeaderValue::from_static(page.origin.as_str()),
            );
            response
        }
        Err(e) => {
            tracing::error!("Failed to render '{}': {:#}", slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn slug_from_path(path: &str) -> Option<String> {
    let segment = path.trim_matches('/');
    if segment.is_empty() || segment.contains('/') || segment.contains('.') {
        return None;
    }

    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|slug| slug.into_owned())
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
