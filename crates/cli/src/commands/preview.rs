use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use folio_core::parse_site_toml;
use folio_generator::{Page, RenderOptions, load_biography, manifest_json, render_page};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::{SITE_TOML, load_site};

const MANIFEST: &str = "/manifest.webmanifest";

#[derive(Clone)]
struct AppState {
    site_path: PathBuf,
    static_files: ServeDir,
    reload_tx: broadcast::Sender<()>,
}

impl AppState {
    fn new(site_path: PathBuf, reload_tx: broadcast::Sender<()>) -> Self {
        Self {
            static_files: ServeDir::new(site_path.join("static")),
            site_path,
            reload_tx,
        }
    }
}

/// Start preview server with hot reload for local development.
///
/// Pages are re-rendered from site.toml on every request and served under the
/// site's `path_prefix`, the same URLs the built site uses. `static/` is
/// served as-is and file changes trigger a reload over SSE.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    let site = load_site(&path)?;

    println!("   ✓ Loaded: {}", site.config.site_title);
    println!("   ✓ Author: {}", site.config.author);

    let (reload_tx, _) = broadcast::channel::<()>(100);
    let app = router(AppState::new(path.clone(), reload_tx.clone()));

    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(path, watcher_tx).await {
            tracing::error!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!(
        "\n🚀 Preview ready at: http://localhost:{}{}",
        port,
        site.config.href("/")
    );
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/_reload", get(sse_handler))
        .fallback(site_handler)
        .with_state(state)
}

/// `path` relative to the site root, or `None` when it lies outside
/// `prefix`. `/blog`, `/blog/` and `/blog/about` are inside `blog`;
/// `/blogger` is not.
fn strip_path_prefix<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix('/')?.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Watch the site's inputs and trigger a reload when one changes
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let root = path.canonicalize().unwrap_or(path);
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        let relevant = matches!(
            event.kind,
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
        );
        if relevant && event.paths.iter().any(|p| should_reload(&root, p)) {
            println!("   📝 File changed, reloading...");
            let _ = reload_tx.send(());
        }
    }

    Ok(())
}

/// Only site.toml, `content/` and `static/` affect the preview. A build
/// output directory inside the site, editor backups and dotfiles are ignored.
fn should_reload(root: &Path, changed: &Path) -> bool {
    let Ok(relative) = changed.strip_prefix(root) else {
        return false;
    };
    let hidden = relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
    if hidden || relative.to_string_lossy().ends_with('~') {
        return false;
    }
    relative == Path::new(SITE_TOML)
        || relative.starts_with("content")
        || relative.starts_with("static")
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        while rx.recv().await.is_ok() {
            yield Ok(Event::default().data("reload"));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Render a page or the manifest from the current site.toml, otherwise serve
/// a file from `static/`.
async fn site_handler(State(state): State<AppState>, mut request: Request) -> Response {
    let site = match parse_site_toml(state.site_path.join(SITE_TOML)) {
        Ok(site) => site,
        Err(e) => return error_page(&e.to_string()),
    };

    let Some(path) = strip_path_prefix(&site.config.path_prefix, request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let path = path.to_string();

    if let Some(page) = Page::from_path(&path) {
        let biography = match load_biography(&site, &state.site_path) {
            Ok(biography) => biography,
            Err(e) => return error_page(&format!("{:#}", e)),
        };
        let options = RenderOptions {
            preview: true,
            ..RenderOptions::default()
        };
        return Html(render_page(&site, page, biography, &options)).into_response();
    }

    if path == MANIFEST {
        return match manifest_json(&site.config) {
            Ok(json) => ([(header::CONTENT_TYPE, "application/manifest+json")], json).into_response(),
            Err(e) => error_page(&e.to_string()),
        };
    }

    match path.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    }
    match state.static_files.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn error_page(message: &str) -> Response {
    tracing::warn!("preview render failed: {}", message);
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!(
            r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Configuration Error</h1>
<pre>{}</pre>
<script>new EventSource('/_reload').onmessage = () => location.reload();</script>
</body></html>"#,
            escaped
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use std::fs;
    use tempfile::TempDir;

    fn site_dir(path_prefix: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SITE_TOML),
            format!(
                r##"
[site]
path_prefix = "{path_prefix}"
title = "Test Site"
title_alt = "A test site"
title_short = "test"
url = "https://example.com"
description = "Testing"
author = "Tester"

[theme]
theme_color = "#5348FF"
background_color = "#2b2e3c"

[keywords]
skills = ["Rust"]
"##
            ),
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/robots.txt"), "User-agent: *").unwrap();
        dir
    }

    async fn fetch(dir: &TempDir, uri: &str) -> (StatusCode, String) {
        let (reload_tx, _) = broadcast::channel(1);
        let app = router(AppState::new(dir.path().to_path_buf(), reload_tx));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[test]
    fn test_strip_path_prefix() {
        assert_eq!(strip_path_prefix("/", "/about"), Some("/about"));
        assert_eq!(strip_path_prefix("", "/"), Some("/"));
        assert_eq!(strip_path_prefix("blog", "/blog"), Some("/"));
        assert_eq!(strip_path_prefix("/blog/", "/blog/"), Some("/"));
        assert_eq!(strip_path_prefix("blog", "/blog/about"), Some("/about"));
        assert_eq!(strip_path_prefix("blog", "/about"), None);
        assert_eq!(strip_path_prefix("blog", "/blogger"), None);
    }

    #[tokio::test]
    async fn test_pages_served_under_path_prefix() {
        let dir = site_dir("blog");

        let (status, body) = fetch(&dir, "/blog/about").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/blog/about""#));
        assert!(body.contains(r#"aria-current="page""#));

        let (status, _) = fetch(&dir, "/blog/about/").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = fetch(&dir, "/blog").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Test Site</title>"));

        let (status, _) = fetch(&dir, "/about").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_and_manifest_under_path_prefix() {
        let dir = site_dir("blog");

        let (status, body) = fetch(&dir, "/blog/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User-agent: *");

        let (status, body) = fetch(&dir, "/blog/manifest.webmanifest").await;
        assert_eq!(status, StatusCode::OK);
        let manifest: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(manifest["start_url"], "/blog/");

        let (status, _) = fetch(&dir, "/blog/missing.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_prefix_serves_trailing_slash() {
        let dir = site_dir("/");
        let (status, body) = fetch(&dir, "/projects/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Projects | Test Site</title>"));
        assert!(body.contains("/_reload"));
    }

    #[tokio::test]
    async fn test_broken_site_toml_shows_error_page() {
        let dir = site_dir("/");
        fs::write(dir.path().join(SITE_TOML), "[site]\ntitle = \"x\"\n").unwrap();
        let (status, body) = fetch(&dir, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Configuration Error"));
    }

    #[test]
    fn test_should_reload_ignores_output_and_hidden_files() {
        let root = Path::new("/site");
        assert!(should_reload(root, Path::new("/site/site.toml")));
        assert!(should_reload(root, Path::new("/site/content/about.md")));
        assert!(should_reload(root, Path::new("/site/static/images/logo.png")));
        assert!(!should_reload(root, Path::new("/site/dist/index.html")));
        assert!(!should_reload(root, Path::new("/site/content/.about.md.swp")));
        assert!(!should_reload(root, Path::new("/site/content/about.md~")));
        assert!(!should_reload(root, Path::new("/elsewhere/site.toml")));
    }
}
