//! Local preview server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::is_relevant;
use crate::config::CONFIG_FILES;
use crate::helpers::decode_path;
use crate::Site;

/// Live reload client, injected before `</body>`
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
"#;

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve `public_dir`, optionally rebuilding and reloading on change
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: site.public_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    tracing::info!("Server running at {}", url);
    if watch {
        tracing::info!("Live reload enabled. Watching for changes...");
    }

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&site, reload_tx) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Regenerate on source or config changes and tell browsers to reload
fn watch_and_reload(site: &Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.source_dir);
    }
    for name in CONFIG_FILES {
        let path = site.base_dir.join(name);
        if path.exists() {
            debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events
            .iter()
            .map(|e| e.path.as_path())
            .filter(|p| is_relevant(p))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        match Site::new(&site.base_dir).and_then(|site| site.generate()) {
            Ok(()) => {
                tracing::info!("Regenerated");
                let _ = reload_tx.send(());
            }
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(()) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files, injecting the live reload client into HTML pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let file_path = resolve_path(&state.public_dir, request.uri().path());
    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to a file, so `/post` finds `post/index.html`
fn resolve_path(public_dir: &Path, path: &str) -> PathBuf {
    let decoded = decode_path(path);
    let clean_path = decoded.trim_start_matches('/');
    if clean_path.split('/').any(|segment| segment == "..") {
        return public_dir.join("404.html");
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        candidate.join("index.html")
    } else if candidate.exists() {
        candidate
    } else {
        let with_html = public_dir.join(format!("{}.html", clean_path));
        if with_html.exists() {
            with_html
        } else {
            candidate
        }
    }
}

fn inject_live_reload(html: &str) -> String {
    match html.rfind("</body>") {
        Some(pos) => format!("{}{}{}", &html[..pos], LIVE_RELOAD_SCRIPT, &html[pos..]),
        None => format!("{}{}", html, LIVE_RELOAD_SCRIPT),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("/__livereload"));
        assert!(html.ends_with("</script>\n</body></html>"));

        let bare = inject_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p><script>"));
    }

    #[test]
    fn test_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("post/a")).unwrap();
        fs::write(public.join("post/index.html"), "").unwrap();
        fs::write(public.join("post/a/index.html"), "").unwrap();
        fs::write(public.join("atom.xml"), "").unwrap();

        assert_eq!(resolve_path(public, "/post"), public.join("post/index.html"));
        assert_eq!(resolve_path(public, "/post/a/"), public.join("post/a/index.html"));
        assert_eq!(resolve_path(public, "/atom.xml"), public.join("atom.xml"));
        assert_eq!(resolve_path(public, "/../etc/passwd"), public.join("404.html"));
        assert_eq!(resolve_path(public, "/%2e%2e/etc/passwd"), public.join("404.html"));
    }

    #[test]
    fn test_resolve_encoded_post_path() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("post/q&a")).unwrap();
        fs::write(public.join("post/q&a/index.html"), "").unwrap();

        assert_eq!(resolve_path(public, "/post/q%26a/"), public.join("post/q&a/index.html"));
    }
}
