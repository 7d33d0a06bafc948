use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use clap::Parser;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, normalize_bind_addr, Settings};

const WASM_MIME: &str = "application/wasm";

/// Development server for the Visum web directory.
#[derive(Parser, Debug)]
struct Args {
    /// Listen address, e.g. `:8080` or `127.0.0.1:3000`.
    #[arg(long)]
    addr: Option<String>,
    /// Directory to serve.
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(addr) = self.addr {
            settings.bind_addr = addr;
        }
        if let Some(dir) = self.dir {
            settings.static_dir = dir;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Args::parse().apply(load_settings());
    let bind_addr = normalize_bind_addr(&settings.bind_addr);
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("invalid listen address '{bind_addr}'"))?;

    if !settings.static_dir.is_dir() {
        warn!(dir = %settings.static_dir.display(), "static directory does not exist");
    }

    let app = build_router(&settings.static_dir);
    info!(dir = %settings.static_dir.display(), %addr, "serving static files");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(static_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(wasm_content_type))
}

async fn healthz() -> &'static str {
    "ok"
}

/// Browsers refuse streaming instantiation unless the module is served as
/// `application/wasm`.
async fn wasm_content_type(request: Request, next: Next) -> Response {
    let is_wasm = is_wasm_path(request.uri().path());
    let mut response = next.run(request).await;
    if is_wasm && response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(WASM_MIME));
    }
    response
}

fn is_wasm_path(path: &str) -> bool {
    clean_path(path).ends_with(".wasm")
}

/// Lexical cleanup of a URL path: collapses repeated slashes, drops `.`
/// segments, resolves `..` and strips any trailing slash.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
