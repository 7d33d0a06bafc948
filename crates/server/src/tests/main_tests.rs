use super::*;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const MODULE_BYTES: &[u8] = b"\0asm\x01\0\0\0";

fn static_root() -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("visum_serve_test_{suffix}"));
    fs::create_dir_all(root.join("pkg")).expect("temp root");
    let files: [(&str, &[u8]); 3] = [
        ("index.html", b"<!doctype html><title>visum</title>"),
        ("app.wasm", MODULE_BYTES),
        ("pkg/web_bg.wasm", MODULE_BYTES),
    ];
    for (name, contents) in files {
        fs::write(root.join(name), contents).expect("fixture file");
    }
    root
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn healthz_reports_ok() {
    let root = static_root();
    let app = build_router(&root);

    let response = app.oneshot(get("/healthz")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn wasm_modules_are_served_as_application_wasm() {
    let root = static_root();
    let app = build_router(&root);

    for uri in ["/app.wasm", "/pkg/web_bg.wasm"] {
        let response = app.clone().oneshot(get(uri)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(content_type(&response), Some(WASM_MIME), "{uri}");
        let body = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(body.as_ref(), MODULE_BYTES);
    }

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn index_is_served_for_root_as_html() {
    let root = static_root();
    let app = build_router(&root);

    let response = app.oneshot(get("/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response)
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false));

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn missing_wasm_is_a_plain_404() {
    let root = static_root();
    let app = build_router(&root);

    let response = app.oneshot(get("/missing.wasm")).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_ne!(content_type(&response), Some(WASM_MIME));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn wasm_detection_uses_the_cleaned_path() {
    assert!(is_wasm_path("/app.wasm"));
    assert!(is_wasm_path("/pkg/./web_bg.wasm"));
    assert!(is_wasm_path("/x/../app.wasm/"));
    assert!(is_wasm_path("//app.wasm"));
    assert!(!is_wasm_path("/app.wasm.map"));
    assert!(!is_wasm_path("/index.html"));
}

#[test]
fn clean_path_never_escapes_root() {
    assert_eq!(clean_path("/../../etc/passwd"), "/etc/passwd");
    assert_eq!(clean_path(""), "/");
    assert_eq!(clean_path("/a/b/../c/"), "/a/c");
}

#[test]
fn cli_flags_override_loaded_settings() {
    let args = Args::parse_from(["visum-serve", "--addr", ":9090", "--dir", "dist"]);
    let settings = args.apply(Settings::default());
    assert_eq!(settings.bind_addr, ":9090");
    assert_eq!(settings.static_dir, PathBuf::from("dist"));

    let untouched = Args::parse_from(["visum-serve"]).apply(Settings::default());
    assert_eq!(untouched, Settings::default());
}

#[test]
fn sample_page_moves_subtitle_vertically() {
    let page = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../web/index.html");
    let html = fs::read_to_string(page).expect("sample page");

    assert!(html.contains("translateY(var(--subtitle-shift"));
    assert!(!html.contains("translateX(var(--subtitle-shift"));
    let ids = [
        "sticky-header",
        "menu-toggle",
        "header-menu",
        "theme-toggle",
        "bg-color",
    ];
    for id in ids {
        assert!(html.contains(&format!("id=\"{id}\"")), "{id}");
    }
}
