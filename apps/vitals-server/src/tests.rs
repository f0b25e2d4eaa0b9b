//! HTTP endpoint tests for the vitals server.
//!
//! These drive the real router through axum-test: page rendering, parameter
//! clamping, the delayed image endpoint's timing and error bodies, and the
//! server-side render delay.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use axum::{routing::get, Router};
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use crate::{api, pages, AppState};

/// SOI + EOI only; the endpoint streams bytes without decoding them.
const JPEG_STUB: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

static TEMP_SEQ: AtomicU32 = AtomicU32::new(0);

fn write_temp_image() -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "vitals-image-{}-{}.jpeg",
        std::process::id(),
        TEMP_SEQ.fetch_add(1, Ordering::Relaxed),
    ));
    std::fs::write(&path, JPEG_STUB).unwrap();
    path
}

/// Create a test server with the full router
fn create_test_server(image_path: PathBuf) -> TestServer {
    let state = AppState { image_path };

    let app = Router::new()
        .route("/health", get(api::handle_health))
        .route("/", get(pages::handle_index))
        .route("/cls", get(pages::handle_cls))
        .route("/inp", get(pages::handle_inp))
        .route("/lcp", get(pages::handle_lcp))
        .route("/api/image", get(api::handle_image))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn missing_image() -> PathBuf {
    std::env::temp_dir().join("vitals-image-that-does-not-exist.jpeg")
}

#[tokio::test]
async fn test_health_returns_200() {
    let server = create_test_server(missing_image());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "vitals-server");
}

#[tokio::test]
async fn test_index_links_the_emulators() {
    let server = create_test_server(missing_image());
    let response = server.get("/").await;
    response.assert_status_ok();

    let body = response.text();
    for path in ["/cls", "/inp", "/lcp"] {
        assert!(body.contains(path), "index should link {}", path);
    }
}

#[tokio::test]
async fn test_cls_page_shows_the_clamped_ratio() {
    let server = create_test_server(missing_image());

    let body = server.get("/cls?CLS=0,8").await.text();
    assert!(body.contains("id=\"cls-root\""));
    assert!(body.contains("0.8"), "comma separator should parse");

    let body = server.get("/cls?CLS=2.4").await.text();
    assert!(body.contains("~100vh"), "ratio should clamp to 1");

    let body = server.get("/cls?CLS=banner").await.text();
    assert!(body.contains("~0vh"), "garbage should default to 0");
}

#[tokio::test]
async fn test_inp_page_falls_back_to_sync_mode() {
    let server = create_test_server(missing_image());

    let body = server.get("/inp?INP=200&mode=bogus").await.text();
    assert!(body.contains(">sync<"));
    assert!(body.contains("emulate 200ms"));

    let body = server.get("/inp?INP=200&mode=setTimeout").await.text();
    assert!(body.contains(">setTimeout<"));
}

#[tokio::test]
async fn test_lcp_image_mode_routes_through_the_delay_endpoint() {
    let server = create_test_server(missing_image());

    let body = server.get("/lcp?LCP=3000").await.text();
    assert!(body.contains("src=\"/api/image?delay=3000\""));

    // Unknown mode falls back to image mode.
    let body = server.get("/lcp?LCP=3000&mode=bogus").await.text();
    assert!(body.contains("src=\"/api/image?delay=3000\""));

    // Negative values clamp to zero before reaching the endpoint.
    let body = server.get("/lcp?LCP=-5").await.text();
    assert!(body.contains("src=\"/api/image?delay=0\""));
}

#[tokio::test]
async fn test_lcp_server_mode_delays_the_render() {
    let server = create_test_server(missing_image());

    let start = Instant::now();
    let response = server.get("/lcp?LCP=150&mode=server").await;
    let elapsed = start.elapsed();

    response.assert_status_ok();
    assert!(
        elapsed.as_millis() >= 150,
        "render returned after {:?}, expected >= 150ms",
        elapsed
    );

    let body = response.text();
    assert!(
        body.contains("src=\"data:image/svg+xml;charset=utf-8,"),
        "server mode should embed the placeholder graphic"
    );
}

#[tokio::test]
async fn test_image_endpoint_waits_for_the_requested_delay() {
    let image = write_temp_image();
    let server = create_test_server(image.clone());

    let start = Instant::now();
    let response = server.get("/api/image?delay=100").await;
    let elapsed = start.elapsed();

    response.assert_status_ok();
    assert!(
        elapsed.as_millis() >= 100,
        "returned after {:?}, expected >= 100ms",
        elapsed
    );
    assert!(
        elapsed.as_millis() < 600,
        "returned after {:?}, expected well under a second",
        elapsed
    );

    std::fs::remove_file(image).ok();
}

#[tokio::test]
async fn test_image_endpoint_clamps_negative_and_garbage_delays() {
    let image = write_temp_image();
    let server = create_test_server(image.clone());

    for query in ["delay=-5", "delay=junk", ""] {
        let start = Instant::now();
        let response = server.get(&format!("/api/image?{}", query)).await;
        response.assert_status_ok();
        assert!(
            start.elapsed().as_millis() < 100,
            "'{}' should behave like delay=0",
            query
        );
    }

    std::fs::remove_file(image).ok();
}

#[tokio::test]
async fn test_image_endpoint_sets_content_type_and_no_store() {
    let image = write_temp_image();
    let server = create_test_server(image.clone());

    let response = server.get("/api/image?delay=0").await;
    response.assert_status_ok();

    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        headers.get("cache-control").unwrap().to_str().unwrap(),
        "no-store, max-age=0, must-revalidate"
    );
    assert_eq!(response.as_bytes().as_ref(), JPEG_STUB);

    std::fs::remove_file(image).ok();
}

#[tokio::test]
async fn test_missing_image_yields_json_404() {
    let server = create_test_server(missing_image());

    let response = server.get("/api/image?delay=0").await;
    assert_eq!(response.status_code().as_u16(), 404);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "Image not found");
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "error body should carry a human-readable message"
    );
}

#[tokio::test]
async fn test_missing_image_error_is_not_cacheable() {
    let server = create_test_server(missing_image());

    let response = server.get("/api/image?delay=0").await;
    let headers = response.headers();
    assert_eq!(
        headers.get("cache-control").unwrap().to_str().unwrap(),
        "no-store, max-age=0, must-revalidate"
    );
}
