//! CORS tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use caption_gateway::{create_router, AppState, FlagSigner, MemoryStore, RouterConfig};

use super::test_utils::{get, talk_content, test_app, TEST_SECRET};

#[tokio::test]
async fn test_any_origin_allowed_by_default() {
    let app = test_app(talk_content());

    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://player.example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_preflight_allows_private_network() {
    let app = test_app(talk_content());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/flags/conf24/opening/en")
        .header("origin", "https://player.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .header("access-control-request-private-network", "true")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-private-network")
            .unwrap(),
        "true"
    );
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_configured_origins_restrict() {
    let state = AppState::new(
        std::sync::Arc::new(talk_content()),
        std::sync::Arc::new(MemoryStore::new()),
        FlagSigner::new(TEST_SECRET),
    );
    let router = create_router(
        state,
        RouterConfig::new()
            .with_cors_origins(vec!["https://player.example.com".to_string()])
            .with_tracing(false),
    );

    let allowed = Request::builder()
        .uri("/health")
        .header("origin", "https://player.example.com")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://player.example.com"
    );

    let other = Request::builder()
        .uri("/health")
        .header("origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(other).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_health() {
    let app = test_app(talk_content());
    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
