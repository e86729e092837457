//! Caption passthrough tests.

use axum::http::StatusCode;
use tower::ServiceExt;

use super::test_utils::{body_bytes, get, talk_content, test_app, MockContentSource, TALK_VTT};

#[tokio::test]
async fn test_captions_served_verbatim() {
    let app = test_app(talk_content());

    let response = app
        .router
        .oneshot(get("/captions/conf24/opening/en"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/vtt; charset=utf-8"
    );

    let body = body_bytes(response).await;
    assert_eq!(&body[..], TALK_VTT.as_bytes());
    assert_eq!(app.content.requested_paths().await, vec!["conf24/opening.en.vtt"]);
}

#[tokio::test]
async fn test_captions_not_validated() {
    // Not WebVTT, not UTF-8: still passed through untouched
    let raw: &[u8] = b"\xff\xfegarbage\r\n";
    let content = MockContentSource::new().with_document("conf24/opening.de.vtt", raw.to_vec());
    let app = test_app(content);

    let response = app
        .router
        .oneshot(get("/captions/conf24/opening/de"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], raw);
}

#[tokio::test]
async fn test_missing_captions_is_404() {
    let app = test_app(talk_content());

    let response = app
        .router
        .oneshot(get("/captions/conf24/opening/fr"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.content.request_count(), 1);
}
