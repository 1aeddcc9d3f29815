use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use beacon::{email, environment};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let config = beacon_config::load_paths(&[] as &[PathBuf]).unwrap();
    let email = email::connect(&config.email).unwrap();
    let router = environment::rest_server(&config, email).router();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn contact_without_smtp_server() {
    let (status, body) = send(
        Request::post("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.com","message":"hello"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Email service is not configured. Please try again later.",
        })
    );
}

#[tokio::test]
async fn validation_runs_before_configuration_check() {
    let (status, body) = send(
        Request::post("/api/contact")
            .body(Body::from(r#"{"email":"a@b.com"}"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!({"message": ["Message is required"]}));
}

#[tokio::test]
async fn health_without_smtp_server() {
    let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({"http": true, "email_configured": false, "email": false})
    );
}
