use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use beacon_core_contact_contracts::MockContactFeatureService;
use beacon_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;

async fn get_health(status: HealthStatus) -> common::TestResponse {
    let health = MockHealthFeatureService::new().with_get_status(status);
    let router = common::router(health, MockContactFeatureService::new());

    common::send(
        router,
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await
}

#[tokio::test]
async fn healthy() {
    let response = get_health(HealthStatus {
        email_configured: true,
        email: true,
    })
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"http": true, "email_configured": true, "email": true})
    );
}

#[tokio::test]
async fn smtp_unreachable() {
    let response = get_health(HealthStatus {
        email_configured: true,
        email: false,
    })
    .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body,
        json!({"http": true, "email_configured": true, "email": false})
    );
}

#[tokio::test]
async fn email_not_configured() {
    let response = get_health(HealthStatus {
        email_configured: false,
        email: false,
    })
    .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["email_configured"], json!(false));
}
