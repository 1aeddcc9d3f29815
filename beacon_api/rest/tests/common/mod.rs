use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use beacon_api_rest::RestServer;
use beacon_core_contact_contracts::MockContactFeatureService;
use beacon_core_health_contracts::MockHealthFeatureService;
use serde_json::Value;
use tower::ServiceExt;

pub fn router(health: MockHealthFeatureService, contact: MockContactFeatureService) -> Router {
    RestServer::new(health, contact).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|value| value.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    TestResponse {
        status,
        request_id,
        body,
    }
}
