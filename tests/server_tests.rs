use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tutorgen::{
    router,
    testing::{MockGenerateResult, MockModel},
    AppState, ModelListing, ProxyError, FALLBACK_TEXT,
};

const APP_URL: &str = "http://localhost:4321";

fn app_with(model: &Arc<MockModel>) -> Router {
    router(AppState::with_model(model.clone()), APP_URL)
}

fn generate_request(topic: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-tutorial")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "request": topic })).unwrap(),
        ))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn liveness_endpoint_reports_ok() {
    let model = Arc::new(MockModel::new());
    let response = app_with(&model).oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn generation_returns_single_text_block_body() {
    let model = Arc::new(MockModel::new());
    model.enqueue_generate(MockGenerateResult::text("<h1>Traits</h1>"));

    let response = app_with(&model)
        .oneshot(generate_request("traits"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "content": [{ "type": "text", "text": "<h1>Traits</h1>" }] })
    );
}

#[tokio::test]
async fn missing_key_fails_both_upstream_endpoints_with_500() {
    for request in [generate_request("rust"), get_request("/api/list-models")] {
        let app = router(AppState::unconfigured(), APP_URL);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("GEMINI_API_KEY"), "got: {error}");
    }
}

#[tokio::test]
async fn upstream_429_passes_status_and_message_through() {
    let model = Arc::new(MockModel::new());
    model.enqueue_generate(MockGenerateResult::error(ProxyError::Upstream(
        StatusCode::TOO_MANY_REQUESTS,
        "Quota exceeded".to_string(),
    )));

    let response = app_with(&model)
        .oneshot(generate_request("rust"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await, json!({ "error": "Quota exceeded" }));
}

#[tokio::test]
async fn blank_topic_is_a_400_without_an_upstream_call() {
    let model = Arc::new(MockModel::new());

    let response = app_with(&model)
        .oneshot(generate_request("   "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(model.generate_calls(), 0);
}

#[tokio::test]
async fn zero_candidates_still_succeed_with_fallback_text() {
    let model = Arc::new(MockModel::new());
    model.enqueue_generate(MockGenerateResult::empty());

    let response = app_with(&model)
        .oneshot(generate_request("rust"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"][0]["text"], FALLBACK_TEXT);
}

#[tokio::test]
async fn list_models_passes_parsed_upstream_json_through() {
    let model = Arc::new(MockModel::new());
    let listing = json!({ "models": [{ "name": "models/gemini-2.0-flash-exp" }] });
    model.enqueue_list(Ok(ModelListing::Parsed(listing.clone())));

    let response = app_with(&model)
        .oneshot(get_request("/api/list-models"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, listing);
}

#[tokio::test]
async fn list_models_wraps_unparseable_bodies_as_raw() {
    let model = Arc::new(MockModel::new());
    model.enqueue_list(Ok(ModelListing::Raw {
        raw: "<html>maintenance</html>".to_string(),
    }));

    let response = app_with(&model)
        .oneshot(get_request("/api/list-models"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "raw": "<html>maintenance</html>" })
    );
}
