use std::time::Duration;

use advisor_api::{build_router, ApiState};
use advisor_core::DetailLevel;
use advisor_search::{HealthStatsClient, SearchBackend, StubSearch};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn state(stub: &StubSearch) -> ApiState {
    let health_stats =
        HealthStatsClient::new("http://127.0.0.1:9").expect("client should build");
    ApiState::new(SearchBackend::stub(stub.clone()), health_stats)
}

fn app(stub: &StubSearch) -> Router {
    build_router(state(stub))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn ping_and_health_are_public() {
    let stub = StubSearch::fixed("unused");
    let app = build_router(state(&stub).with_api_key("secret"));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "status": "ok" }));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let parsed = read_json(response).await;
    assert_eq!(parsed["backend"], "stub");
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn agent_endpoint_wraps_result() {
    let stub = StubSearch::fixed("Bring a raincoat.");
    let response = app(&stub)
        .oneshot(post_json(
            "/api/agent/health",
            json!({ "country": "India", "planned_stay": "15", "gender": "female" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "result": "Bring a raincoat." })
    );
    assert_eq!(stub.last_call().unwrap().detail, DetailLevel::Detailed);
}

#[tokio::test]
async fn unknown_agent_is_a_bad_request() {
    let stub = StubSearch::fixed("unused");
    let response = app(&stub)
        .oneshot(post_json("/api/agent/weather", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Unknown agent: weather" })
    );
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn zero_day_stay_uses_the_default_week() {
    let stub = StubSearch::fixed("ok");
    let app = app(&stub);
    let profile = json!({ "nationality": "Indian", "country": "Germany", "planned_stay": 0 });

    app.clone()
        .oneshot(post_json("/api/agent/compliance", profile.clone()))
        .await
        .unwrap();
    assert!(stub
        .last_call()
        .unwrap()
        .query
        .contains("Business Visa requirements for 7 days"));

    app.oneshot(post_json("/api/agent/health", profile))
        .await
        .unwrap();
    let call = stub.last_call().unwrap();
    assert_eq!(call.detail, DetailLevel::Detailed);
    assert!(call.query.contains("for several days"));
}

#[tokio::test]
async fn currency_agent_returns_code_object() {
    let stub = StubSearch::fixed("The ISO code is EUR for German nationals.");
    let response = app(&stub)
        .oneshot(post_json(
            "/api/agent/currency_agent",
            json!({ "nationality": "German" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "result": { "currency": "EUR" } })
    );
}

#[tokio::test]
async fn travel_without_country_answers_locally() {
    let stub = StubSearch::fixed("unused");
    let response = app(&stub)
        .oneshot(post_json("/api/agent/travel", json!({ "city": "Lyon" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert!(parsed["result"].as_str().is_some_and(|text| !text.is_empty()));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn service_failure_is_reported_inside_result() {
    let stub = StubSearch::failing("upstream unavailable");
    let response = app(&stub)
        .oneshot(post_json("/api/agent/compliance", json!({ "country": "UK" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "result": "Search service error: upstream unavailable" })
    );
}

#[tokio::test]
async fn chat_forwards_query_and_rejects_empty() {
    let stub = StubSearch::fixed("Yes, a visa is required.");
    let app = app(&stub);

    let response = app
        .clone()
        .oneshot(post_json("/api/chat", json!({ "query": "Do I need a visa?" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "response": "Yes, a visa is required." })
    );

    let response = app
        .oneshot(post_json("/api/chat", json!({ "query": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stub.calls().len(), 1);
}

#[tokio::test]
async fn hospitals_lookup_uses_directory() {
    let stub = StubSearch::fixed("unused");
    let app = app(&stub);

    let response = app
        .clone()
        .oneshot(post_json("/api/hospitals", json!({ "country": "Germany" })))
        .await
        .unwrap();
    let parsed = read_json(response).await;
    assert_eq!(parsed["hospitals"].as_array().map(Vec::len), Some(3));

    let response = app
        .oneshot(post_json("/api/hospitals", json!({ "country": "Peru" })))
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({ "hospitals": [] }));
}

#[tokio::test]
async fn agent_scoped_hospital_path_wins_over_agent_names() {
    let stub = StubSearch::fixed("unused");
    let response = app(&stub)
        .oneshot(post_json(
            "/api/agent/health_hospitals",
            json!({ "country": "India" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["hospitals"].as_array().map(Vec::len), Some(3));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn who_failure_is_reported_not_raised() {
    let stub = StubSearch::fixed("unused");
    let response = app(&stub)
        .oneshot(
            Request::builder()
                .uri("/api/who/WHOSIS_000001/USA")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["indicator"], "WHOSIS_000001");
    assert_eq!(parsed["records_found"], 0);
    assert!(parsed.get("error").is_some());
}

#[tokio::test]
async fn api_key_is_enforced_when_configured() {
    let stub = StubSearch::fixed("ok");
    let app = build_router(state(&stub).with_api_key("secret"));

    let response = app
        .clone()
        .oneshot(post_json("/api/agent/health", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut request = post_json("/api/agent/health", json!({}));
    request
        .headers_mut()
        .insert("x-api-key", "secret".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_rejects_burst_from_one_ip() {
    let stub = StubSearch::fixed("ok");
    let app = build_router(state(&stub).with_rate_limit(Duration::from_secs(60), 1));

    let first = app
        .clone()
        .oneshot(post_json("/api/hospitals", json!({ "country": "UK" })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json("/api/hospitals", json!({ "country": "UK" })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
