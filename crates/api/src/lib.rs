mod rate_limit;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use advisor_agents::Orchestrator;
use advisor_core::{hospitals_for, TravelerProfile};
use advisor_observability::{AppMetrics, MetricsSnapshot};
use advisor_search::config::who_base_url_from_env;
use advisor_search::{HealthStatsClient, LlmConfig, QueryService, SearchBackend};
use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use crate::rate_limit::IpRateLimiter;

const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX: usize = 60;
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator<SearchBackend>>,
    pub health_stats: HealthStatsClient,
    pub metrics: Arc<AppMetrics>,
    pub api_key: Option<String>,
    pub limiter: IpRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

impl ApiState {
    /// Open state: no API key, default rate limit, any origin.
    pub fn new(backend: SearchBackend, health_stats: HealthStatsClient) -> Self {
        let metrics = AppMetrics::shared();
        Self {
            orchestrator: Arc::new(Orchestrator::new(Arc::new(backend), metrics.clone())),
            health_stats,
            metrics,
            api_key: None,
            limiter: IpRateLimiter::new(
                Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
                DEFAULT_RATE_LIMIT_MAX,
            ),
            allowed_origins: Arc::new(Vec::new()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_rate_limit(mut self, window: Duration, max_requests: usize) -> Self {
        self.limiter = IpRateLimiter::new(window, max_requests);
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = Arc::new(origins);
        self
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    backend: &'static str,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct HospitalsRequest {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct IndicatorQuery {
    filter: Option<String>,
}

pub fn build_app() -> Result<Router> {
    let backend = SearchBackend::from_config(LlmConfig::from_env())
        .context("failed to initialize search backend")?;
    let health_stats = HealthStatsClient::new(who_base_url_from_env())
        .context("failed to initialize health statistics client")?;

    let window = Duration::from_secs(
        env::var("ADVISOR_RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
    );
    let max_requests = env::var("ADVISOR_RATE_LIMIT_MAX")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT_MAX);

    let mut state = ApiState::new(backend, health_stats)
        .with_rate_limit(window, max_requests)
        .with_allowed_origins(
            env::var("ADVISOR_ALLOWED_ORIGINS")
                .map(|value| parse_allowed_origins(&value))
                .unwrap_or_default(),
        );
    if let Some(api_key) = env::var("ADVISOR_API_KEY")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        state = state.with_api_key(api_key);
    }

    info!(
        backend = state.orchestrator.service().name(),
        agents = state.orchestrator.kinds().len(),
        api_key_required = state.api_key.is_some(),
        "api state ready"
    );

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
        .route("/api/agent/health_hospitals", post(hospitals))
        .route("/api/agent/:agent_type", post(run_agent))
        .route("/api/chat", post(chat))
        .route("/api/hospitals", post(hospitals))
        .route("/api/who/:indicator", get(who_indicator))
        .route("/api/who/:indicator/:country", get(who_country))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        backend: state.orchestrator.service().name(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn run_agent(
    State(state): State<ApiState>,
    Path(agent_type): Path<String>,
    payload: Result<Json<TravelerProfile>, JsonRejection>,
) -> Response {
    if !state.orchestrator.is_registered(&agent_type) {
        state.metrics.inc_unknown_agent();
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Unknown agent: {agent_type}"),
        );
    }

    let Json(profile) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let result = state.orchestrator.handle(&agent_type, &profile).await;
    Json(serde_json::json!({ "result": result })).into_response()
}

async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let query = match payload {
        Ok(Json(request)) => request.query.trim().to_string(),
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    if query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No query provided".to_string());
    }

    let response = state.orchestrator.chat(&query).await;
    Json(serde_json::json!({ "response": response })).into_response()
}

async fn hospitals(payload: Result<Json<HospitalsRequest>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(request)) => {
            Json(serde_json::json!({ "hospitals": hospitals_for(&request.country) }))
                .into_response()
        }
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    }
}

async fn who_indicator(
    State(state): State<ApiState>,
    Path(indicator): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> impl IntoResponse {
    Json(
        state
            .health_stats
            .indicator(&indicator, query.filter.as_deref())
            .await,
    )
}

async fn who_country(
    State(state): State<ApiState>,
    Path((indicator, country)): Path<(String, String)>,
) -> impl IntoResponse {
    Json(state.health_stats.country(&country, &indicator).await)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
}

fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health" | "/api/ping")
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if header_key == expected {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": "missing or invalid x-api-key"
        })),
    )
        .into_response()
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if !state.limiter.allow(&ip) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "rate limit exceeded for this IP"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_string())
}
