mod rate_limit;

use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use rihla_agents::PlannerAgent;
use rihla_catalog::{Catalog, CatalogStats};
use rihla_core::{Itinerary, ParsedQuery, PlanError, RegexQueryParser};
use rihla_narrative::Narrator;
use rihla_observability::AppMetrics;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::rate_limit::IpRateLimiter;

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<PlannerAgent<RegexQueryParser>>,
    pub catalog: Arc<Catalog>,
    pub narrator: Arc<Narrator>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: String,
    pub limiter: IpRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    narrator: &'static str,
    catalog: CatalogStats,
    metrics: rihla_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    query: Option<String>,
    narrative: Option<bool>,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    plan_id: String,
    parsed: ParsedQuery,
    itinerary: Itinerary,
    narrative: Vec<String>,
}

pub fn build_app(data_dir: impl AsRef<Path>) -> Result<Router> {
    let metrics = AppMetrics::shared();

    let catalog = Arc::new(
        Catalog::load_from_dir(data_dir).context("failed to load the reference catalog")?,
    );
    let narrator = Arc::new(Narrator::from_env());

    let stats = catalog.stats();
    info!(
        attractions = stats.attractions,
        hotels = stats.hotels,
        restaurants = stats.restaurants,
        narrator = narrator.kind(),
        "catalog ready"
    );

    let agent = Arc::new(PlannerAgent::new(
        RegexQueryParser::new(),
        catalog.clone(),
        narrator.clone(),
        metrics.clone(),
    ));

    let api_key = env::var("RIHLA_API_KEY").unwrap_or_else(|_| "dev-rihla-key".to_string());
    let rate_limit_window = Duration::from_secs(
        env::var("RIHLA_API_RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60),
    );
    let rate_limit_max = env::var("RIHLA_API_RATE_LIMIT_MAX")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(80);
    let allowed_origins = parse_allowed_origins();

    let state = ApiState {
        agent,
        catalog,
        narrator,
        metrics,
        api_key,
        limiter: IpRateLimiter::new(rate_limit_window, rate_limit_max),
        allowed_origins: Arc::new(allowed_origins),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/generate", post(generate))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
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
        narrator: state.narrator.kind(),
        catalog: state.catalog.stats(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let Some(query) = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "missing_query",
                "message": "provide a travel query in the \"query\" field"
            })),
        )
            .into_response();
    };

    let plan = match state.agent.plan(query) {
        Ok(plan) => plan,
        Err(error) => return plan_error_response(&error),
    };

    let narrative = if request.narrative.unwrap_or(true) {
        rihla_narrative::into_lines(&state.agent.narrate(&plan).await)
    } else {
        Vec::new()
    };

    (
        StatusCode::OK,
        Json(GenerateResponse {
            plan_id: plan.plan_id,
            parsed: plan.parsed,
            itinerary: plan.itinerary,
            narrative,
        }),
    )
        .into_response()
}

fn plan_error_response(error: &PlanError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "error": error.code(),
            "message": error.to_string()
        })),
    )
        .into_response()
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if request.method() == Method::OPTIONS || is_public_endpoint(path.as_str()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if header_key == state.api_key {
        return next.run(request).await;
    }

    // First-party browser traffic passes on its origin so the key never
    // has to ship inside static web assets.
    if request_origin_is_allowed(&state, request.headers()) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": "missing or invalid x-api-key, and request origin is not allowed"
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

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health")
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string()
        })
        .unwrap_or_else(|| "local".to_string())
}

fn request_origin_is_allowed(state: &ApiState, headers: &HeaderMap) -> bool {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .trim()
        .trim_end_matches('/');

    !origin.is_empty() && state.allowed_origins.iter().any(|value| value == origin)
}

fn parse_allowed_origins() -> Vec<String> {
    env::var("RIHLA_ALLOWED_ORIGINS")
        .ok()
        .map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:5173")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_health_is_public() {
        assert!(is_public_endpoint("/health"));
        assert!(!is_public_endpoint("/v1/generate"));
    }

    #[test]
    fn forwarded_ip_takes_the_first_hop() {
        let request = Request::builder()
            .uri("/v1/generate")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_ip(&request), "203.0.113.9");

        let bare = Request::builder()
            .uri("/v1/generate")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_ip(&bare), "local");
    }
}
