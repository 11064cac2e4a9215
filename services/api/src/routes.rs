use crate::assets::AssetRoot;
use crate::infra::AppState;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use jobnews::error::AppError;
use jobnews::http::PrettyJson;
use jobnews::provider::ProviderClient;
use jobnews::search::{
    JobSearchOutcome, JobSearchRequest, NewsSearchEnvelope, NewsSearchRequest, SearchGateways,
};
use serde_json::json;
use std::sync::Arc;

/// Full application: search API, operational endpoints, and the SPA fallback,
/// all carrying permissive CORS headers.
pub(crate) fn app_router<C>(gateways: Arc<SearchGateways<C>>, assets: AssetRoot) -> Router
where
    C: ProviderClient + 'static,
{
    let assets = Arc::new(assets);

    Router::new()
        .route("/api/search_jobs", get(search_jobs::<C>).options(preflight))
        .route("/api/search_news", get(search_news::<C>).options(preflight))
        .with_state(gateways)
        .route("/api/health", get(healthcheck))
        .route("/api/ready", get(readiness_endpoint))
        .route("/api/metrics", get(metrics_endpoint))
        .fallback(move |method: Method, uri: Uri| {
            let assets = assets.clone();
            async move { assets.respond(&method, uri.path()).await }
        })
        .layer(middleware::map_response(with_cors_headers))
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Decoded query string. The first non-empty value of a key wins; blank
/// values count as absent.
#[derive(Debug, Default)]
pub(crate) struct SearchParams(Vec<(String, String)>);

impl SearchParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, value)| name == key && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    fn query(&self) -> Result<String, AppError> {
        self.first("q")
            .map(str::to_string)
            .ok_or_else(AppError::missing_query)
    }

    fn number(&self, key: &str, default: u32) -> u32 {
        self.first(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    fn text(&self, key: &str, default: &str) -> String {
        self.first(key).unwrap_or(default).to_string()
    }

    fn job_request(&self) -> Result<JobSearchRequest, AppError> {
        Ok(JobSearchRequest::new(self.query()?).with_page(self.number("page", 1)))
    }

    fn news_request(&self) -> Result<NewsSearchRequest, AppError> {
        let defaults = NewsSearchRequest::new(self.query()?);
        Ok(NewsSearchRequest {
            limit: self.number("limit", defaults.limit),
            time_published: self.text("time_published", &defaults.time_published),
            country: self.text("country", &defaults.country),
            lang: self.text("lang", &defaults.lang),
            ..defaults
        })
    }
}

pub(crate) async fn search_jobs<C>(
    State(gateways): State<Arc<SearchGateways<C>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<PrettyJson<JobSearchOutcome>, AppError>
where
    C: ProviderClient + 'static,
{
    let request = SearchParams(params).job_request()?;
    Ok(PrettyJson::ok(gateways.jobs.search(&request).await))
}

pub(crate) async fn search_news<C>(
    State(gateways): State<Arc<SearchGateways<C>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<PrettyJson<NewsSearchEnvelope>, AppError>
where
    C: ProviderClient + 'static,
{
    let request = SearchParams(params).news_request()?;
    Ok(PrettyJson::ok(gateways.news.search(&request).await))
}

pub(crate) async fn healthcheck() -> PrettyJson<serde_json::Value> {
    PrettyJson::ok(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    PrettyJson(status, payload)
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
