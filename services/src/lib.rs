use crate::api::FileManagerApi;
use crate::commands::Commands;
use crate::config::Config;
use crate::storage::StorageBackend;
use axum::{
    Router,
    extract::{Extension, Request},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, get},
};
use opentelemetry::{global, propagation::Extractor};
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod storage;
pub mod telemetry;

struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Builds the service router around a file manager facade.
pub fn routes<S, C>(api: FileManagerApi<S, C>, config: Config) -> Router
where
    S: StorageBackend,
    C: Commands,
{
    Router::new()
        .route("/is-health", get(health_check))
        .nest("/api/files", api::routes::<S, C>())
        .fallback(any(catch_all))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let parent_context = global::get_text_map_propagator(|propagator| {
                    propagator.extract(&HeaderExtractor(request.headers()))
                });

                let span = tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                );

                span.set_parent(parent_context);

                span
            }),
        )
        .layer(Extension(config))
        .with_state(api)
}

async fn health_check(Extension(config): Extension<Config>) -> impl IntoResponse {
    let mut response = (StatusCode::OK, "OK").into_response();

    let env_value = config.environment().to_string();
    response.headers_mut().insert(
        HeaderName::from_static("x-service-env"),
        HeaderValue::from_str(&env_value).unwrap_or(HeaderValue::from_static("unknown")),
    );

    let version_value = config.environment().version_label();
    response.headers_mut().insert(
        HeaderName::from_static("x-service-version"),
        HeaderValue::from_str(&version_value).unwrap_or(HeaderValue::from_static("unknown")),
    );

    response
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
