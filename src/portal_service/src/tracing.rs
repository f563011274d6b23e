use std::time::Duration;

use ::tracing::{Level, Span};
use axum::{body::Body, extract::Request, response::Response};
use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Install the global subscriber: compact fmt output filtered by `RUST_LOG`
/// (default `info`), with span traces captured for error reports.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}

/// Root span of one HTTP request. Uses the caller's `x-request-id` when
/// present, otherwise a fresh one.
pub fn make_span_with_request_id(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    ::tracing::span!(
        Level::INFO,
        "[REQUEST]",
        method = %request.method(),
        uri = %request.uri().path(),
        version = ?request.version(),
        request_id = %request_id,
    )
}

pub fn on_request(_request: &Request<Body>, _span: &Span) {
    ::tracing::event!(Level::INFO, "[REQUEST START]");
}

pub fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let status_code = status.as_u16();
    let status_code_class = status_code / 100;

    match status_code_class {
        4..=5 => {
            ::tracing::event!(
                Level::ERROR,
                latency = ?latency,
                status = status_code,
                "[REQUEST END]"
            )
        }
        _ => {
            ::tracing::event!(
                Level::INFO,
                latency = ?latency,
                status = status_code,
                "[REQUEST END]"
            )
        }
    };
}

