//! This module contains configuration for the [`Trace`] middleware from
//! [`tower_http`].
//!
//! The resulting type contains unique function types, and as such cannot be
//! spelled out in code. This is why we export a macro instead, which will just
//! expand to the final expression. The functions it calls are `pub(crate)` and
//! `#[doc(hidden)]` for that reason only.
//!
//! [`Trace`]: tower_http::trace::Trace

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request};
use axum::http::header;
use axum::response::Response;
use tower_http::classify::ServerErrorsFailureClass;
use uuid::Uuid;

/// Creates a middleware that will log incoming HTTP requests.
///
/// Every request gets its own span with a unique ID, and the response status
/// and latency are recorded on it once the response is ready.
macro_rules! layer {
	() => {
		tower_http::trace::TraceLayer::new_for_http()
			.make_span_with($crate::middleware::logging::make_span)
			.on_response($crate::middleware::logging::on_response)
			.on_failure($crate::middleware::logging::on_failure)
	};
}

pub(crate) use layer;

/// Creates the span for a request.
///
/// Headers are deliberately not recorded wholesale, as they carry session
/// cookies.
#[doc(hidden)]
pub(crate) fn make_span(request: &Request) -> tracing::Span
{
	let ip = match request.extensions().get::<ConnectInfo<SocketAddr>>() {
		None => String::from("N/A"),
		Some(ConnectInfo(addr)) => addr.ip().to_string(),
	};

	let user_agent = request
		.headers()
		.get(header::USER_AGENT)
		.and_then(|value| value.to_str().ok())
		.unwrap_or("N/A");

	tracing::info_span! {
		target: "pm_portal::http",
		"request",
		request.id = %Uuid::now_v7(),
		request.ip = %ip,
		request.method = %request.method(),
		request.path = %request.uri().path(),
		request.user_agent = %user_agent,
		response.status = tracing::field::Empty,
		latency = tracing::field::Empty,
	}
}

#[doc(hidden)]
pub(crate) fn on_response(response: &Response, latency: Duration, span: &tracing::Span)
{
	span.record("response.status", response.status().as_u16())
		.record("latency", format_args!("{latency:?}"));

	tracing::debug!(target: "pm_portal::http", "finished processing request");
}

#[doc(hidden)]
pub(crate) fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span)
{
	match failure {
		ServerErrorsFailureClass::Error(error) => {
			tracing::error!(target: "pm_portal::http", %error, ?latency, "request failed");
		}
		ServerErrorsFailureClass::StatusCode(status) => {
			tracing::error!(target: "pm_portal::http", %status, ?latency, "request failed");
		}
	}
}
