//! HTTP handlers for this service.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{routing, Json, Router};

use super::LayoutService;
use crate::access::RequestContext;

impl From<LayoutService> for Router
{
	fn from(svc: LayoutService) -> Self
	{
		Router::new()
			.route("/api/layout", routing::get(get))
			.route("/", routing::get(get))
			.route("/dashboard", routing::get(get))
			.route("/dashboard/*rest", routing::get(get))
			.with_state(svc)
	}
}

/// Layout data for the current page.
#[tracing::instrument(level = "debug", skip_all)]
async fn get(State(svc): State<LayoutService>, context: RequestContext) -> Response
{
	Json(svc.layout(context.user())).into_response()
}
