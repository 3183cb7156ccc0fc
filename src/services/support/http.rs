//! HTTP handlers for this service.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::{routing, Json, Router};

use super::{request_source, SupportRequest, SupportResponse, SupportService};
use crate::http::extract;
use crate::http::ProblemDetails;

impl From<SupportService> for Router
{
	fn from(svc: SupportService) -> Self
	{
		Router::new()
			.route("/api/support", routing::post(submit))
			.with_state(svc)
	}
}

/// Send a message to the support team.
#[tracing::instrument(skip(svc, headers), err(Debug, level = "debug"))]
async fn submit(
	State(svc): State<SupportService>,
	headers: HeaderMap,
	extract::Json(req): extract::Json<SupportRequest>,
) -> Result<Json<SupportResponse>, ProblemDetails>
{
	let response = svc.submit(req, request_source(&headers)).await?;

	Ok(Json(response))
}
