//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Json, Router};

use super::{Health, HealthService};

impl From<HealthService> for Router
{
	fn from(svc: HealthService) -> Self
	{
		Router::new()
			.route("/api/health", routing::get(get))
			.with_state(svc)
	}
}

/// Reports that the portal is up, and which version is running.
#[tracing::instrument(level = "trace")]
async fn get(State(svc): State<HealthService>) -> Json<Health>
{
	Json(svc.status())
}
