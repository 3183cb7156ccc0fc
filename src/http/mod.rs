//! HTTP utilities shared by all services.
//!
//! This includes the error response format ([`ProblemDetails`]), wrappers
//! around axum's extractors, and the fallback handler for unknown routes.

use axum::http::Uri;
use thiserror::Error;

pub mod problem_details;
pub use problem_details::ProblemDetails;

pub mod extract;

use self::problem_details::{IntoProblemDetails, ProblemType};

/// A request was made for a path that no service handles.
#[derive(Debug, Error)]
#[error("no route matches `{path}`")]
pub struct RouteNotFound
{
	/// The requested path.
	path: String,
}

impl IntoProblemDetails for RouteNotFound
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::ResourceNotFound
	}
}

/// Fallback handler for requests that did not match any route.
#[tracing::instrument(level = "debug")]
pub(crate) async fn not_found(uri: Uri) -> ProblemDetails
{
	ProblemDetails::from(RouteNotFound { path: uri.path().to_owned() })
}
