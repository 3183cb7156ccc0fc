//! This module contains a configured [`CatchPanicLayer`], which will catch
//! panics and produce a problem details response from them.

use std::any::Any;

use axum::response::IntoResponse;
use thiserror::Error;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

/// Creates a middleware layer for catching panics and turning them into
/// responses.
pub fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

/// A custom panic handler for [`CatchPanicLayer`].
#[derive(Debug, Clone, Copy)]
pub struct PanicHandler;

/// An HTTP handler panicked.
#[derive(Debug, Clone, Error)]
#[error("something unexpected happened; please contact support")]
struct HandlerPanicked;

impl IntoProblemDetails for HandlerPanicked
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Internal
	}
}

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = axum::body::Body;

	#[tracing::instrument(target = "pm_portal::http", name = "panic_handler", skip_all)]
	fn response_for_panic(
		&mut self,
		error: Box<dyn Any + Send + 'static>,
	) -> axum::http::Response<Self::ResponseBody>
	{
		let message = error
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| error.downcast_ref::<String>().map(String::as_str));

		tracing::error!(?message, "handler panicked");

		ProblemDetails::from(HandlerPanicked).into_response()
	}
}
