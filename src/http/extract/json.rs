//! This module contains the [`Json`] extractor, a wrapper around [`axum::Json`]
//! with a problem-details error response.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

/// An extractor for JSON request bodies.
///
/// This wraps [`axum::Json`] exactly, but produces different error responses.
#[derive(Debug)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
	S: Send + Sync,
	T: DeserializeOwned,
{
	type Rejection = JsonRejection;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		if !has_json_content_type(req.headers()) {
			return Err(JsonRejection::MissingContentType);
		}

		let bytes = Bytes::from_request(req, state)
			.await
			.map_err(|source| JsonRejection::Body { source })?;

		serde_json::from_slice(&bytes).map(Self).map_err(Into::into)
	}
}

impl<T> IntoResponse for Json<T>
where
	axum::Json<T>: IntoResponse,
{
	fn into_response(self) -> Response
	{
		axum::Json(self.0).into_response()
	}
}

/// Rejection for the [`Json`] extractor.
#[derive(Debug, Error)]
pub enum JsonRejection
{
	/// The request did not declare a JSON content type.
	#[error("expected request with `Content-Type: application/json`")]
	MissingContentType,

	/// The request body could not be buffered.
	#[error("failed to read request body: {source}")]
	Body
	{
		/// The original rejection from axum.
		source: axum::extract::rejection::BytesRejection,
	},

	/// The request body was not the JSON we expected.
	#[error("failed to parse request body: {0}")]
	Deserialize(#[from] serde_json::Error),
}

impl IntoResponse for JsonRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for JsonRejection
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingContentType => ProblemType::MissingHeader,
			Self::Body { .. } | Self::Deserialize(_) => ProblemType::InvalidRequestBody,
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		if let Self::Deserialize(source) = self {
			ext.add("line", &source.line());
			ext.add("column", &source.column());
		}
	}
}

/// Checks if the given `headers` contain a JSON-like Content-Type.
fn has_json_content_type(headers: &HeaderMap) -> bool
{
	let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
		return false;
	};

	let Ok(content_type) = content_type.to_str() else {
		return false;
	};

	let essence = content_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
		.to_ascii_lowercase();

	let Some(subtype) = essence.strip_prefix("application/") else {
		return false;
	};

	subtype == "json" || subtype.ends_with("+json")
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::http::StatusCode;
	use serde::Deserialize;

	use super::*;
	use crate::testing;

	#[derive(Debug, Deserialize)]
	struct Payload
	{
		name: String,
	}

	fn request(content_type: Option<&str>, body: &'static str) -> color_eyre::Result<Request>
	{
		let mut builder = Request::builder().method("POST").uri("/");

		if let Some(content_type) = content_type {
			builder = builder.header(header::CONTENT_TYPE, content_type);
		}

		Ok(builder.body(Body::from(body))?)
	}

	#[tokio::test]
	async fn accepts_json_with_parameters() -> color_eyre::Result<()>
	{
		let req = request(Some("application/json; charset=utf-8"), r#"{"name":"pm"}"#)?;
		let Json(payload) = Json::<Payload>::from_request(req, &()).await?;

		testing::assert_eq!(payload.name, "pm");

		Ok(())
	}

	#[tokio::test]
	async fn rejects_missing_content_type() -> color_eyre::Result<()>
	{
		let req = request(None, r#"{"name":"pm"}"#)?;
		let rejection = Json::<Payload>::from_request(req, &())
			.await
			.expect_err("content type is missing");

		testing::assert_matches!(rejection, JsonRejection::MissingContentType);
		testing::assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);

		Ok(())
	}

	#[tokio::test]
	async fn rejects_malformed_body() -> color_eyre::Result<()>
	{
		let req = request(Some("application/json"), "{")?;
		let rejection = Json::<Payload>::from_request(req, &())
			.await
			.expect_err("body is not valid json");

		testing::assert_matches!(rejection, JsonRejection::Deserialize(_));
		testing::assert_eq!(
			rejection.into_response().status(),
			StatusCode::UNPROCESSABLE_ENTITY
		);

		Ok(())
	}

	#[test]
	fn recognizes_json_suffixes()
	{
		let mut headers = HeaderMap::new();
		headers.insert(header::CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());

		assert!(has_json_content_type(&headers), "`+json` suffix should be accepted");

		headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());

		assert!(!has_json_content_type(&headers), "`text/plain` should be rejected");
	}
}
