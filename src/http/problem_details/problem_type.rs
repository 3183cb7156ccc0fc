//! This module contains the [`ProblemType`] enum.
//!
//! It represents an exhaustive list of all the possible error conditions the
//! portal might return.

use axum::http::StatusCode;
use serde::{Serialize, Serializer};

/// A problem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType
{
	/// A required field was missing from the request.
	MissingField,

	/// You failed to provide a required request header.
	MissingHeader,

	/// You did not provide the necessary authentication information to
	/// perform your request.
	Unauthorized,

	/// A requested resource could not be found.
	ResourceNotFound,

	/// A request for creating a resource was made, but rejected because the
	/// resource already exists.
	ResourceAlreadyExists,

	/// You provided a request body which could not be deserialized.
	InvalidRequestBody,

	/// An internal failure occurred.
	Internal,
}

impl ProblemType
{
	/// Returns the HTTP status code associated with this problem.
	pub const fn status(self) -> StatusCode
	{
		match self {
			Self::MissingField | Self::MissingHeader => StatusCode::BAD_REQUEST,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::ResourceNotFound => StatusCode::NOT_FOUND,
			Self::ResourceAlreadyExists => StatusCode::CONFLICT,
			Self::InvalidRequestBody => StatusCode::UNPROCESSABLE_ENTITY,
			Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Returns a short, human-readable, description of this problem.
	pub const fn title(self) -> &'static str
	{
		match self {
			Self::MissingField => "Missing required field",
			Self::MissingHeader => "Missing required header",
			Self::Unauthorized => "Unauthorized",
			Self::ResourceNotFound => "Resource not found",
			Self::ResourceAlreadyExists => "Resource already exists",
			Self::InvalidRequestBody => "Invalid request body",
			Self::Internal => "Internal server error",
		}
	}

	/// Returns the URI fragment identifying this problem.
	pub const fn slug(self) -> &'static str
	{
		match self {
			Self::MissingField => "missing-field",
			Self::MissingHeader => "missing-header",
			Self::Unauthorized => "unauthorized",
			Self::ResourceNotFound => "resource-not-found",
			Self::ResourceAlreadyExists => "resource-already-exists",
			Self::InvalidRequestBody => "invalid-request-body",
			Self::Internal => "internal",
		}
	}
}

impl Serialize for ProblemType
{
	// Serialize as a relative URI reference as allowed by the RFC.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(&format_args!("/problems#{}", self.slug()))
	}
}
