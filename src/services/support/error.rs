//! The errors that can occur when interacting with this service.

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the support service.
#[derive(Debug, Error)]
pub enum Error
{
	/// The request did not contain a message.
	#[error("Message is required")]
	MissingMessage,

	/// We could not reach the internal API.
	#[error("Failed to send support message")]
	Http(#[from] reqwest::Error),

	/// The internal API rejected the message.
	#[error("Failed to send support message")]
	Rejected
	{
		/// The status the internal API responded with.
		status: StatusCode,
	},
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingMessage => ProblemType::MissingField,
			Self::Http(_) | Self::Rejected { .. } => ProblemType::Internal,
		}
	}
}
