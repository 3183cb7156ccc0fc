//! The errors that can occur when interacting with this service.

use thiserror::Error;

use super::credentials::CredentialsError;
use crate::http::problem_details::{IntoProblemDetails, ProblemType};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the auth service.
#[derive(Debug, Error)]
pub enum Error
{
	/// The submitted credentials were malformed.
	#[error(transparent)]
	Validation(#[from] CredentialsError),

	/// The user does not exist, has no password, or the password was wrong.
	///
	/// These cases are deliberately indistinguishable to the caller.
	#[error("invalid credentials")]
	InvalidCredentials,

	/// A user with the same email address already exists.
	#[error("a user with this email address already exists")]
	UserAlreadyExists,

	/// We failed to hash a password.
	#[error("failed to hash password: {0}")]
	HashPassword(password_hash::Error),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::Validation(source) => source.problem_type(),
			Self::InvalidCredentials => ProblemType::Unauthorized,
			Self::UserAlreadyExists => ProblemType::ResourceAlreadyExists,
			Self::HashPassword(_) => ProblemType::Internal,
			Self::Database(source) => source.problem_type(),
		}
	}
}
