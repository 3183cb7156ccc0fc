//! Validation of sign-in credentials.

use derive_more::Debug;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};

/// A (very) loose shape check for email addresses.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Credentials as submitted by a user, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Credentials
{
	/// The email address the user claims to own.
	pub email: Option<String>,

	/// The user's password.
	#[debug(skip)]
	pub password: Option<String>,
}

/// Credentials that passed [validation].
///
/// [validation]: Credentials::validate
#[derive(Debug, Clone)]
pub struct ValidCredentials
{
	/// The email address, lowercased.
	pub email: String,

	/// The user's password.
	#[debug(skip)]
	pub password: String,
}

/// Reasons why [`Credentials`] can fail validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError
{
	/// No email address was provided.
	#[error("Email is required")]
	MissingEmail,

	/// The email address does not look like one.
	#[error("Invalid email")]
	InvalidEmail,

	/// No password was provided.
	#[error("Password is required")]
	MissingPassword,
}

impl IntoProblemDetails for CredentialsError
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::MissingEmail | Self::MissingPassword => ProblemType::MissingField,
			Self::InvalidEmail => ProblemType::InvalidRequestBody,
		}
	}
}

impl Credentials
{
	/// Checks that both fields are present and the email looks like one.
	///
	/// The email is checked before the password.
	pub fn validate(self) -> Result<ValidCredentials, CredentialsError>
	{
		let email = self
			.email
			.filter(|email| !email.is_empty())
			.ok_or(CredentialsError::MissingEmail)?;

		if !is_valid_email(&email) {
			return Err(CredentialsError::InvalidEmail);
		}

		let password = self
			.password
			.filter(|password| !password.is_empty())
			.ok_or(CredentialsError::MissingPassword)?;

		Ok(ValidCredentials { email: email.to_lowercase(), password })
	}
}

/// Checks whether `email` is shaped like an email address.
pub fn is_valid_email(email: &str) -> bool
{
	Regex::new(EMAIL_PATTERN).map_or(false, |re| re.is_match(email))
}
