//! This module contains the [`User`] type, which represents an authenticated
//! user, either fresh from a credentials check or associated with a
//! [`Session`].
//!
//! [`Session`]: super::Session

use derive_more::{Display, From, Into};
use serde::Serialize;

/// A user's ID.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, From, Into, Serialize)]
#[serde(transparent)]
pub struct UserID(String);

impl UserID
{
	/// Returns the ID as a string slice.
	pub fn as_str(&self) -> &str
	{
		&self.0
	}
}

/// An authenticated user.
///
/// Serializes with camelCase keys, which is what the frontend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User
{
	/// The user's ID.
	pub id: UserID,

	/// The user's email address, always lowercase.
	pub email: String,

	/// The user's display name. May be empty.
	pub name: String,

	/// Whether the user is an administrator.
	pub is_admin: bool,

	/// Whether the user is external, and therefore restricted to project
	/// and viewer routes.
	pub is_external: bool,
}
