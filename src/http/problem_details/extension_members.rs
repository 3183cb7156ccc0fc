//! This module contains the [`ExtensionMembers`] struct.
//!
//! It represents arbitrary additional fields to add to an error response, such
//! as the position of a syntax error in a request body.

use std::fmt;

use serde::Serialize;

/// [RFC 9457] [Extension Members].
///
/// [RFC 9457]: https://www.rfc-editor.org/rfc/rfc9457.html
/// [Extension Members]: https://www.rfc-editor.org/rfc/rfc9457.html#name-extension-members
#[derive(Default, Serialize)]
#[serde(transparent)]
pub struct ExtensionMembers
{
	/// JSON object that encodes the extra values.
	obj: serde_json::Map<String, serde_json::Value>,
}

impl ExtensionMembers
{
	/// Creates an empty [`ExtensionMembers`].
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Adds an extension member.
	///
	/// Values that cannot be represented as JSON are recorded as `null`.
	pub fn add<V>(&mut self, name: impl Into<String>, value: &V)
	where
		V: Serialize + ?Sized,
	{
		let name = name.into();
		let value = serde_json::to_value(value).unwrap_or_else(|error| {
			tracing::warn!(%error, member = %name, "extension member is not valid JSON");
			serde_json::Value::Null
		});

		self.obj.insert(name, value);
	}

	/// Returns whether any members were added.
	pub fn is_empty(&self) -> bool
	{
		self.obj.is_empty()
	}
}

impl fmt::Debug for ExtensionMembers
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Debug::fmt(&self.obj, f)
	}
}
