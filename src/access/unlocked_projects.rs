//! The unlocked projects cookie.
//!
//! Clients remember which password-protected projects they have unlocked in a
//! cookie holding a JSON object of project ID to secret. The map is rebuilt
//! from scratch on every request and passed downstream; it grants nothing by
//! itself.

use std::collections::BTreeMap;
use std::fmt;

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::Cookie;

/// The name of the cookie holding the unlocked projects.
pub const COOKIE_NAME: &str = "unlocked_projects";

/// A mapping from project ID to unlock secret.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct UnlockedProjects(BTreeMap<String, String>);

impl fmt::Debug for UnlockedProjects
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_map()
			.entries(self.0.keys().map(|project_id| (project_id, "*****")))
			.finish()
	}
}

impl UnlockedProjects
{
	/// Parses the (already decoded) value of the cookie.
	///
	/// Anything but a JSON object of strings yields an empty map.
	pub fn from_cookie_value(raw: Option<&str>) -> Self
	{
		let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
			return Self::default();
		};

		match serde_json::from_str::<BTreeMap<String, String>>(raw) {
			Ok(projects) => Self(projects),
			Err(error) => {
				tracing::trace!(%error, "ignoring malformed unlocked projects cookie");
				Self::default()
			}
		}
	}

	/// Reads the cookie from request headers.
	pub fn from_headers(headers: &HeaderMap) -> Self
	{
		let cookie = headers
			.get_all(header::COOKIE)
			.into_iter()
			.flat_map(|value| value.to_str())
			.flat_map(|value| Cookie::split_parse_encoded(value.trim().to_owned()))
			.flatten()
			.find(|cookie| cookie.name() == COOKIE_NAME);

		Self::from_cookie_value(cookie.as_ref().map(Cookie::value))
	}

	/// Returns the secret stored for `project_id`.
	pub fn get(&self, project_id: &str) -> Option<&str>
	{
		self.0.get(project_id).map(String::as_str)
	}

	/// Whether `project_id` has been unlocked.
	pub fn contains(&self, project_id: &str) -> bool
	{
		self.0.contains_key(project_id)
	}

	/// Returns the number of unlocked projects.
	pub fn len(&self) -> usize
	{
		self.0.len()
	}

	/// Whether no projects are unlocked.
	pub fn is_empty(&self) -> bool
	{
		self.0.is_empty()
	}

	/// Iterates over `(project_id, secret)` pairs, ordered by project ID.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)>
	{
		self.0
			.iter()
			.map(|(project_id, secret)| (project_id.as_str(), secret.as_str()))
	}
}
