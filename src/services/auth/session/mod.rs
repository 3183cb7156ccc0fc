//! Session authentication.
//!
//! A session is created when a user signs in with their credentials, and is
//! identified by a random [session ID] stored in the [session cookie]. On every
//! request, a [`SessionProvider`] turns that cookie back into a [`Session`] (or
//! nothing, for anonymous requests) before the access control rules run.
//!
//! Sessions live in the `LoginSessions` table and expire [a week] after they
//! were created. They are not extended on use.
//!
//! [session ID]: SessionID
//! [session cookie]: COOKIE_NAME
//! [a week]: SESSION_LIFETIME

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::OffsetDateTime;

use super::User;

mod id;
pub use id::SessionID;

mod provider;
pub use provider::{session_id_from_headers, SessionProvider};

/// The name of the HTTP cookie that will store the user's [session ID].
///
/// [session ID]: SessionID
pub const COOKIE_NAME: &str = "pm-session";

/// How long a session stays valid after sign-in.
pub const SESSION_LIFETIME: time::Duration = time::Duration::WEEK;

/// An authenticated session.
///
/// This struct represents a session that has either just been created, or
/// resolved from a request.
#[derive(Debug, Clone)]
pub struct Session
{
	/// The session's ID.
	id: SessionID,

	/// The user associated with this session.
	user: User,

	/// When this session stops being valid.
	expires_on: OffsetDateTime,
}

impl Session
{
	/// Creates a new [`Session`].
	pub fn new(id: SessionID, user: User, expires_on: OffsetDateTime) -> Self
	{
		Self { id, user, expires_on }
	}

	/// Returns this session's ID.
	pub fn id(&self) -> SessionID
	{
		self.id
	}

	/// Returns the user associated with this session.
	pub fn user(&self) -> &User
	{
		&self.user
	}

	/// Returns when this session expires.
	pub fn expires_on(&self) -> OffsetDateTime
	{
		self.expires_on
	}

	/// Creates an HTTP cookie from this session.
	pub fn to_cookie(&self, domain: impl Into<String>) -> Cookie<'static>
	{
		Cookie::build((COOKIE_NAME, self.id.to_string()))
			.domain(domain.into())
			.path("/")
			.secure(cfg!(feature = "production"))
			.same_site(SameSite::Lax)
			.http_only(true)
			.expires(self.expires_on)
			.build()
	}
}

/// Creates a cookie that clears the session cookie on the client.
pub fn removal_cookie(domain: impl Into<String>) -> Cookie<'static>
{
	Cookie::build((COOKIE_NAME, ""))
		.domain(domain.into())
		.path("/")
		.secure(cfg!(feature = "production"))
		.same_site(SameSite::Lax)
		.http_only(true)
		.expires(OffsetDateTime::now_utc())
		.build()
}

/// Generates a new expiration date for a session created right now.
pub(super) fn generate_session_expiration_date() -> OffsetDateTime
{
	OffsetDateTime::now_utc() + SESSION_LIFETIME
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn cookie_carries_session_id() -> color_eyre::Result<()>
	{
		let session = testing::session(false);
		let cookie = session.to_cookie("portal.example.com");

		testing::assert_eq!(cookie.name(), COOKIE_NAME);
		testing::assert_eq!(cookie.value().parse::<SessionID>()?, session.id());
		testing::assert_eq!(cookie.domain(), Some("portal.example.com"));
		testing::assert_eq!(cookie.http_only(), Some(true));
		testing::assert_eq!(cookie.same_site(), Some(SameSite::Lax));
		testing::assert_eq!(
			cookie.expires_datetime().map(OffsetDateTime::unix_timestamp),
			Some(session.expires_on().unix_timestamp()),
		);

		Ok(())
	}

	#[test]
	fn removal_cookie_is_expired() -> color_eyre::Result<()>
	{
		let cookie = removal_cookie("portal.example.com");
		let expires = cookie.expires_datetime();

		testing::assert_eq!(cookie.value(), "");
		testing::assert!(expires.is_some_and(|expires| expires <= OffsetDateTime::now_utc()));

		Ok(())
	}
}
