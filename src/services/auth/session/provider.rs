//! This module contains the [`SessionProvider`] trait, the seam between the
//! access control middleware and wherever sessions are actually stored.

use std::future::Future;

use axum::http::{header, request, HeaderMap};
use axum_extra::extract::cookie::Cookie;
use sqlx::FromRow;
use time::OffsetDateTime;

use super::{Session, SessionID, COOKIE_NAME};
use crate::services::auth::{AuthService, User, UserID};

/// Resolves the session belonging to an incoming request.
///
/// Implementations must not fail: a request whose session cannot be resolved,
/// for whatever reason, is treated as anonymous. Failures should be logged by
/// the implementation.
pub trait SessionProvider: Clone + Send + Sync + 'static
{
	/// Resolve the session for the request described by `req`, if any.
	fn resolve(&self, req: &request::Parts) -> impl Future<Output = Option<Session>> + Send;
}

/// Extracts the [session ID] from the request's cookies.
///
/// Returns `None` if the cookie is missing or does not contain a valid ID.
///
/// [session ID]: SessionID
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionID>
{
	let cookie = headers
		.get_all(header::COOKIE)
		.into_iter()
		.flat_map(|value| value.to_str())
		.flat_map(|value| Cookie::split_parse_encoded(value.trim().to_owned()))
		.flatten()
		.find(|cookie| cookie.name() == COOKIE_NAME)?;

	cookie
		.value()
		.parse::<SessionID>()
		.inspect_err(|error| {
			tracing::debug! {
				cookie.name = %cookie.name(),
				%error,
				"found session cookie but failed to parse value",
			};
		})
		.ok()
}

/// A row of the session lookup query.
#[derive(FromRow)]
#[allow(clippy::missing_docs_in_private_items)]
struct SessionRow
{
	user_id: String,
	email: String,
	name: String,
	is_admin: bool,
	is_external: bool,
	expires_on: OffsetDateTime,
}

impl SessionProvider for AuthService
{
	#[tracing::instrument(
		level = "debug",
		name = "AuthService::resolve",
		skip_all,
		fields(session.id = tracing::field::Empty, user.id = tracing::field::Empty),
	)]
	async fn resolve(&self, req: &request::Parts) -> Option<Session>
	{
		let session_id = session_id_from_headers(&req.headers)?;

		tracing::Span::current().record("session.id", format_args!("{session_id}"));

		let row = sqlx::query_as::<_, SessionRow>(
			r"
			SELECT
			  u.id user_id,
			  u.email,
			  u.name,
			  u.is_admin,
			  u.is_external,
			  s.expires_on
			FROM
			  LoginSessions s
			  JOIN Users u ON u.id = s.user_id
			WHERE
			  s.id = ?
			  AND s.expires_on > NOW()
			",
		)
		.bind(session_id.to_string())
		.fetch_optional(&self.database)
		.await
		.inspect_err(|error| {
			tracing::error!(%error, "failed to look up session; treating request as anonymous");
		})
		.ok()
		.flatten();

		let Some(row) = row else {
			tracing::debug!("session is unknown or expired");
			return None;
		};

		tracing::Span::current().record("user.id", format_args!("{}", row.user_id));
		tracing::trace!("resolved session");

		let user = User {
			id: UserID::from(row.user_id),
			email: row.email,
			name: row.name,
			is_admin: row.is_admin,
			is_external: row.is_external,
		};

		Some(Session::new(session_id, user, row.expires_on))
	}
}
