//! This module contains helpers for unit tests.

use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{request, Method};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use time::OffsetDateTime;

use crate::services::auth::session::{Session, SessionID, SessionProvider};
use crate::services::auth::{User, UserID};

/// A database pool pointing at a port nothing listens on.
///
/// Any query will fail quickly; use this for code paths that must handle
/// database failures or never touch the database at all.
pub fn unreachable_database() -> color_eyre::Result<Pool<MySql>>
{
	let pool = MySqlPoolOptions::new()
		.acquire_timeout(Duration::from_millis(250))
		.connect_lazy("mysql://pm:pm@127.0.0.1:1/pm_portal")?;

	Ok(pool)
}

/// Creates a user with the given `is_external` flag.
pub fn user(is_external: bool) -> User
{
	User {
		id: UserID::from(String::from("01HZX3J8Q4C6S2V9W7T5R1N0M8")),
		email: String::from("ada@example.com"),
		name: String::from("Ada"),
		is_admin: false,
		is_external,
	}
}

/// Creates a session for a user with the given `is_external` flag.
pub fn session(is_external: bool) -> Session
{
	Session::new(SessionID::new(), user(is_external), OffsetDateTime::now_utc() + time::Duration::DAY)
}

/// Builds an empty `GET` request for the given path.
pub fn get(path: &str) -> Request
{
	Request::builder()
		.method(Method::GET)
		.uri(path)
		.body(Body::empty())
		.expect("valid request")
}

/// A [`SessionProvider`] that resolves every request to the same session.
#[derive(Debug, Clone)]
pub struct FixedSession(pub Option<Session>);

impl SessionProvider for FixedSession
{
	async fn resolve(&self, _: &request::Parts) -> Option<Session>
	{
		self.0.clone()
	}
}

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr $(,)?) => {
		match (&$lhs, &$rhs) {
			(lhs, rhs) => {
				if lhs != rhs {
					::color_eyre::eyre::bail!(
						"assertion `{} == {}` failed\n  lhs: {:?}\n  rhs: {:?}",
						stringify!($lhs),
						stringify!($rhs),
						lhs,
						rhs,
					);
				}
			}
		}
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)? $(,)?) => {
		::color_eyre::eyre::ensure!(
			matches!($expr, $pat $(if $cond)?),
			"`{}` does not match `{}`",
			stringify!($expr),
			stringify!($pat),
		)
	};
}

pub(crate) use {assert, assert_eq, assert_matches};
