//! The [`AuthService`] is responsible for checking user credentials and
//! managing login sessions.
//!
//! Users sign in with their email address and password. A successful
//! [`AuthService::authenticate()`] is followed by [`AuthService::login()`],
//! which creates a session in the database; the session's ID is handed to the
//! user as a cookie (see the `http` module). On every subsequent request, the
//! service acts as a [`SessionProvider`] and turns that cookie back into a
//! [`Session`].
//!
//! [`SessionProvider`]: session::SessionProvider

#![allow(clippy::clone_on_ref_ptr)]

use std::fmt;
use std::sync::Arc;

use sqlx::{MySql, Pool};
use url::Url;

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

mod credentials;
pub use credentials::{is_valid_email, Credentials, CredentialsError, ValidCredentials};

mod password;

mod redirect;
pub use redirect::resolve_redirect;

mod user;
pub use user::{User, UserID};

pub mod users;
pub use users::NewUser;

pub mod session;
pub use session::{Session, SessionID};

/// A service for managing user authentication.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct AuthService
{
	database: Pool<MySql>,
	public_url: Arc<Url>,
	cookie_domain: Arc<str>,
}

impl fmt::Debug for AuthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AuthService")
			.field("public_url", &format_args!("{}", self.public_url))
			.field("cookie_domain", &self.cookie_domain)
			.finish_non_exhaustive()
	}
}

impl AuthService
{
	/// Create a new [`AuthService`].
	pub fn new(database: Pool<MySql>, public_url: Url, cookie_domain: String) -> Self
	{
		Self {
			database,
			public_url: Arc::new(public_url),
			cookie_domain: cookie_domain.into(),
		}
	}

	/// The URL users are sent back to after signing in, unless they asked to
	/// go somewhere else on the same origin.
	pub fn public_url(&self) -> &Url
	{
		&self.public_url
	}

	/// The domain session cookies are scoped to.
	pub fn cookie_domain(&self) -> &str
	{
		&self.cookie_domain
	}

	/// Checks a user's credentials.
	///
	/// A missing user, a user without a password, and a wrong password all
	/// produce the same [`Error::InvalidCredentials`].
	#[tracing::instrument(
		level = "debug",
		skip_all,
		err(Debug, level = "debug"),
		fields(user.email = tracing::field::Empty, user.id = tracing::field::Empty),
	)]
	pub async fn authenticate(&self, credentials: Credentials) -> Result<User>
	{
		let ValidCredentials { email, password } = credentials.validate()?;

		tracing::Span::current().record("user.email", email.as_str());
		tracing::debug!("looking up user");

		let Some(row) = users::find_by_email(&self.database, &email).await? else {
			tracing::debug!("user not found");
			return Err(Error::InvalidCredentials);
		};

		let Some(password_hash) = row.password_hash.as_deref() else {
			tracing::debug!("user has no password set");
			return Err(Error::InvalidCredentials);
		};

		tracing::trace!("verifying password");

		if !password::verify(&password, password_hash) {
			tracing::debug!("password does not match");
			return Err(Error::InvalidCredentials);
		}

		let user = User::from(row);

		tracing::Span::current().record("user.id", format_args!("{}", user.id));
		tracing::debug!("authenticated user");

		Ok(user)
	}

	/// Creates a new user account.
	pub async fn create_user(&self, user: NewUser) -> Result<User>
	{
		users::create(&self.database, user).await
	}

	/// Creates a new session for the given user.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"), skip_all, fields(
		user.id = %user.id,
		session.id = tracing::field::Empty,
		session.expires_on = tracing::field::Empty,
	))]
	pub async fn login(&self, user: &User) -> Result<Session>
	{
		let session_id = SessionID::new();
		let expires_on = session::generate_session_expiration_date();

		tracing::Span::current()
			.record("session.id", format_args!("{session_id}"))
			.record("session.expires_on", format_args!("{expires_on}"));

		tracing::debug!("creating new session");

		sqlx::query(
			r"
			INSERT INTO
			  LoginSessions (id, user_id, expires_on)
			VALUES
			  (?, ?, ?)
			",
		)
		.bind(session_id.to_string())
		.bind(user.id.as_str())
		.bind(expires_on)
		.execute(&self.database)
		.await?;

		tracing::debug!("created session");

		Ok(Session::new(session_id, user.clone(), expires_on))
	}

	/// Invalidates a login session.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"), skip_all, fields(
		session.id = %session.id(),
		user.id = %session.user().id,
	))]
	pub async fn logout(&self, session: &Session) -> Result<()>
	{
		sqlx::query(
			r"
			UPDATE
			  LoginSessions
			SET
			  expires_on = NOW()
			WHERE
			  id = ?
			  AND expires_on > NOW()
			",
		)
		.bind(session.id().to_string())
		.execute(&self.database)
		.await?;

		tracing::trace!("invalidated session");

		Ok(())
	}
}
