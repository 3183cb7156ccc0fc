//! Persistence for user accounts.

use derive_more::Debug;
use sqlx::{FromRow, MySql, Pool};
use uuid::Uuid;

use super::{password, Error, Result, User, UserID};

/// Request payload for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser
{
	/// The user's email address. Stored lowercased.
	pub email: String,

	/// The user's plaintext password.
	#[debug(skip)]
	pub password: String,

	/// The user's display name.
	pub name: Option<String>,

	/// Whether the user is restricted to project and viewer routes.
	pub is_external: bool,
}

/// A user row, including the stored password hash.
#[derive(FromRow)]
#[allow(clippy::missing_docs_in_private_items)]
pub(super) struct UserRow
{
	id: String,
	email: String,
	name: String,
	pub(super) password_hash: Option<String>,
	is_admin: bool,
	is_external: bool,
}

impl From<UserRow> for User
{
	fn from(row: UserRow) -> Self
	{
		Self {
			id: UserID::from(row.id),
			email: row.email,
			name: row.name,
			is_admin: row.is_admin,
			is_external: row.is_external,
		}
	}
}

/// Looks up a user by their (lowercased) email address.
#[tracing::instrument(level = "debug", skip(database), err(Debug, level = "debug"))]
pub(super) async fn find_by_email(database: &Pool<MySql>, email: &str) -> Result<Option<UserRow>>
{
	let row = sqlx::query_as::<_, UserRow>(
		r"
		SELECT
		  id,
		  email,
		  name,
		  password_hash,
		  is_admin,
		  is_external
		FROM
		  Users
		WHERE
		  email = ?
		",
	)
	.bind(email)
	.fetch_optional(database)
	.await?;

	Ok(row)
}

/// Creates a new user.
///
/// The password is hashed before it ever reaches the database.
#[tracing::instrument(level = "debug", skip(database), err(Debug, level = "debug"))]
pub async fn create(database: &Pool<MySql>, user: NewUser) -> Result<User>
{
	let NewUser { email, password, name, is_external } = user;
	let email = email.to_lowercase();
	let name = name.unwrap_or_default();
	let password_hash = password::hash(&password).map_err(Error::HashPassword)?;
	let id = UserID::from(Uuid::now_v7().to_string());

	sqlx::query(
		r"
		INSERT INTO
		  Users (id, email, name, password_hash, is_external)
		VALUES
		  (?, ?, ?, ?, ?)
		",
	)
	.bind(id.as_str())
	.bind(&email)
	.bind(&name)
	.bind(&password_hash)
	.bind(is_external)
	.execute(database)
	.await
	.map_err(|error| match error {
		sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
			Error::UserAlreadyExists
		}
		error => Error::Database(error),
	})?;

	tracing::debug!(user.id = %id, "created user");

	Ok(User { id, email, name, is_admin: false, is_external })
}
