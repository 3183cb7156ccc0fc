//! Creates a user account.
//!
//! The portal has no sign-up page; accounts are provisioned with this tool.

use anyhow::Context;
use clap::Parser;
use derive_more::Debug;
use pm_portal::services::auth::{self, NewUser};
use sqlx::mysql::MySqlPoolOptions;
use url::Url;

/// Creates a user account.
#[derive(Debug, clap::Parser)]
#[command(version)]
struct Args
{
	/// Database connection URL.
	#[arg(long, env)]
	#[debug(skip)]
	database_url: Url,

	/// The new user's email address.
	#[arg(long)]
	email: String,

	/// The new user's password.
	#[arg(long, env = "PM_PORTAL_NEW_USER_PASSWORD", hide_env_values = true)]
	#[debug(skip)]
	password: String,

	/// The new user's display name.
	#[arg(long)]
	name: Option<String>,

	/// Restrict the user to project and viewer routes.
	#[arg(long)]
	external: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: failed to load `.env` file: {error}");
	}

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pm_portal=info")),
		)
		.init();

	let args = Args::parse();

	if !auth::is_valid_email(&args.email) {
		anyhow::bail!("`{}` is not a valid email address", args.email);
	}

	let database = MySqlPoolOptions::new()
		.max_connections(1)
		.connect(args.database_url.as_str())
		.await
		.context("connect to database")?;

	let user = auth::users::create(&database, NewUser {
		email: args.email,
		password: args.password,
		name: args.name,
		is_external: args.external,
	})
	.await
	.context("create user")?;

	println!("created user {} <{}>", user.id, user.email);

	Ok(())
}
