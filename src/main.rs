//! The portal's entry point.

use anyhow::Context;
use clap::Parser;
use pm_portal::runtime::panic_hook;
use pm_portal::Config;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: failed to load `.env` file: {error}");
	}

	let config = Config::parse();
	let _guard = logging::init(config.log_dir.as_deref()).context("initialize logging")?;

	panic_hook::install();

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	pm_portal::run(config).await
}
