//! Log capturing.
//!
//! Logs always go to stderr. If a log directory is configured, they are also
//! written to daily rotating files in that directory.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod stderr;
mod files;

/// The filter used if `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "pm_portal=info,tower_http=info,warn";

/// Keeps the file logger alive.
#[derive(Debug)]
pub struct Guard
{
	/// The guard returned by [`tracing-appender`]'s logging thread.
	///
	/// [`tracing-appender`]: tracing_appender
	#[allow(dead_code)]
	appender_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initializes [`tracing-subscriber`].
///
/// NOTE: the returned [`Guard`] flushes file logs when dropped, which means it
/// has to stay alive until the program exits!
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Guard>
{
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
		.context("parse log filter")?;

	let stderr = stderr::layer();
	let (files, appender_guard) = match log_dir {
		None => (None, None),
		Some(log_dir) => {
			let (layer, guard) = files::layer(log_dir).context("initialize file logging")?;
			(Some(layer), Some(guard))
		}
	};

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr, files).with_filter(filter))
		.try_init()
		.context("install global subscriber")?;

	tracing::info!(log_dir = ?log_dir, "initialized logging");

	Ok(Guard { appender_guard })
}
