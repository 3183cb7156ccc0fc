//! This module contains OS signal handlers used for graceful shutdown.

use tokio::signal;

/// Resolves when the process is asked to stop, either via `SIGINT` or, on
/// unix, `SIGTERM`.
#[tracing::instrument(target = "pm_portal::runtime")]
pub async fn shutdown()
{
	tokio::select! {
		() = sigint() => {}
		() = sigterm() => {}
	}
}

/// Resolves when the process receives `SIGINT`.
async fn sigint()
{
	match signal::ctrl_c().await {
		Ok(()) => tracing::warn!("received SIGINT, shutting down"),
		Err(error) => tracing::error!(%error, "failed to listen for SIGINT"),
	}
}

/// Resolves when the process receives `SIGTERM`.
#[cfg(unix)]
async fn sigterm()
{
	use tokio::signal::unix::{signal, SignalKind};

	match signal(SignalKind::terminate()) {
		Ok(mut sigterm) => {
			sigterm.recv().await;
			tracing::warn!("received SIGTERM, shutting down");
		}
		Err(error) => {
			tracing::error!(%error, "failed to listen for SIGTERM");
			std::future::pending::<()>().await;
		}
	}
}

/// There is no `SIGTERM` outside of unix.
#[cfg(not(unix))]
async fn sigterm()
{
	std::future::pending::<()>().await;
}
