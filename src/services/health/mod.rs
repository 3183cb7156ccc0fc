//! A very basic service that acts as a healthcheck.

use std::fmt;

use serde::Serialize;

pub(crate) mod http;

/// A service that simply responds if the portal is up.
#[derive(Clone, Copy)]
pub struct HealthService {}

impl fmt::Debug for HealthService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("HealthService").finish_non_exhaustive()
	}
}

/// What the healthcheck reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health
{
	/// The package name.
	pub name: &'static str,

	/// The package version.
	pub version: &'static str,
}

impl HealthService
{
	/// Create a new [`HealthService`].
	pub fn new() -> Self
	{
		Self {}
	}

	/// Reports which build is running.
	#[tracing::instrument(level = "trace")]
	pub fn status(&self) -> Health
	{
		Health { name: env!("CARGO_PKG_NAME"), version: env!("CARGO_PKG_VERSION") }
	}
}
