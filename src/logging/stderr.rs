//! Logging to stderr.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;

/// Creates a layer that will emit logs to stderr.
///
/// Colors are only used if stderr is a terminal.
pub fn layer<S>() -> impl tracing_subscriber::Layer<S>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	tracing_subscriber::fmt::layer()
		.compact()
		.with_ansi(io::stderr().is_terminal())
		.with_level(true)
		.with_span_events(FmtSpan::CLOSE)
		.with_target(true)
		.with_writer(io::stderr)
}
