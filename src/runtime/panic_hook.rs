//! This module contains a function that will install a global panic hook,
//! so panics end up in the logs instead of only on stderr.
//!
//! See [`std::panic::set_hook()`] for more details.

use std::backtrace::Backtrace;
use std::panic;

/// Installs a global panic hook that logs panics as errors.
///
/// The previous hook is still invoked afterwards.
#[tracing::instrument(target = "pm_portal::runtime", name = "panic_hook")]
pub fn install()
{
	let old_hook = panic::take_hook();

	panic::set_hook(Box::new(move |info| {
		let location = info.location().map(ToString::to_string);
		let backtrace = Backtrace::force_capture();

		tracing::error! {
			target: "pm_portal::runtime",
			?location,
			"thread panicked: {info}\n---\nbacktrace:\n{backtrace}",
		};

		old_hook(info)
	}));

	tracing::debug!("installed panic hook");
}
