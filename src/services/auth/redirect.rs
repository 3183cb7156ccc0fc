//! Resolution of post-sign-in redirect targets.

use url::Url;

/// Resolves where to send a user after signing in.
///
/// Absolute targets are only honored if they point back at `base`; relative
/// paths are joined onto `base`. Everything else falls back to `base`.
pub fn resolve_redirect(base: &str, target: Option<&str>) -> String
{
	match target {
		Some(target) if target.starts_with(base) && same_origin(base, target) => target.to_owned(),
		Some(target) if target.starts_with('/') => {
			format!("{}{target}", base.trim_end_matches('/'))
		}
		_ => base.to_owned(),
	}
}

/// Whether `base` and `target` parse to the same origin.
fn same_origin(base: &str, target: &str) -> bool
{
	match (Url::parse(base), Url::parse(target)) {
		(Ok(base), Ok(target)) => base.origin() == target.origin(),
		_ => false,
	}
}
