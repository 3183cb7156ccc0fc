//! The access rules.
//!
//! Rules are evaluated in order, and the first one that matches decides the
//! outcome:
//!
//! 1. Anonymous requests for anything under `/dashboard` are sent to the
//!    sign-in page.
//! 2. External users may only visit project, viewer and API routes; anything
//!    else sends them to the project list.
//! 3. Signed-in users visiting `/` are sent to the dashboard.
//!
//! Requests no rule matches are allowed through.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::services::auth::Session;

/// Where anonymous users are sent.
pub const SIGNIN_PATH: &str = "/signin";

/// Where signed-in users visiting `/` are sent.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Where external users are sent when they stray outside their routes.
pub const EXTERNAL_HOME_PATH: &str = "/dashboard/projects";

/// Paths external users may visit exactly.
const EXTERNAL_ROUTES: [&str; 3] = ["/dashboard", "/dashboard/projects", "/dashboard/viewer"];

/// Path prefixes external users may visit.
const EXTERNAL_ROUTE_PREFIXES: [&str; 3] = ["/dashboard/projects/", "/dashboard/viewer/", "/api/"];

/// The outcome of evaluating the access rules for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision
{
	/// The request may proceed.
	Allow,

	/// The request must be redirected.
	Redirect(Redirect),
}

/// A `302 Found` redirect with an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect
{
	/// The value of the `Location` header.
	location: &'static str,
}

impl Redirect
{
	/// Creates a redirect to `location`.
	pub const fn found(location: &'static str) -> Self
	{
		Self { location }
	}

	/// Returns the redirect target.
	pub const fn location(&self) -> &'static str
	{
		self.location
	}
}

impl IntoResponse for Redirect
{
	fn into_response(self) -> Response
	{
		(StatusCode::FOUND, [(header::LOCATION, self.location)]).into_response()
	}
}

/// Decides what should happen to a request for `path`, given its session.
pub fn route(session: Option<&Session>, path: &str) -> RoutingDecision
{
	if session.is_none() && path.starts_with(DASHBOARD_PATH) {
		return RoutingDecision::Redirect(Redirect::found(SIGNIN_PATH));
	}

	if session.is_some_and(|session| session.user().is_external) && !is_external_route(path) {
		return RoutingDecision::Redirect(Redirect::found(EXTERNAL_HOME_PATH));
	}

	if session.is_some() && path == "/" {
		return RoutingDecision::Redirect(Redirect::found(DASHBOARD_PATH));
	}

	RoutingDecision::Allow
}

/// Whether an external user may visit `path`.
fn is_external_route(path: &str) -> bool
{
	EXTERNAL_ROUTES.contains(&path)
		|| EXTERNAL_ROUTE_PREFIXES
			.iter()
			.any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	fn redirect(location: &'static str) -> RoutingDecision
	{
		RoutingDecision::Redirect(Redirect::found(location))
	}

	#[test]
	fn anonymous_dashboard_requests_go_to_signin() -> color_eyre::Result<()>
	{
		for path in ["/dashboard", "/dashboard/projects/42", "/dashboard/settings", "/dashboards"] {
			testing::assert_eq!(route(None, path), redirect(SIGNIN_PATH));
		}

		Ok(())
	}

	#[test]
	fn anonymous_requests_elsewhere_are_allowed() -> color_eyre::Result<()>
	{
		for path in ["/", "/signin", "/api/support", "/favicon.png", "/Dashboard"] {
			testing::assert_eq!(route(None, path), RoutingDecision::Allow);
		}

		Ok(())
	}

	#[test]
	fn external_users_stay_in_their_routes() -> color_eyre::Result<()>
	{
		let session = testing::session(true);
		let allowed = [
			"/dashboard",
			"/dashboard/projects",
			"/dashboard/viewer",
			"/dashboard/projects/42",
			"/dashboard/projects/42/7",
			"/dashboard/viewer/abc",
			"/api/support",
		];

		for path in allowed {
			testing::assert_eq!(route(Some(&session), path), RoutingDecision::Allow);
		}

		let denied = [
			"/dashboard/settings",
			"/dashboard/projectsx",
			"/dashboard/",
			"/signin",
			"/api",
		];

		for path in denied {
			testing::assert_eq!(route(Some(&session), path), redirect(EXTERNAL_HOME_PATH));
		}

		Ok(())
	}

	#[test]
	fn root_redirects_signed_in_users() -> color_eyre::Result<()>
	{
		testing::assert_eq!(route(Some(&testing::session(false)), "/"), redirect(DASHBOARD_PATH));
		testing::assert_eq!(route(None, "/"), RoutingDecision::Allow);

		Ok(())
	}

	#[test]
	fn external_scoping_takes_precedence_over_root_redirect() -> color_eyre::Result<()>
	{
		testing::assert_eq!(route(Some(&testing::session(true)), "/"), redirect(EXTERNAL_HOME_PATH));

		Ok(())
	}

	#[test]
	fn internal_users_are_not_scoped() -> color_eyre::Result<()>
	{
		let session = testing::session(false);

		for path in ["/dashboard/settings", "/signin", "/dashboard/admin/users"] {
			testing::assert_eq!(route(Some(&session), path), RoutingDecision::Allow);
		}

		Ok(())
	}

	#[test]
	fn redirect_response_is_empty_302() -> color_eyre::Result<()>
	{
		let response = Redirect::found(SIGNIN_PATH).into_response();

		testing::assert_eq!(response.status(), StatusCode::FOUND);
		testing::assert_eq!(
			response.headers().get(header::LOCATION).map(|value| value.as_bytes()),
			Some(SIGNIN_PATH.as_bytes()),
		);

		Ok(())
	}
}
