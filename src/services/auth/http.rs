//! HTTP handlers for this service.
//!
//! The sign-in page sits behind the access control middleware like every other
//! page. The `/auth` actions do not, so they resolve sessions themselves.

use axum::extract::{Query, Request, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing, Form, Json, Router};
use axum_extra::extract::CookieJar;
use derive_more::Debug;
use serde::{Deserialize, Serialize};

use super::session::{self, SessionProvider};
use super::{resolve_redirect, AuthService, Credentials, Error};
use crate::access::{self, RequestContext};
use crate::http::ProblemDetails;

/// Error code for rejected credentials.
const CREDENTIALS_SIGNIN: &str = "CredentialsSignin";

/// Error code for failures on our end.
const CONFIGURATION: &str = "Configuration";

impl From<AuthService> for Router
{
	fn from(svc: AuthService) -> Self
	{
		Router::new()
			.route("/auth/signin", routing::post(sign_in))
			.route("/auth/signout", routing::post(sign_out))
			.with_state(svc)
	}
}

/// Routes that need the access control middleware.
pub(crate) fn pages() -> Router
{
	Router::new().route("/signin", routing::get(sign_in_page))
}

/// Query parameters for the [`sign_in_page`] handler.
#[derive(Debug, Deserialize)]
struct SignInPageQuery
{
	/// The error code of a previous failed sign-in attempt.
	#[serde(default)]
	error: Option<String>,
}

/// Data for rendering the sign-in page.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct SignInPage
{
	/// A human-readable description of the last sign-in failure.
	error: Option<&'static str>,
}

/// Maps a sign-in error code to a message fit for users.
fn sign_in_error_message(code: Option<&str>) -> Option<&'static str>
{
	let message = match code? {
		"" => return None,
		CREDENTIALS_SIGNIN => "Invalid email or password",
		CONFIGURATION => "Authentication system error. Please contact support.",
		"AccessDenied" => "Access denied. Please contact your administrator.",
		"Verification" => "Account verification required.",
		_ => "Sign in failed. Please try again.",
	};

	Some(message)
}

/// The sign-in page.
///
/// Users who are already signed in are sent to the dashboard.
#[tracing::instrument(level = "debug", skip(context))]
async fn sign_in_page(context: RequestContext, Query(query): Query<SignInPageQuery>) -> Response
{
	if context.session().is_some() {
		return access::Redirect::found(access::rules::DASHBOARD_PATH).into_response();
	}

	Json(SignInPage { error: sign_in_error_message(query.error.as_deref()) }).into_response()
}

/// Form data submitted by the sign-in page.
#[derive(Debug, Deserialize)]
struct SignInForm
{
	/// The user's email address.
	#[serde(default)]
	username: Option<String>,

	/// The user's password.
	#[serde(default)]
	#[debug(skip)]
	password: Option<String>,

	/// Where to go after signing in.
	#[serde(default, rename = "callbackUrl")]
	callback_url: Option<String>,
}

/// The URL of the sign-in page, showing `code`.
fn sign_in_error_url(code: &str) -> String
{
	format!("{}?error={code}", access::rules::SIGNIN_PATH)
}

/// Sign in with email and password.
#[tracing::instrument(skip(svc, cookies))]
async fn sign_in(
	State(svc): State<AuthService>,
	cookies: CookieJar,
	Form(form): Form<SignInForm>,
) -> (CookieJar, Redirect)
{
	let SignInForm { username, password, callback_url } = form;
	let credentials = Credentials { email: username, password };

	let user = match svc.authenticate(credentials).await {
		Ok(user) => user,
		Err(Error::Validation(_) | Error::InvalidCredentials) => {
			return (cookies, Redirect::to(&sign_in_error_url(CREDENTIALS_SIGNIN)));
		}
		Err(error) => {
			tracing::error!(%error, "failed to authenticate user");
			return (cookies, Redirect::to(&sign_in_error_url(CONFIGURATION)));
		}
	};

	let session = match svc.login(&user).await {
		Ok(session) => session,
		Err(error) => {
			tracing::error!(%error, "failed to create session");
			return (cookies, Redirect::to(&sign_in_error_url(CONFIGURATION)));
		}
	};

	let base = svc.public_url().as_str().trim_end_matches('/');
	let default_target = format!("{base}{}", access::rules::DASHBOARD_PATH);
	let target = resolve_redirect(base, Some(callback_url.as_deref().unwrap_or(&default_target)));

	tracing::info!(user.id = %user.id, "user signed in");

	let cookies = cookies.add(session.to_cookie(svc.cookie_domain()));

	(cookies, Redirect::to(&target))
}

/// Sign out, invalidating the current session.
#[tracing::instrument(skip_all, err(Debug, level = "debug"))]
async fn sign_out(
	State(svc): State<AuthService>,
	cookies: CookieJar,
	req: Request,
) -> Result<(CookieJar, Redirect), ProblemDetails>
{
	let (req, _) = req.into_parts();

	if let Some(session) = svc.resolve(&req).await {
		svc.logout(&session).await?;
		tracing::info!(user.id = %session.user().id, "user signed out");
	}

	let cookies = cookies.add(session::removal_cookie(svc.cookie_domain()));

	Ok((cookies, Redirect::to("/")))
}
