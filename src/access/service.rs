//! This module contains a [`tower::Service`] enforcing the [access rules] on
//! every request. It will resolve the request's session, parse the unlocked
//! projects cookie, and then either redirect or run its inner service with a
//! [`RequestContext`] in the request extensions.
//!
//! [access rules]: super::rules

use std::fmt;
use std::task::{self, Poll};

use axum::extract::Request;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use url::Url;

use super::{route, RequestContext, RoutingDecision, UnlockedProjects};
use crate::services::auth::session::SessionProvider;

/// A layer producing the [`AccessControl`] middleware.
#[derive(Clone)]
pub struct AccessControlLayer<P>
{
	/// Resolves sessions.
	sessions: P,
}

impl<P> AccessControlLayer<P>
where
	P: SessionProvider,
{
	/// Creates a new [`AccessControlLayer`].
	pub fn new(sessions: P) -> Self
	{
		Self { sessions }
	}
}

impl<P> fmt::Debug for AccessControlLayer<P>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AccessControlLayer")
			.field("sessions", &std::any::type_name::<P>())
			.finish()
	}
}

impl<S, P> tower::Layer<S> for AccessControlLayer<P>
where
	P: SessionProvider,
{
	type Service = AccessControl<S, P>;

	fn layer(&self, inner: S) -> Self::Service
	{
		AccessControl { sessions: self.sessions.clone(), inner }
	}
}

/// A middleware enforcing the access rules.
///
/// You can create an instance of this service using [`AccessControlLayer`].
#[derive(Clone)]
pub struct AccessControl<S, P>
{
	/// Resolves sessions.
	sessions: P,

	/// The inner service.
	inner: S,
}

impl<S, P> fmt::Debug for AccessControl<S, P>
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("AccessControl")
			.field("sessions", &std::any::type_name::<P>())
			.finish_non_exhaustive()
	}
}

impl<S, P> tower::Service<Request> for AccessControl<S, P>
where
	S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
	S::Future: Send,
	S::Error: Send + 'static,
	P: SessionProvider,
{
	type Response = Response;
	type Error = S::Error;
	type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>>
	{
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request) -> Self::Future
	{
		let sessions = self.sessions.clone();

		// The clone may not be ready; keep the one that is.
		let clone = self.inner.clone();
		let inner = std::mem::replace(&mut self.inner, clone);

		Box::pin(svc_impl(sessions, inner, req))
	}
}

/// The relevant implementation of `<AccessControl as tower::Service>::call()`.
#[tracing::instrument(
	level = "debug",
	name = "access_control",
	skip_all,
	fields(path = %req.uri().path(), user.id = tracing::field::Empty),
)]
async fn svc_impl<S, P>(sessions: P, mut inner: S, req: Request) -> Result<Response, S::Error>
where
	S: tower::Service<Request, Response = Response> + Send,
	P: SessionProvider,
{
	let (mut parts, body) = req.into_parts();

	if let Some(uri) = resolve_dot_segments(&parts.uri) {
		tracing::debug!(%uri, "resolved dot segments in request path");
		parts.uri = uri;
	}

	let session = sessions.resolve(&parts).await;

	if let Some(session) = &session {
		tracing::Span::current().record("user.id", format_args!("{}", session.user().id));
	}

	let decision = route(session.as_ref(), parts.uri.path());
	let context = RequestContext::new(session, UnlockedProjects::from_headers(&parts.headers));

	match decision {
		RoutingDecision::Redirect(redirect) => {
			tracing::debug!(location = %redirect.location(), "redirecting request");

			let mut response = redirect.into_response();
			response.extensions_mut().insert(context);

			Ok(response)
		}
		RoutingDecision::Allow => {
			tracing::trace!(?context, "allowing request");

			parts.extensions.insert(context);
			inner.call(Request::from_parts(parts, body)).await
		}
	}
}

/// Resolves `.` and `..` segments in the path of `uri` the way browsers do.
///
/// Returns [`None`] if there was nothing to resolve.
fn resolve_dot_segments(uri: &Uri) -> Option<Uri>
{
	let path = uri.path();
	let resolved = Url::parse(&format!("http://localhost{path}")).ok()?;

	if resolved.path() == path {
		return None;
	}

	let path_and_query = match uri.query() {
		Some(query) => format!("{}?{query}", resolved.path()),
		None => resolved.path().to_owned(),
	};

	let mut parts = uri.clone().into_parts();
	parts.path_and_query = Some(path_and_query.parse().ok()?);

	Uri::from_parts(parts).ok()
}
