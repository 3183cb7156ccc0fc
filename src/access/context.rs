//! This module contains the [`RequestContext`], the per-request state built by
//! the [access control middleware] and handed to every handler behind it.
//!
//! [access control middleware]: super::AccessControl

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use thiserror::Error;

use super::UnlockedProjects;
use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;
use crate::services::auth::{Session, User};

/// Everything the access control middleware learned about a request.
///
/// This is built exactly once per request and never modified afterwards.
#[derive(Debug, Clone)]
pub struct RequestContext
{
	/// The request's session, if it has one.
	session: Option<Session>,

	/// The projects the client claims to have unlocked.
	unlocked_projects: UnlockedProjects,
}

impl RequestContext
{
	/// Creates a new [`RequestContext`].
	pub fn new(session: Option<Session>, unlocked_projects: UnlockedProjects) -> Self
	{
		Self { session, unlocked_projects }
	}

	/// Returns the request's session.
	pub fn session(&self) -> Option<&Session>
	{
		self.session.as_ref()
	}

	/// Returns the user the request's session belongs to.
	pub fn user(&self) -> Option<&User>
	{
		self.session.as_ref().map(Session::user)
	}

	/// Returns the projects the client claims to have unlocked.
	pub fn unlocked_projects(&self) -> &UnlockedProjects
	{
		&self.unlocked_projects
	}
}

/// A handler asked for a [`RequestContext`], but the access control middleware
/// did not run for this request.
#[derive(Debug, Error)]
#[error("request context is missing; is the access control middleware installed?")]
pub struct MissingRequestContext;

impl IntoProblemDetails for MissingRequestContext
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Internal
	}
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
	S: Send + Sync + 'static,
{
	type Rejection = ProblemDetails;

	async fn from_request_parts(req: &mut request::Parts, _: &S) -> Result<Self, Self::Rejection>
	{
		req.extensions
			.get::<Self>()
			.cloned()
			.ok_or_else(|| {
				tracing::error!("RequestContext extracted outside of access control middleware");
				ProblemDetails::from(MissingRequestContext)
			})
	}
}
