//! The [`LayoutService`] provides the data every page is rendered with: who is
//! signed in, where they are, and what the portal is called.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::services::auth::User;

mod branding;
pub use branding::Branding;

pub(crate) mod http;

/// A service for building page layout data.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct LayoutService
{
	branding: Arc<Branding>,
}

impl fmt::Debug for LayoutService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("LayoutService")
			.field("title", &self.branding.title)
			.finish_non_exhaustive()
	}
}

/// A single breadcrumb entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breadcrumb
{
	/// The text shown.
	pub label: &'static str,

	/// Where it links to.
	pub href: &'static str,
}

/// Data shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct Layout<'a>
{
	/// The signed-in user, if any.
	pub user: Option<&'a User>,

	/// The breadcrumb trail.
	pub breadcrumb: [Breadcrumb; 1],

	/// The portal's branding.
	pub branding: &'a Branding,
}

impl LayoutService
{
	/// Creates a new [`LayoutService`].
	pub fn new(branding: Branding) -> Self
	{
		Self { branding: Arc::new(branding) }
	}

	/// Builds the layout for a page viewed by `user`.
	pub fn layout<'a>(&'a self, user: Option<&'a User>) -> Layout<'a>
	{
		Layout {
			user,
			breadcrumb: [Breadcrumb { label: "Dashboard", href: "/dashboard" }],
			branding: &self.branding,
		}
	}
}
