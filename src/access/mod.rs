//! Access control for page and API routes.
//!
//! The [`AccessControl`] middleware runs in front of every route that needs
//! to know who is asking. For each request it resolves the session, parses the
//! [unlocked projects cookie], evaluates the [access rules], and either
//! redirects or passes a [`RequestContext`] to the handler.
//!
//! [unlocked projects cookie]: UnlockedProjects
//! [access rules]: rules

pub mod rules;
pub use rules::{route, Redirect, RoutingDecision};

mod unlocked_projects;
pub use unlocked_projects::UnlockedProjects;

mod context;
pub use context::{MissingRequestContext, RequestContext};

mod service;
pub use service::{AccessControl, AccessControlLayer};
