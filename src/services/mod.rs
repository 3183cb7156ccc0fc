//! Portal services.
//!
//! These contain the core business logic.
//!
//! If a service directly maps to an HTTP route, it will have an `http` module
//! containing the handlers and an `Into<axum::Router>` implementation.

pub mod auth;
pub use auth::AuthService;

pub mod support;
pub use support::SupportService;

pub mod layout;
pub use layout::LayoutService;

pub mod health;
pub use health::HealthService;
