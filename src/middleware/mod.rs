//! This module contains general purpose middleware.
//!
//! Middlewares are implemented as [tower services], so they can wrap the
//! [`axum`] router as a whole. Access control lives in its own [module].
//!
//! [tower services]: tower::Service
//! [module]: crate::access

pub(crate) mod logging;
pub(crate) mod panic_handler;
