#![doc = include_str!("../README.md")]

use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::extract::ConnectInfo;
use axum::Router;
use sqlx::mysql::MySqlPoolOptions;
use tokio::net::TcpListener;

use self::access::AccessControlLayer;
use self::services::{AuthService, HealthService, LayoutService, SupportService};

pub mod runtime;
pub use runtime::Config;

pub mod http;
pub mod middleware;
pub mod access;
pub mod services;

#[cfg(test)]
mod testing;

#[allow(clippy::missing_docs_in_private_items)]
type Server = axum::serve::Serve<
	IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
	axum::middleware::AddExtension<Router, ConnectInfo<SocketAddr>>,
>;

/// Run the portal.
///
/// This function will not exit until a shutdown signal is received.
pub async fn run(config: Config) -> anyhow::Result<()>
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(runtime::signals::shutdown())
		.await
		.context("run http server")
}

/// Runs the necessary setup for the portal and returns a future that will run
/// the server when polled.
#[tracing::instrument(skip_all)]
async fn server(config: Config) -> anyhow::Result<Server>
{
	tracing::debug!(?config, "initializing services");

	let database = MySqlPoolOptions::new()
		.connect(config.database_url.as_str())
		.await
		.context("connect to database")?;

	sqlx::migrate!("./migrations")
		.run(&database)
		.await
		.context("run database migrations")?;

	let auth_svc = AuthService::new(database, config.public_url, config.cookie_domain);
	let support_svc = SupportService::new(
		reqwest::Client::new(),
		config.api_endpoint,
		config.internal_api_key,
		config.support_channel,
	);
	let layout_svc = LayoutService::new(config.branding);

	let service = router(auth_svc, support_svc, layout_svc)
		.into_make_service_with_connect_info::<SocketAddr>();

	let addr = SocketAddr::new(config.ip, config.port);
	let tcp_listener = TcpListener::bind(addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;
	tracing::info!(%addr, prod = cfg!(feature = "production"), "listening for requests");

	Ok(axum::serve(tcp_listener, service))
}

/// Builds the portal's HTTP router.
///
/// Pages and API routes sit behind access control; the sign-in/sign-out
/// actions and the healthcheck do not.
pub fn router(auth_svc: AuthService, support_svc: SupportService, layout_svc: LayoutService) -> Router
{
	let guarded = Router::new()
		.merge(Router::from(layout_svc))
		.merge(Router::from(support_svc))
		.merge(services::auth::http::pages())
		.fallback(http::not_found)
		.layer(AccessControlLayer::new(auth_svc.clone()));

	guarded
		.merge(Router::from(auth_svc))
		.merge(Router::from(HealthService::new()))
		.layer(middleware::panic_handler::layer())
		.layer(middleware::logging::layer!())
}

#[cfg(test)]
mod tests
{
	use axum::http::{header, StatusCode};
	use axum::response::Response;
	use tower::ServiceExt;

	use super::*;
	use crate::services::layout::Branding;
	use crate::services::support::DEFAULT_CHANNEL;

	fn app() -> color_eyre::Result<Router>
	{
		let auth_svc = AuthService::new(
			testing::unreachable_database()?,
			"https://portal.example.com".parse()?,
			String::from("portal.example.com"),
		);

		let support_svc = SupportService::new(
			reqwest::Client::new(),
			"http://127.0.0.1:1".parse()?,
			String::from("internal-key"),
			String::from(DEFAULT_CHANNEL),
		);

		Ok(router(auth_svc, support_svc, LayoutService::new(Branding::default())))
	}

	fn location(response: &Response) -> Option<&str>
	{
		response
			.headers()
			.get(header::LOCATION)
			.and_then(|value| value.to_str().ok())
	}

	#[tokio::test]
	async fn anonymous_dashboard_visit_goes_to_signin() -> color_eyre::Result<()>
	{
		let response = app()?.oneshot(testing::get("/dashboard/projects")).await?;

		testing::assert_eq!(response.status(), StatusCode::FOUND);
		testing::assert_eq!(location(&response), Some("/signin"));

		Ok(())
	}

	#[tokio::test]
	async fn anonymous_root_visit_is_allowed() -> color_eyre::Result<()>
	{
		let response = app()?.oneshot(testing::get("/")).await?;

		testing::assert_eq!(response.status(), StatusCode::OK);

		Ok(())
	}

	#[tokio::test]
	async fn healthcheck_is_reachable() -> color_eyre::Result<()>
	{
		let response = app()?.oneshot(testing::get("/api/health")).await?;

		testing::assert_eq!(response.status(), StatusCode::OK);

		Ok(())
	}

	#[tokio::test]
	async fn unknown_routes_are_problems() -> color_eyre::Result<()>
	{
		let response = app()?.oneshot(testing::get("/nope")).await?;

		testing::assert_eq!(response.status(), StatusCode::NOT_FOUND);
		testing::assert_eq!(
			response.headers().get(header::CONTENT_TYPE).map(|value| value.as_bytes()),
			Some(&b"application/problem+json"[..]),
		);

		Ok(())
	}
}
