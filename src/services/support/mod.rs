//! The [`SupportService`] forwards support requests from users to Slack.
//!
//! Messages are not posted to Slack directly; they go through an internal API
//! which owns the Slack credentials.

use std::fmt;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use time::macros::format_description;
use time::OffsetDateTime;
use url::Url;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::{SupportRequest, SupportResponse};
use models::SlackMessage;

pub(crate) mod http;

/// The default Slack channel support requests are posted to.
pub const DEFAULT_CHANNEL: &str = "general";

/// A service for forwarding support requests.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct SupportService
{
	http_client: reqwest::Client,
	api_endpoint: Arc<Url>,
	api_key: Arc<str>,
	channel: Arc<str>,
}

impl fmt::Debug for SupportService
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("SupportService")
			.field("api_endpoint", &format_args!("{:?}", self.api_endpoint.as_str()))
			.field("channel", &self.channel)
			.finish_non_exhaustive()
	}
}

impl SupportService
{
	/// Creates a new [`SupportService`].
	pub fn new(
		http_client: reqwest::Client,
		api_endpoint: Url,
		api_key: String,
		channel: String,
	) -> Self
	{
		Self {
			http_client,
			api_endpoint: Arc::new(api_endpoint),
			api_key: api_key.into(),
			channel: channel.into(),
		}
	}

	/// The URL messages are posted to.
	fn send_url(&self) -> String
	{
		format!("{}/slack/send", self.api_endpoint.as_str().trim_end_matches('/'))
	}

	/// Formats a support request and forwards it to Slack.
	///
	/// `source` is the page the request was sent from.
	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	pub async fn submit(&self, req: SupportRequest, source: &str) -> Result<SupportResponse>
	{
		let message = req
			.message
			.filter(|message| !message.is_empty())
			.ok_or(Error::MissingMessage)?;

		let text = format_message(source, req.email.as_deref(), &message, OffsetDateTime::now_utc());
		let url = self.send_url();

		tracing::debug!(%url, channel = %self.channel, "forwarding support request");

		let response = self
			.http_client
			.post(&url)
			.bearer_auth(&self.api_key)
			.json(&SlackMessage { message: &text, channel: &self.channel })
			.send()
			.await
			.inspect_err(|error| {
				tracing::error!(%error, "failed to send support message");
			})?;

		let status = response.status();

		if !status.is_success() {
			let response_body = response.text().await.ok();

			tracing::error! {
				%status,
				?response_body,
				"internal api rejected support message",
			};

			return Err(Error::Rejected { status });
		}

		let body = response.text().await?;
		let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));

		tracing::info!("forwarded support request");

		Ok(SupportResponse { success: true, data })
	}
}

/// Determines which page a support request came from.
///
/// Prefers `Referer` over `Origin`; empty headers count as missing.
pub fn request_source(headers: &HeaderMap) -> &str
{
	[header::REFERER, header::ORIGIN]
		.into_iter()
		.filter_map(|name| headers.get(name))
		.filter_map(|value| value.to_str().ok())
		.find(|value| !value.is_empty())
		.unwrap_or("Unknown")
}

/// Formats the Slack message for a support request.
pub fn format_message(
	source: &str,
	email: Option<&str>,
	message: &str,
	timestamp: OffsetDateTime,
) -> String
{
	let format = format_description!("[day]/[month]/[year], [hour]:[minute]:[second]");
	let timestamp = timestamp
		.format(&format)
		.unwrap_or_else(|_| timestamp.to_string());

	let mut text = format!("🆘 *New Support Request*\n*From:* {source}\n\n");

	if let Some(email) = email.filter(|email| !email.is_empty()) {
		text.push_str(&format!("*Email:* {email}\n\n"));
	}

	text.push_str(&format!("*Message:*\n{message}\n\n*Time:* {timestamp}"));

	text
}

#[cfg(test)]
mod tests
{
	use std::sync::Mutex;

	use axum::extract::State;
	use axum::http::HeaderValue;
	use axum::{routing, Json, Router};
	use time::macros::datetime;
	use tokio::net::TcpListener;

	use super::*;
	use crate::testing;

	/// What the stub API received.
	#[derive(Debug, Default, Clone)]
	struct Received
	{
		authorization: Option<String>,
		body: Option<serde_json::Value>,
	}

	/// Spawns a stub of the internal API and returns its base URL.
	async fn stub_api(
		status: axum::http::StatusCode,
		received: Arc<Mutex<Received>>,
	) -> color_eyre::Result<Url>
	{
		let app = Router::new()
			.route(
				"/slack/send",
				routing::post(
					move |State(received): State<Arc<Mutex<Received>>>,
					      headers: HeaderMap,
					      Json(body): Json<serde_json::Value>| async move {
						if let Ok(mut received) = received.lock() {
							received.authorization = headers
								.get(header::AUTHORIZATION)
								.and_then(|value| value.to_str().ok())
								.map(String::from);
							received.body = Some(body);
						}

						(status, Json(serde_json::json!({ "ok": true })))
					},
				),
			)
			.with_state(received);

		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;

		tokio::spawn(async move { axum::serve(listener, app).await });

		Ok(format!("http://{addr}").parse()?)
	}

	fn svc(api_endpoint: Url) -> SupportService
	{
		SupportService::new(
			reqwest::Client::new(),
			api_endpoint,
			String::from("internal-key"),
			String::from(DEFAULT_CHANNEL),
		)
	}

	fn request(message: Option<&str>, email: Option<&str>) -> SupportRequest
	{
		SupportRequest { message: message.map(String::from), email: email.map(String::from) }
	}

	#[test]
	fn formats_message_with_email() -> color_eyre::Result<()>
	{
		let text = format_message(
			"https://portal.example.com/dashboard",
			Some("ada@example.com"),
			"The board will not load.",
			datetime!(2024-03-05 07:08:09 UTC),
		);

		testing::assert_eq!(
			text,
			"🆘 *New Support Request*\n*From:* https://portal.example.com/dashboard\n\n*Email:* ada@example.com\n\n*Message:*\nThe board will not load.\n\n*Time:* 05/03/2024, 07:08:09",
		);

		Ok(())
	}

	#[test]
	fn formats_message_without_email() -> color_eyre::Result<()>
	{
		for email in [None, Some("")] {
			let text = format_message("Unknown", email, "Help", datetime!(2024-12-31 23:59:59 UTC));

			testing::assert_eq!(
				text,
				"🆘 *New Support Request*\n*From:* Unknown\n\n*Message:*\nHelp\n\n*Time:* 31/12/2024, 23:59:59",
			);
		}

		Ok(())
	}

	#[test]
	fn source_prefers_referer() -> color_eyre::Result<()>
	{
		let mut headers = HeaderMap::new();

		testing::assert_eq!(request_source(&headers), "Unknown");

		headers.insert(header::ORIGIN, HeaderValue::from_static("https://portal.example.com"));
		testing::assert_eq!(request_source(&headers), "https://portal.example.com");

		headers.insert(header::REFERER, HeaderValue::from_static(""));
		testing::assert_eq!(request_source(&headers), "https://portal.example.com");

		headers.insert(header::REFERER, HeaderValue::from_static("https://portal.example.com/x"));
		testing::assert_eq!(request_source(&headers), "https://portal.example.com/x");

		Ok(())
	}

	#[tokio::test]
	async fn empty_message_is_rejected() -> color_eyre::Result<()>
	{
		let svc = svc("http://127.0.0.1:1".parse()?);

		testing::assert_matches!(
			svc.submit(request(None, None), "Unknown").await,
			Err(Error::MissingMessage)
		);
		testing::assert_matches!(
			svc.submit(request(Some(""), None), "Unknown").await,
			Err(Error::MissingMessage)
		);

		Ok(())
	}

	#[tokio::test]
	async fn forwards_to_internal_api() -> color_eyre::Result<()>
	{
		let received = Arc::new(Mutex::new(Received::default()));
		let api = stub_api(axum::http::StatusCode::OK, Arc::clone(&received)).await?;
		let response = svc(api)
			.submit(request(Some("Help"), Some("ada@example.com")), "https://portal.example.com/")
			.await?;

		testing::assert_eq!(
			response,
			SupportResponse { success: true, data: serde_json::json!({ "ok": true }) }
		);

		let received = received
			.lock()
			.map_err(|_| color_eyre::eyre::eyre!("poisoned"))?
			.clone();

		testing::assert_eq!(received.authorization.as_deref(), Some("Bearer internal-key"));

		let body = received.body.unwrap_or_default();
		let message = body["message"].as_str().unwrap_or_default();

		testing::assert_eq!(body["channel"], "general");
		testing::assert!(message.starts_with("🆘 *New Support Request*\n*From:* https://portal.example.com/\n\n"));
		testing::assert!(message.contains("*Email:* ada@example.com\n\n*Message:*\nHelp\n\n*Time:* "));

		Ok(())
	}

	#[tokio::test]
	async fn upstream_failure_is_an_error() -> color_eyre::Result<()>
	{
		let received = Arc::new(Mutex::new(Received::default()));
		let api = stub_api(axum::http::StatusCode::BAD_GATEWAY, received).await?;
		let result = svc(api).submit(request(Some("Help"), None), "Unknown").await;

		testing::assert_matches!(result, Err(Error::Rejected { status }) if status.as_u16() == 502);

		Ok(())
	}

	#[tokio::test]
	async fn unreachable_api_is_an_error() -> color_eyre::Result<()>
	{
		let result = svc("http://127.0.0.1:1".parse()?)
			.submit(request(Some("Help"), None), "Unknown")
			.await;

		testing::assert_matches!(result, Err(Error::Http(_)));

		Ok(())
	}
}
