//! Request / Response types for this service.

use serde::{Deserialize, Serialize};

/// Request payload for submitting a support request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SupportRequest
{
	/// What the user needs help with.
	#[serde(default)]
	pub message: Option<String>,

	/// Where the user would like to be contacted, if anywhere.
	#[serde(default)]
	pub email: Option<String>,
}

/// Response payload for a forwarded support request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportResponse
{
	/// Always `true`; failures are reported as problem details.
	pub success: bool,

	/// Whatever the internal API responded with.
	pub data: serde_json::Value,
}

/// The payload sent to the internal API.
#[derive(Debug, Serialize)]
pub(super) struct SlackMessage<'a>
{
	/// The formatted message text.
	pub message: &'a str,

	/// The Slack channel to post to.
	pub channel: &'a str,
}
