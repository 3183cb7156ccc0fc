//! Branding shown on every page.

use serde::Serialize;

/// Names and images identifying the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, clap::Args)]
#[serde(rename_all = "camelCase")]
pub struct Branding
{
	/// URL of the favicon.
	#[arg(long = "brand-favicon", env = "BRAND_FAVICON", default_value = "/favicon.png")]
	pub favicon: String,

	/// URL of the logo. Empty if there is none.
	#[arg(long = "brand-logo", env = "BRAND_LOGO", default_value = "")]
	pub logo: String,

	/// The full title.
	#[arg(long = "brand-title", env = "BRAND_TITLE", default_value = "CL Project Management")]
	pub title: String,

	/// A shorter title, for narrow screens.
	#[arg(long = "brand-short-title", env = "BRAND_SHORT_TITLE", default_value = "PM Platform")]
	pub short_title: String,
}

impl Default for Branding
{
	fn default() -> Self
	{
		Self {
			favicon: String::from("/favicon.png"),
			logo: String::new(),
			title: String::from("CL Project Management"),
			short_title: String::from("PM Platform"),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn serializes_camel_case() -> color_eyre::Result<()>
	{
		let json = serde_json::to_value(Branding::default())?;

		testing::assert_eq!(
			json,
			serde_json::json!({
				"favicon": "/favicon.png",
				"logo": "",
				"title": "CL Project Management",
				"shortTitle": "PM Platform",
			})
		);

		Ok(())
	}
}
