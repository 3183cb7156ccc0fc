//! Session IDs.

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use uuid::Uuid;

/// A session ID.
///
/// This is a randomly generated UUID, stored in hyphenated form both in the
/// session cookie and the database.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
#[debug("*****")]
#[display("{_0}")]
pub struct SessionID(Uuid);

impl SessionID
{
	/// Generates a new random session ID.
	pub fn new() -> Self
	{
		Self(Uuid::new_v4())
	}
}

impl FromStr for SessionID
{
	type Err = uuid::Error;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		value.parse::<Uuid>().map(Self)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn debug_output_is_redacted() -> color_eyre::Result<()>
	{
		let id = SessionID::new();

		testing::assert_eq!(format!("{id:?}"), "*****");
		testing::assert_eq!(id.to_string().parse::<SessionID>()?, id);

		Ok(())
	}
}
