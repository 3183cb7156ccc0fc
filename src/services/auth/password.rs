//! Password hashing.
//!
//! Hashes are stored as PHC strings, so the parameters travel with the hash.

use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hashes `password` with a fresh random salt.
pub(crate) fn hash(password: &str) -> Result<String, password_hash::Error>
{
	let salt = SaltString::generate(&mut OsRng);
	let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

	Ok(hash.to_string())
}

/// Checks `password` against a stored PHC `hash`.
///
/// Unparseable hashes never verify.
pub(crate) fn verify(password: &str, hash: &str) -> bool
{
	let Ok(hash) = PasswordHash::new(hash) else {
		tracing::warn!("stored password hash is not a valid PHC string");
		return false;
	};

	Argon2::default()
		.verify_password(password.as_bytes(), &hash)
		.is_ok()
}
