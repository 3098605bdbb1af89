//! Immutable application identity used to sign every request.

// self
use crate::{_prelude::*, auth::SecretKey, error::ConfigError};

/// Longest user id, in bytes, the service accepts inside a signature.
pub const USER_ID_MAX_LEN: usize = 110;
/// Signature validity applied by [`Credential::with_default_validity`].
pub const DEFAULT_VALIDITY_SECS: u64 = 1_000;

/// Application identity plus the secret material used to derive authorization tokens.
///
/// A credential is validated once at construction and cannot be changed afterwards; share it
/// by reference or clone it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	app_id: u32,
	secret_id: String,
	secret_key: SecretKey,
	user_id: String,
	validity_secs: u64,
}
impl Credential {
	/// Builds a credential whose signatures stay valid for `validity_secs` after issuance.
	///
	/// A validity of zero produces signatures valid only at the instant they are issued.
	pub fn new(
		app_id: u32,
		secret_id: impl Into<String>,
		secret_key: impl Into<String>,
		user_id: impl Into<String>,
		validity_secs: u64,
	) -> Result<Self, ConfigError> {
		let user_id = user_id.into();

		if user_id.len() > USER_ID_MAX_LEN {
			return Err(ConfigError::UserIdTooLong { len: user_id.len(), max: USER_ID_MAX_LEN });
		}

		Ok(Self {
			app_id,
			secret_id: secret_id.into(),
			secret_key: SecretKey::new(secret_key),
			user_id,
			validity_secs,
		})
	}

	/// Builds a credential using [`DEFAULT_VALIDITY_SECS`].
	pub fn with_default_validity(
		app_id: u32,
		secret_id: impl Into<String>,
		secret_key: impl Into<String>,
		user_id: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::new(app_id, secret_id, secret_key, user_id, DEFAULT_VALIDITY_SECS)
	}

	/// Numeric application identifier.
	pub fn app_id(&self) -> u32 {
		self.app_id
	}

	/// Public half of the key pair; transmitted inside every token.
	pub fn secret_id(&self) -> &str {
		&self.secret_id
	}

	/// HMAC key; never transmitted.
	pub fn secret_key(&self) -> &SecretKey {
		&self.secret_key
	}

	/// Subject user identifier.
	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	/// Seconds a signature remains valid after issuance.
	pub fn validity_secs(&self) -> u64 {
		self.validity_secs
	}
}
