//! Authorization token derivation and verification.
//!
//! Every request carries a token built from a canonical signing string:
//!
//! ```text
//! a=<app_id>&k=<secret_id>&e=<expires_at>&t=<issued_at>&r=<nonce>&u=<user_id>&f=
//! ```
//!
//! The string is signed with HMAC-SHA1 keyed by the credential's secret key, and the token is
//! the standard base64 encoding of the 20 digest bytes followed by the plaintext string. The
//! service recomputes the digest over the trailing plaintext and compares. `expires_at` is
//! always `issued_at` plus the credential's relative validity window.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{AuthToken, Credential, SecretKey},
};

type HmacSha1 = Hmac<Sha1>;

/// Largest nonce value; nonces are non-negative 31-bit integers.
pub const NONCE_MAX: u32 = i32::MAX as u32;

const DIGEST_LEN: usize = 20;

/// Produces a fresh [`AuthToken`] per call.
///
/// The nonce generator is seeded once when the signer is built and is shared behind a mutex,
/// so concurrent callers never observe torn state and two calls within the same second still
/// draw independent nonces.
pub struct Signer {
	rng: Mutex<StdRng>,
}
impl Signer {
	/// Builds a signer whose nonce generator is seeded from the operating system.
	pub fn new() -> Self {
		Self { rng: Mutex::new(StdRng::from_os_rng()) }
	}

	/// Builds a signer with a reproducible nonce sequence.
	pub fn from_seed(seed: u64) -> Self {
		Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
	}

	/// Signs `credential` at the current wall-clock second with a freshly drawn nonce.
	pub fn sign(&self, credential: &Credential) -> AuthToken {
		let issued_at = OffsetDateTime::now_utc().unix_timestamp();
		let nonce = self.next_nonce();

		sign_at(credential, issued_at, nonce)
	}

	fn next_nonce(&self) -> u32 {
		self.rng.lock().random_range(0..=NONCE_MAX)
	}
}
impl Default for Signer {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Signer(..)")
	}
}

/// Fields carried by a token's canonical signing string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedClaims {
	/// Numeric application identifier.
	pub app_id: u32,
	/// Secret id the token was issued under.
	pub secret_id: String,
	/// Unix second after which the token is rejected.
	pub expires_at: i64,
	/// Unix second the token was issued.
	pub issued_at: i64,
	/// Random nonce drawn for this token.
	pub nonce: u32,
	/// Subject user identifier.
	pub user_id: String,
}
impl SignedClaims {
	/// Returns `true` when `issued_at <= now <= expires_at`.
	pub fn is_valid_at(&self, now: i64) -> bool {
		self.issued_at <= now && now <= self.expires_at
	}

	// `secret_id` and `user_id` may contain delimiter text, so the split is anchored on the
	// first `&e=` that is followed by a well-formed numeric block.
	fn parse(canonical: &str) -> Result<Self, SignatureError> {
		let rest = canonical.strip_prefix("a=").ok_or(SignatureError::Malformed { field: "a" })?;
		let (app_id, rest) =
			rest.split_once("&k=").ok_or(SignatureError::Malformed { field: "k" })?;
		let app_id = app_id.parse().map_err(|_| SignatureError::Malformed { field: "a" })?;
		let rest = rest.strip_suffix("&f=").ok_or(SignatureError::Malformed { field: "f" })?;
		let (secret_id, (expires_at, issued_at, nonce, user_id)) = rest
			.match_indices("&e=")
			.find_map(|(at, marker)| {
				numeric_block(&rest[at + marker.len()..]).map(|block| (&rest[..at], block))
			})
			.ok_or(SignatureError::Malformed { field: "e" })?;

		Ok(Self {
			app_id,
			secret_id: secret_id.to_owned(),
			expires_at,
			issued_at,
			nonce,
			user_id: user_id.to_owned(),
		})
	}
}

/// Failures raised while verifying a token.
#[derive(Debug, ThisError)]
pub enum SignatureError {
	/// The token is not valid standard base64.
	#[error("Token is not valid base64.")]
	Encoding(#[from] base64::DecodeError),
	/// The decoded token is too short to contain a digest.
	#[error("Token is {len} bytes long, shorter than the digest.")]
	Truncated {
		/// Decoded length in bytes.
		len: usize,
	},
	/// The digest does not match the trailing plaintext.
	#[error("Token digest does not match its signing string.")]
	DigestMismatch,
	/// The signing string is not valid UTF-8.
	#[error("Signing string is not valid UTF-8.")]
	Utf8(#[from] std::str::Utf8Error),
	/// The signing string is not in canonical form.
	#[error("Signing string field `{field}` is malformed.")]
	Malformed {
		/// Key of the offending field.
		field: &'static str,
	},
}

/// Builds the canonical signing string for the given issuance second and nonce.
pub fn canonical_string(credential: &Credential, issued_at: i64, nonce: u32) -> String {
	let validity = i64::try_from(credential.validity_secs()).unwrap_or(i64::MAX);
	let expires_at = issued_at.saturating_add(validity);

	format!(
		"a={}&k={}&e={}&t={}&r={}&u={}&f=",
		credential.app_id(),
		credential.secret_id(),
		expires_at,
		issued_at,
		nonce,
		credential.user_id(),
	)
}

/// Deterministically signs `credential` for a fixed issuance second and nonce.
pub fn sign_at(credential: &Credential, issued_at: i64, nonce: u32) -> AuthToken {
	let canonical = canonical_string(credential, issued_at, nonce);
	let mut mac = keyed_mac(credential.secret_key());

	mac.update(canonical.as_bytes());

	let digest = mac.finalize().into_bytes();
	let mut raw = Vec::with_capacity(DIGEST_LEN + canonical.len());

	raw.extend_from_slice(&digest);
	raw.extend_from_slice(canonical.as_bytes());

	AuthToken::new(STANDARD.encode(raw))
}

/// Checks a token's digest against `secret_key` and returns the signed fields.
///
/// Expiry is not enforced here; use [`SignedClaims::is_valid_at`].
pub fn verify(token: &str, secret_key: &SecretKey) -> Result<SignedClaims, SignatureError> {
	let raw = STANDARD.decode(token)?;

	if raw.len() < DIGEST_LEN {
		return Err(SignatureError::Truncated { len: raw.len() });
	}

	let (digest, canonical) = raw.split_at(DIGEST_LEN);
	let mut mac = keyed_mac(secret_key);

	mac.update(canonical);
	mac.verify_slice(digest).map_err(|_| SignatureError::DigestMismatch)?;

	SignedClaims::parse(std::str::from_utf8(canonical)?)
}

fn keyed_mac(secret_key: &SecretKey) -> HmacSha1 {
	// HMAC accepts keys of any length.
	HmacSha1::new_from_slice(secret_key.expose().as_bytes())
		.expect("HMAC-SHA1 must accept keys of any length.")
}

// Parses `<expires_at>&t=<issued_at>&r=<nonce>&u=<user_id>`.
fn numeric_block(s: &str) -> Option<(i64, i64, u32, &str)> {
	let (expires_at, s) = s.split_once("&t=")?;
	let (issued_at, s) = s.split_once("&r=")?;
	let (nonce, user_id) = s.split_once("&u=")?;

	Some((expires_at.parse().ok()?, issued_at.parse().ok()?, nonce.parse().ok()?, user_id))
}
