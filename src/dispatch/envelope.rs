//! Response envelope contract shared by every endpoint.

// self
use crate::_prelude::*;

/// Contract every response shape must satisfy: an application error code and message,
/// decoded whatever the HTTP status was.
///
/// The dispatcher hands decoded envelopes back untouched even when [`error_code`] is non-zero;
/// each endpoint defines its own code space, so interpreting it is the caller's job.
/// [`into_result`] is an opt-in shortcut for callers that treat any non-zero code as failure.
///
/// [`error_code`]: ResponseEnvelope::error_code
/// [`into_result`]: ResponseEnvelope::into_result
pub trait ResponseEnvelope
where
	Self: DeserializeOwned,
{
	/// Application-level error code; zero means success.
	fn error_code(&self) -> i32;

	/// Human-readable message accompanying [`error_code`](ResponseEnvelope::error_code).
	fn error_message(&self) -> &str;

	/// Returns `true` when the service reported success.
	fn is_success(&self) -> bool {
		self.error_code() == 0
	}

	/// Maps a non-zero error code to [`Error::Application`].
	fn into_result(self) -> Result<Self> {
		if self.is_success() {
			Ok(self)
		} else {
			Err(Error::Application {
				code: self.error_code(),
				message: self.error_message().to_owned(),
			})
		}
	}
}

/// Generic envelope pairing the service's error fields with an endpoint-specific body.
///
/// The body is flattened, so its fields sit next to `errorcode` and `errormsg` on the wire.
/// The default body keeps every remaining field as raw JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Map<String, serde_json::Value>> {
	/// Application-level error code; zero means success.
	#[serde(rename = "errorcode")]
	pub error_code: i32,
	/// Human-readable error message; empty on success.
	#[serde(rename = "errormsg", default)]
	pub error_message: String,
	/// Endpoint-specific fields.
	#[serde(flatten)]
	pub body: T,
}
impl<T> ResponseEnvelope for Envelope<T>
where
	T: DeserializeOwned,
{
	fn error_code(&self) -> i32 {
		self.error_code
	}

	fn error_message(&self) -> &str {
		&self.error_message
	}
}
