//! Client-level error types shared across signing, dispatch, and transports.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request value could not be serialized; nothing was sent.
	#[error("Request body for `{endpoint}` could not be encoded.")]
	Encode {
		/// Endpoint the request was addressed to.
		endpoint: String,
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// No response was obtained from the service.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Service reported a non-zero application error code.
	///
	/// Never raised by the dispatcher itself; produced only by
	/// [`ResponseEnvelope::into_result`](crate::dispatch::ResponseEnvelope::into_result).
	#[error("Service returned error code {code}: {message}.")]
	Application {
		/// Endpoint-defined error code.
		code: i32,
		/// Human-readable message supplied by the service.
		message: String,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Configured host cannot form a valid service URL.
	#[error("Host `{host}` cannot form a valid service URL.")]
	InvalidHost {
		/// Host string as configured.
		host: String,
		/// Underlying parsing failure; absent when the host parsed but carried a path or query.
		#[source]
		source: Option<url::ParseError>,
	},
	/// Endpoint name cannot be used as a path segment.
	#[error("Endpoint name `{name}` is invalid.")]
	InvalidEndpoint {
		/// Endpoint name as supplied by the caller.
		name: String,
	},
	/// Credential user id exceeds the protocol limit.
	#[error("User id is {len} bytes long, exceeding the {max}-byte limit.")]
	UserIdTooLong {
		/// Observed length in bytes.
		len: usize,
		/// Maximum permitted length in bytes.
		max: usize,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO); no response was obtained.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The round trip did not finish before the deadline.
	#[error("Request to `{endpoint}` timed out.")]
	Timeout {
		/// Endpoint the request was addressed to.
		endpoint: String,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// The connection could not be established (DNS, refused, reset).
	#[error("Connection failed while calling `{endpoint}`.")]
	Connect {
		/// Endpoint the request was addressed to.
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Any other transport failure.
	#[error("Network error occurred while calling `{endpoint}`.")]
	Other {
		/// Endpoint the request was addressed to.
		endpoint: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific timeout error.
	pub fn timeout(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Wraps a transport-specific connection error.
	pub fn connect(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Connect { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Wraps any other transport-specific error.
	pub fn other(
		endpoint: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Other { endpoint: endpoint.into(), source: Box::new(src) }
	}

	/// Returns `true` when the failure was a deadline expiry.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}
}

/// Response body that could not be decoded into the caller's shape.
///
/// The raw body is preserved so callers can inspect what the service actually sent.
#[derive(Debug, ThisError)]
#[error("Response from `{endpoint}` could not be decoded at `{}`.", .source.path())]
pub struct DecodeError {
	/// Endpoint the request was addressed to.
	pub endpoint: String,
	/// HTTP status code of the response.
	pub status: u16,
	/// Raw response body exactly as received.
	pub body: Vec<u8>,
	/// Structured parsing failure, including the JSON path where it occurred.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl DecodeError {
	/// Returns the raw body interpreted as UTF-8, replacing invalid sequences.
	pub fn body_lossy(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}
