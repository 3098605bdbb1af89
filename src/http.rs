//! Transport primitives for signed service calls.
//!
//! The module exposes [`ApiHttpClient`] and [`TransportErrorMapper`] so downstream crates can
//! plug in their own blocking HTTP stack while the dispatcher keeps ownership of request
//! construction, signing, and error classification.

// self
use crate::{_prelude::*, error::TransportError};

/// HTTP request handed to a transport; the body is the serialized JSON payload.
pub type HttpRequest = http::Request<Vec<u8>>;
/// HTTP response returned by a transport; the body is read in full.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Abstraction over blocking HTTP transports capable of executing one service round trip.
///
/// Implementations must send the request exactly as built (method, URI, headers, body), read
/// the full response body whatever the status code, and give up once `timeout` has elapsed
/// without returning a partial response. They must be `Send + Sync + 'static` so a single
/// dispatcher can be shared across threads.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Performs a single round trip bounded by `timeout`.
	fn execute(
		&self,
		request: HttpRequest,
		timeout: Duration,
	) -> Result<HttpResponse, Self::TransportError>;
}

/// Classifies a transport's native errors into [`TransportError`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error raised while calling `endpoint`.
	fn map_transport_error(&self, endpoint: &str, error: E) -> TransportError;
}

/// Thin wrapper around a blocking [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The service answers every call directly, so the default client never follows redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds the default blocking client.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing blocking [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(
		&self,
		request: HttpRequest,
		timeout: Duration,
	) -> Result<HttpResponse, Self::TransportError> {
		let (parts, body) = request.into_parts();
		let response = self
			.0
			.request(parts.method, parts.uri.to_string())
			.headers(parts.headers)
			.body(body)
			.timeout(timeout)
			.send()?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let mut response_new = HttpResponse::new(response.bytes()?.to_vec());

		*response_new.status_mut() = status;
		*response_new.headers_mut() = headers;

		Ok(response_new)
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: &str, error: ReqwestError) -> TransportError {
		if error.is_timeout() {
			TransportError::timeout(endpoint, error)
		} else if error.is_connect() {
			TransportError::connect(endpoint, error)
		} else {
			TransportError::other(endpoint, error)
		}
	}
}
