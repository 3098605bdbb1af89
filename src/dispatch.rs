//! Generic marshal → sign → POST → unmarshal round trip shared by every endpoint.
//!
//! [`Dispatcher::call`] is the only operation that touches the network. It serializes the
//! request, signs a fresh token, performs one blocking POST to
//! `http://<host>/youtu/api/<endpoint>`, and decodes whatever body comes back into the
//! caller's [`ResponseEnvelope`] type. Nothing is retried or cached.

pub mod envelope;

pub use envelope::*;

// std
use std::time::Instant;
// crates.io
use http::{
	HeaderValue, Method,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, EXPECT, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::{AuthToken, Credential, Signer},
	config::ClientConfig,
	error::{ConfigError, DecodeError},
	http::{ApiHttpClient, HttpRequest, TransportErrorMapper},
	obs::{self, CallOutcome, CallSpan, CallSpanGuard, PayloadDirection},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default blocking reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Performs signed calls against one configured host on behalf of one credential.
///
/// The credential and configuration are read-only after construction and each call keeps its
/// state on the stack, so a dispatcher can be shared behind an [`Arc`] by any number of
/// threads. The signer's nonce generator is the only shared mutable state and is internally
/// synchronized.
pub struct Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	credential: Credential,
	signer: Arc<Signer>,
	config: ClientConfig,
	base_url: Url,
}
impl<C, M> Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a dispatcher that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credential: Credential,
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self, ConfigError> {
		let base_url = config.base_url()?;

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			credential,
			signer: Arc::new(Signer::new()),
			config,
			base_url,
		})
	}

	/// Replaces the signer, e.g. with a seeded one for reproducible nonces.
	pub fn with_signer(mut self, signer: impl Into<Arc<Signer>>) -> Self {
		self.signer = signer.into();

		self
	}

	/// Credential every call is signed with.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Configuration the dispatcher was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Resolves the URL for `endpoint`, rejecting names that are not a single path segment.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let valid = !endpoint.is_empty()
			&& endpoint.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

		if !valid {
			return Err(ConfigError::InvalidEndpoint { name: endpoint.to_owned() });
		}

		self.base_url
			.join(endpoint)
			.map_err(|_| ConfigError::InvalidEndpoint { name: endpoint.to_owned() })
	}

	/// Calls `endpoint` with `request` using the configured timeout.
	///
	/// The decoded response is returned even when its error code is non-zero; see
	/// [`ResponseEnvelope::into_result`] for an opt-in conversion.
	pub fn call<Req, Rsp>(&self, endpoint: &str, request: &Req) -> Result<Rsp>
	where
		Req: ?Sized + Serialize,
		Rsp: ResponseEnvelope,
	{
		self.call_with_timeout(endpoint, request, self.config.timeout)
	}

	/// Calls `endpoint` with `request`, bounding the round trip by `timeout`.
	pub fn call_with_timeout<Req, Rsp>(
		&self,
		endpoint: &str,
		request: &Req,
		timeout: Duration,
	) -> Result<Rsp>
	where
		Req: ?Sized + Serialize,
		Rsp: ResponseEnvelope,
	{
		let span = CallSpan::new(endpoint).entered();
		let started = Instant::now();

		obs::record_call_outcome(endpoint, CallOutcome::Attempt);

		let result = self.dispatch(&span, endpoint, request, timeout);
		let outcome = if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure };

		span.record_outcome(outcome);
		obs::record_call_outcome(endpoint, outcome);
		obs::record_call_duration(endpoint, started.elapsed());

		result
	}

	fn dispatch<Req, Rsp>(
		&self,
		span: &CallSpanGuard,
		endpoint: &str,
		request: &Req,
		timeout: Duration,
	) -> Result<Rsp>
	where
		Req: ?Sized + Serialize,
		Rsp: ResponseEnvelope,
	{
		let url = self.endpoint_url(endpoint)?;
		let body = serde_json::to_vec(request)
			.map_err(|source| Error::Encode { endpoint: endpoint.to_owned(), source })?;

		obs::debug_payload(self.config.debug, PayloadDirection::Request, None, &body);

		let token = self.signer.sign(&self.credential);
		let request = build_request(&url, &token, body)?;
		let response = self
			.http_client
			.execute(request, timeout)
			.map_err(|e| self.transport_mapper.map_transport_error(endpoint, e))?;
		let status = response.status().as_u16();
		let body = response.into_body();

		span.record_status(status);
		obs::debug_payload(self.config.debug, PayloadDirection::Response, Some(status), &body);

		decode_response(endpoint, status, body)
	}
}
impl<C, M> Clone for Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			credential: self.credential.clone(),
			signer: self.signer.clone(),
			config: self.config.clone(),
			base_url: self.base_url.clone(),
		}
	}
}
impl<C, M> Debug for Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("credential", &self.credential)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
#[cfg(feature = "reqwest")]
impl ReqwestDispatcher {
	/// Creates a dispatcher backed by the default blocking reqwest client.
	pub fn new(credential: Credential, config: ClientConfig) -> Result<Self, ConfigError> {
		Self::with_http_client(
			credential,
			config,
			ReqwestHttpClient::new()?,
			ReqwestTransportErrorMapper,
		)
	}
}

fn build_request(url: &Url, token: &AuthToken, body: Vec<u8>) -> Result<HttpRequest> {
	let request = http::Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(AUTHORIZATION, token.expose())
		.header(CONTENT_TYPE, HeaderValue::from_static("text/json"))
		.header(USER_AGENT, HeaderValue::from_static(""))
		.header(ACCEPT, HeaderValue::from_static("*/*"))
		.header(EXPECT, HeaderValue::from_static("100-continue"))
		.body(body)
		.map_err(ConfigError::from)?;

	Ok(request)
}

fn decode_response<Rsp>(endpoint: &str, status: u16, body: Vec<u8>) -> Result<Rsp>
where
	Rsp: ResponseEnvelope,
{
	let decoded = {
		let mut de = serde_json::Deserializer::from_slice(&body);

		serde_path_to_error::deserialize(&mut de)
	};

	decoded.map_err(|source| {
		DecodeError { endpoint: endpoint.to_owned(), status, body, source }.into()
	})
}
