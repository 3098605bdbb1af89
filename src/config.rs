//! Explicit client configuration passed to the dispatcher at construction.

// self
use crate::{_prelude::*, error::ConfigError};

/// Connection settings for a [`Dispatcher`](crate::dispatch::Dispatcher).
///
/// Additional fields may be added in future releases, so downstream code should construct
/// values with [`ClientConfig::new`] or [`Default`] and the `with_*` helpers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Service host, optionally with a port (`api.youtu.qq.com`, `127.0.0.1:8080`).
	pub host: String,
	/// Deadline covering one full request/response round trip.
	pub timeout: Duration,
	/// Emits request and response bodies as debug events; never changes behavior.
	pub debug: bool,
}
impl ClientConfig {
	/// Host of the public service.
	pub const DEFAULT_HOST: &str = "api.youtu.qq.com";
	/// Round-trip deadline applied when none is configured.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

	/// Creates a configuration for `host` with the default timeout.
	pub fn new(host: impl Into<String>) -> Self {
		Self { host: host.into(), timeout: Self::DEFAULT_TIMEOUT, debug: false }
	}

	/// Overrides the round-trip deadline.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Toggles verbose debug events.
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Returns the `http://<host>/youtu/api/` base every endpoint is resolved against.
	pub fn base_url(&self) -> Result<Url, ConfigError> {
		let raw = format!("http://{}/youtu/api/", self.host);
		let url = Url::parse(&raw)
			.map_err(|e| ConfigError::InvalidHost { host: self.host.clone(), source: Some(e) })?;

		if url.path() != "/youtu/api/" || url.query().is_some() || url.fragment().is_some() {
			return Err(ConfigError::InvalidHost { host: self.host.clone(), source: None });
		}

		Ok(url)
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self::new(Self::DEFAULT_HOST)
	}
}
