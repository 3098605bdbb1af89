//! Signed HTTP/JSON client for the Youtu face-analysis service: HMAC-SHA1 credential signing
//! plus one generic, typed dispatch call shared by every endpoint.
//!
//! The crate is split along the protocol's seams:
//!
//! - [`auth`] holds the immutable [`Credential`](auth::Credential) and the
//!   [`Signer`](auth::Signer) that derives a fresh authorization token per call.
//! - [`dispatch`] owns the [`Dispatcher`](dispatch::Dispatcher), which marshals a request,
//!   signs it, performs one blocking POST, and unmarshals the response envelope.
//! - [`http`] is the transport seam; the default implementation wraps a blocking `reqwest`
//!   client behind the `reqwest` feature.
//! - [`api`] names the service's endpoints and their typed wire shapes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod obs;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{blocking::Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
