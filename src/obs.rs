//! Optional observability helpers for dispatched calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `youtu.call` with the `endpoint` and
//!   `stage` (call site) fields, plus debug events carrying request and response bodies when
//!   [`ClientConfig::debug`](crate::config::ClientConfig::debug) is set.
//! - Enable `metrics` to increment the `youtu_call_total` counter for every
//!   attempt/success/failure, labeled by `endpoint` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};
#[cfg(all(test, feature = "tracing"))] pub(crate) use self::tracing::capture;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// A response envelope was decoded.
	Success,
	/// An error propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
