// self
use crate::{_prelude::*, obs::CallOutcome};

/// Counter incremented once per attempt and once per terminal outcome.
pub const CALL_TOTAL: &str = "youtu_call_total";
/// Histogram of wall-clock call latency in seconds, failures included.
pub const CALL_DURATION_SECONDS: &str = "youtu_call_duration_seconds";

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(endpoint: &str, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			CALL_TOTAL,
			"endpoint" => endpoint.to_owned(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, outcome);
	}
}

/// Records how long a call to `endpoint` took, from signing to decode.
pub fn record_call_duration(endpoint: &str, elapsed: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(CALL_DURATION_SECONDS, "endpoint" => endpoint.to_owned())
			.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, elapsed);
	}
}
