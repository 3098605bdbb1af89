// self
use crate::{_prelude::*, obs::CallOutcome};

/// Side of the round trip a logged payload belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadDirection {
	/// Serialized request body, logged before signing.
	Request,
	/// Raw response body, logged before decoding.
	Response,
}
impl PayloadDirection {
	/// Returns the label used in the `direction` event field.
	pub const fn as_str(self) -> &'static str {
		match self {
			PayloadDirection::Request => "request",
			PayloadDirection::Response => "response",
		}
	}
}

/// Span covering one dispatched call.
///
/// The span is named `youtu.call` and carries the `endpoint` up front; `status` and `outcome`
/// are filled in once known.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a span for a call to `endpoint`.
	pub fn new(endpoint: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"youtu.call",
				endpoint,
				status = tracing::field::Empty,
				outcome = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = endpoint;

			Self {}
		}
	}

	/// Enters the span for the duration of a blocking call.
	pub fn entered(self) -> CallSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CallSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CallSpanGuard {}
		}
	}
}

/// RAII guard returned by [`CallSpan::entered`].
pub struct CallSpanGuard {
	#[cfg(feature = "tracing")]
	guard: tracing::span::EnteredSpan,
}
impl CallSpanGuard {
	/// Records the HTTP status of the response.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		self.guard.record("status", status);

		#[cfg(not(feature = "tracing"))]
		let _ = status;
	}

	/// Records how the call ended.
	pub fn record_outcome(&self, outcome: CallOutcome) {
		#[cfg(feature = "tracing")]
		self.guard.record("outcome", outcome.as_str());

		#[cfg(not(feature = "tracing"))]
		let _ = outcome;
	}
}
impl Debug for CallSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CallSpanGuard(..)")
	}
}

/// Emits a payload as a debug event when `enabled`.
///
/// Only bodies are logged. The authorization header never reaches this function.
pub fn debug_payload(
	enabled: bool,
	direction: PayloadDirection,
	status: Option<u16>,
	body: &[u8],
) {
	#[cfg(feature = "tracing")]
	if enabled {
		tracing::debug!(
			direction = direction.as_str(),
			status,
			body = %String::from_utf8_lossy(body),
			"payload"
		);
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, direction, status, body);
	}
}

/// In-memory subscriber that renders spans and events as `key=value` lines.
#[cfg(all(test, feature = "tracing"))]
pub(crate) mod capture {
	// std
	use std::fmt::Write as _;
	// crates.io
	use tracing::{
		Event, Metadata, Subscriber,
		field::{Field, Visit},
		span::{Attributes, Id, Record},
	};
	// self
	use crate::_prelude::*;

	#[derive(Clone, Debug, Default)]
	pub(crate) struct Captured {
		spans: Arc<Mutex<Vec<String>>>,
		events: Arc<Mutex<Vec<String>>>,
	}
	impl Captured {
		/// Runs `f` with this capture installed as the thread's default subscriber.
		pub(crate) fn run<T>(&self, f: impl FnOnce() -> T) -> T {
			tracing::subscriber::with_default(self.clone(), f)
		}

		pub(crate) fn spans(&self) -> Vec<String> {
			self.spans.lock().clone()
		}

		pub(crate) fn events(&self) -> Vec<String> {
			self.events.lock().clone()
		}
	}
	impl Subscriber for Captured {
		fn enabled(&self, _: &Metadata<'_>) -> bool {
			true
		}

		fn new_span(&self, attrs: &Attributes<'_>) -> Id {
			let mut line = Line(attrs.metadata().name().to_owned());
			let mut spans = self.spans.lock();

			attrs.record(&mut line);
			spans.push(line.0);

			Id::from_u64(spans.len() as u64)
		}

		fn record(&self, id: &Id, values: &Record<'_>) {
			let mut spans = self.spans.lock();

			if let Some(line) = spans.get_mut(id.into_u64() as usize - 1) {
				let mut appended = Line(std::mem::take(line));

				values.record(&mut appended);
				*line = appended.0;
			}
		}

		fn record_follows_from(&self, _: &Id, _: &Id) {}

		fn event(&self, event: &Event<'_>) {
			let mut line = Line(event.metadata().level().to_string());

			event.record(&mut line);
			self.events.lock().push(line.0);
		}

		fn enter(&self, _: &Id) {}

		fn exit(&self, _: &Id) {}
	}

	struct Line(String);
	impl Visit for Line {
		fn record_str(&mut self, field: &Field, value: &str) {
			let _ = write!(self.0, " {}={value}", field.name());
		}

		fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
			let _ = write!(self.0, " {}={value:?}", field.name());
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payload_direction_labels() {
		assert_eq!(PayloadDirection::Request.as_str(), "request");
		assert_eq!(PayloadDirection::Response.as_str(), "response");
	}

	#[test]
	fn call_span_guard_records_without_subscriber() {
		let guard = CallSpan::new("detectface").entered();

		guard.record_status(200);
		guard.record_outcome(CallOutcome::Success);
		debug_payload(true, PayloadDirection::Response, Some(200), &[0xff, 0xfe]);
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn call_span_carries_endpoint_status_and_outcome() {
		let captured = capture::Captured::default();

		captured.run(|| {
			let guard = CallSpan::new("getinfo").entered();

			guard.record_status(403);
			guard.record_outcome(CallOutcome::Failure);
		});

		assert_eq!(captured.spans(), vec![
			"youtu.call endpoint=getinfo status=403 outcome=failure".to_owned()
		]);
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn debug_payload_emits_only_when_enabled() {
		let captured = capture::Captured::default();

		captured.run(|| {
			debug_payload(false, PayloadDirection::Request, None, b"{\"hidden\":true}");
			debug_payload(true, PayloadDirection::Response, Some(200), b"{\"errorcode\":0}");
			debug_payload(true, PayloadDirection::Response, Some(502), &[0xff]);
		});

		assert_eq!(captured.events(), vec![
			"DEBUG message=payload direction=response status=200 body={\"errorcode\":0}".to_owned(),
			"DEBUG message=payload direction=response status=502 body=\u{fffd}".to_owned(),
		]);
	}
}
