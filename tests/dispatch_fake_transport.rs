// std
use std::{
	collections::{HashMap, HashSet},
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
	time::{Duration, Instant},
};
// crates.io
use serde::{Deserialize, Serialize};
// self
use youtu::{
	auth::{self, Credential, Signer},
	config::ClientConfig,
	dispatch::{Dispatcher, Envelope},
	error::{Error, TransportError},
	http::{ApiHttpClient, HttpRequest, HttpResponse, TransportErrorMapper},
};

#[derive(Debug)]
enum FakeTransportError {
	DeadlineExceeded,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DeadlineExceeded => write!(f, "Transport deadline exceeded."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Records every request and answers with a canned status + body, or stalls until the
/// deadline when `stall` is set.
#[derive(Default)]
struct RecordingHttpClient {
	status: u16,
	body: Vec<u8>,
	stall: Option<Duration>,
	requests: Mutex<Vec<HttpRequest>>,
	calls: AtomicUsize,
}
impl RecordingHttpClient {
	fn responding(status: u16, body: &str) -> Self {
		Self { status, body: body.as_bytes().to_vec(), ..Self::default() }
	}

	fn stalling(stall: Duration) -> Self {
		Self { stall: Some(stall), ..Self::default() }
	}

	fn recorded(&self) -> Vec<HttpRequest> {
		self.requests.lock().expect("Request log lock should not be poisoned.").drain(..).collect()
	}
}
impl ApiHttpClient for RecordingHttpClient {
	type TransportError = FakeTransportError;

	fn execute(
		&self,
		request: HttpRequest,
		timeout: Duration,
	) -> Result<HttpResponse, Self::TransportError> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if let Some(stall) = self.stall {
			thread::sleep(stall.min(timeout));

			if stall >= timeout {
				return Err(FakeTransportError::DeadlineExceeded);
			}
		}

		self.requests.lock().expect("Request log lock should not be poisoned.").push(request);

		let mut response = HttpResponse::new(self.body.clone());

		*response.status_mut() =
			http::StatusCode::from_u16(self.status).expect("Fake status should be valid.");

		Ok(response)
	}
}

#[derive(Clone, Default)]
struct FakeTransportErrorMapper;
impl TransportErrorMapper<FakeTransportError> for FakeTransportErrorMapper {
	fn map_transport_error(&self, endpoint: &str, error: FakeTransportError) -> TransportError {
		match error {
			FakeTransportError::DeadlineExceeded => TransportError::timeout(endpoint, error),
		}
	}
}

type FakeDispatcher = Dispatcher<RecordingHttpClient, FakeTransportErrorMapper>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct VerifyRequest {
	app_id: String,
	image: String,
	person_id: String,
	threshold: Option<f64>,
}

fn credential() -> Credential {
	Credential::new(1000061, "AKIDexample", "example-secret-key", "3041722595", 1_000)
		.expect("Credential fixture should be valid.")
}

fn build_dispatcher(client: RecordingHttpClient) -> (FakeDispatcher, Arc<RecordingHttpClient>) {
	let client = Arc::new(client);
	let dispatcher = Dispatcher::with_http_client(
		credential(),
		ClientConfig::new("api.youtu.qq.com").with_timeout(Duration::from_millis(200)),
		client.clone(),
		FakeTransportErrorMapper,
	)
	.expect("Fake dispatcher should build.");

	(dispatcher, client)
}

const OK_BODY: &str = "{\"errorcode\":0,\"errormsg\":\"\"}";

#[test]
fn request_body_round_trips_and_token_verifies() {
	let (dispatcher, client) = build_dispatcher(RecordingHttpClient::responding(200, OK_BODY));
	let request = VerifyRequest {
		app_id: "1000061".into(),
		image: "aW1hZ2U=".into(),
		person_id: "ochapman".into(),
		threshold: Some(0.75),
	};
	let _: Envelope = dispatcher.call("faceverify", &request).expect("Call should succeed.");
	let recorded = client.recorded();
	let sent = recorded.first().expect("Exactly one request should be recorded.");
	let headers = sent.headers();

	assert_eq!(recorded.len(), 1);
	assert_eq!(sent.uri(), "http://api.youtu.qq.com/youtu/api/faceverify");
	assert_eq!(
		serde_json::from_slice::<VerifyRequest>(sent.body()).expect("Body should decode."),
		request
	);
	assert_eq!(headers["content-type"], "text/json");
	assert_eq!(headers["accept"], "*/*");
	assert_eq!(headers["expect"], "100-continue");
	assert_eq!(headers["user-agent"], "");

	let token = headers["authorization"].to_str().expect("Token should be ASCII.");
	let claims = auth::verify(token, credential().secret_key())
		.expect("Authorization header should verify against the secret key.");

	assert_eq!(claims.app_id, 1000061);
	assert_eq!(claims.user_id, "3041722595");
	assert_eq!(claims.expires_at - claims.issued_at, 1_000);
}

#[test]
fn non_zero_error_codes_are_returned_as_data() {
	let (dispatcher, _client) = build_dispatcher(RecordingHttpClient::responding(
		200,
		"{\"errorcode\":-1101,\"errormsg\":\"ERROR_PERSON_EXISTED\",\"person_id\":\"ochapman\"}",
	));
	let response: Envelope = dispatcher
		.call("newperson", &serde_json::json!({ "person_id": "ochapman" }))
		.expect("Application errors must not be raised by the dispatcher.");

	assert_eq!(response.error_code, -1101);
	assert_eq!(response.body.get("person_id"), Some(&serde_json::json!("ochapman")));
}

#[test]
fn unserializable_requests_are_never_sent() {
	let (dispatcher, client) =
		build_dispatcher(RecordingHttpClient::responding(200, "{\"errorcode\":0}"));
	let request = HashMap::from([((1, 2), "tuple keys cannot become JSON object keys")]);
	let err = dispatcher
		.call::<_, Envelope>("setinfo", &request)
		.expect_err("Non-string map keys should fail to encode.");

	assert!(matches!(err, Error::Encode { .. }), "Unexpected error: {err:?}.");
	assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn stalled_transport_surfaces_timeout() {
	let (dispatcher, _client) =
		build_dispatcher(RecordingHttpClient::stalling(Duration::from_secs(5)));
	let started = Instant::now();
	let err = dispatcher
		.call::<_, Envelope>("getinfo", &serde_json::json!({}))
		.expect_err("Stalled transport should time out.");

	assert!(matches!(
		err,
		Error::Transport(TransportError::Timeout { ref endpoint, .. }) if endpoint == "getinfo"
	));
	assert!(started.elapsed() < Duration::from_secs(2), "Call blocked past its deadline.");
}

#[test]
fn concurrent_calls_sign_race_free() {
	const WORKERS: usize = 8;
	const CALLS_PER_WORKER: usize = 50;

	let (dispatcher, client) = build_dispatcher(RecordingHttpClient::responding(200, OK_BODY));
	let dispatcher = Arc::new(dispatcher.with_signer(Signer::from_seed(42)));
	let workers = (0..WORKERS)
		.map(|worker| {
			let dispatcher = dispatcher.clone();

			thread::spawn(move || {
				for call in 0..CALLS_PER_WORKER {
					let request = serde_json::json!({ "group_id": format!("{worker}-{call}") });
					let _: Envelope = dispatcher
						.call("getpersonids", &request)
						.expect("Concurrent call should succeed.");
				}
			})
		})
		.collect::<Vec<_>>();

	for worker in workers {
		worker.join().expect("Dispatch worker should not panic.");
	}

	let recorded = client.recorded();
	let secret_key = credential().secret_key().clone();
	let nonces = recorded
		.iter()
		.map(|request| {
			let token =
				request.headers()["authorization"].to_str().expect("Token should be ASCII.");

			auth::verify(token, &secret_key)
				.expect("Every concurrent token should verify intact.")
				.nonce
		})
		.collect::<Vec<_>>();
	let unique = nonces.iter().collect::<HashSet<_>>();
	let groups = recorded
		.iter()
		.map(|request| {
			serde_json::from_slice::<serde_json::Value>(request.body())
				.expect("Body should decode.")["group_id"]
				.as_str()
				.expect("Group id should be a string.")
				.to_owned()
		})
		.collect::<HashSet<_>>();

	assert_eq!(nonces.len(), WORKERS * CALLS_PER_WORKER);
	assert!(unique.len() > WORKERS * CALLS_PER_WORKER - 5, "Nonces must not repeat in bulk.");
	assert_eq!(groups.len(), WORKERS * CALLS_PER_WORKER, "Bodies must not interleave.");
}
