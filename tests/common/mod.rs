#![allow(dead_code)]

use std::net::TcpListener;

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Mock TSDB server. It serves from its own thread, so the blocking client
/// can call it from plain `#[test]` functions.
pub struct Fixture {
	pub server: MockServer,
	rt: Runtime,
}

impl Fixture {
	pub fn start() -> Self {
		let rt = tokio::runtime::Builder::new_multi_thread()
			.worker_threads(1)
			.enable_all()
			.build()
			.expect("build test runtime");
		let server = rt.block_on(MockServer::start());
		Self { server, rt }
	}

	pub fn uri(&self) -> String {
		self.server.uri()
	}

	pub fn mount(&self, mock: Mock) {
		self.rt.block_on(mock.mount(&self.server));
	}

	pub fn requests(&self) -> Vec<Request> {
		self.rt.block_on(self.server.received_requests()).unwrap_or_default()
	}

	/// Status endpoint answering `auth` for requests carrying `bearer`.
	pub fn status(&self, bearer: &str, auth: &str) {
		self.mount(
			Mock::given(method("GET"))
				.and(path("/v1/status"))
				.and(header("Authorization", format!("Bearer {}", bearer).as_str()))
				.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "online", "auth": auth}))),
		);
	}

	/// Token endpoint accepting the default credentials.
	pub fn token(&self, response: ResponseTemplate) {
		self.mount(
			Mock::given(method("POST"))
				.and(path("/v1/token"))
				.and(body_json(json!({"username": "admin", "password": "ADMIN_PASS"})))
				.respond_with(response),
		);
	}

	/// Healthy server issuing `token`.
	pub fn healthy(&self, token: &str) {
		self.status("None", "no");
		self.token(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": token}})));
		self.status(token, "yes");
	}
}

/// Endpoint on a port nothing listens on.
pub fn unreachable_endpoint() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
	let port = listener.local_addr().expect("local addr").port();
	drop(listener);
	format!("http://127.0.0.1:{}", port)
}

#[derive(Serialize)]
struct Claims {
	sub: String,
	role: String,
	exp: usize,
}

/// JWT shaped like the ones the real service issues.
pub fn jwt(sub: &str) -> String {
	let claims = Claims { sub: sub.into(), role: "admin".into(), exp: 4_102_444_800 };
	encode(&Header::default(), &claims, &EncodingKey::from_secret(b"dev-secret")).expect("encode jwt")
}
