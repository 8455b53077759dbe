use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::errors::{ProbeError, ProbeResult};
use crate::logging::die;

/// Bearer value sent before any token has been issued.
pub const UNSET_TOKEN: &str = "None";

pub type Params<'a> = &'a [(&'a str, &'a str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
	Get,
	Post,
	Put,
	Patch,
	Delete,
	Head,
}

impl Verb {
	pub fn method(self) -> Method {
		match self {
			Verb::Get => Method::GET,
			Verb::Post => Method::POST,
			Verb::Put => Method::PUT,
			Verb::Patch => Method::PATCH,
			Verb::Delete => Method::DELETE,
			Verb::Head => Method::HEAD,
		}
	}
}

impl fmt::Display for Verb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.method().as_str())
	}
}

/// Decoded response body.
///
/// `Data` holds the payload of a `{"data": ...}` envelope. Anything else is
/// `Bare`: callers that only care whether the call succeeded use [`Reply::ok`],
/// status checks read the flat object through [`Reply::fields`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
	Data(Value),
	Bare { ok: bool, body: Value },
}

impl Reply {
	pub fn from_body(ok: bool, mut body: Value) -> Self {
		if ok {
			if let Value::Object(map) = &mut body {
				if let Some(data) = map.remove("data") {
					return Reply::Data(data);
				}
			}
		}
		Reply::Bare { ok, body }
	}

	pub fn ok(&self) -> bool {
		match self {
			Reply::Data(_) => true,
			Reply::Bare { ok, .. } => *ok,
		}
	}

	pub fn data(&self) -> Option<&Value> {
		match self {
			Reply::Data(v) => Some(v),
			Reply::Bare { .. } => None,
		}
	}

	pub fn fields(&self) -> Option<&Map<String, Value>> {
		match self {
			Reply::Data(v) => v.as_object(),
			Reply::Bare { body, .. } => body.as_object(),
		}
	}
}

/// Blocking REST client for the TSDB API.
///
/// Owns the endpoint (fixed at construction) and the single bearer token
/// slot. Certificates are not verified and no request timeout is set.
pub struct ApiClient {
	http: Client,
	endpoint: String,
	token: Option<String>,
}

impl ApiClient {
	pub fn new(endpoint: impl Into<String>) -> ProbeResult<Self> {
		let http = Client::builder()
			.user_agent(concat!("tsdb-probe/", env!("CARGO_PKG_VERSION")))
			.danger_accept_invalid_certs(true)
			.timeout(None::<Duration>)
			.build()
			.map_err(ProbeError::Transport)?;
		Ok(Self { http, endpoint: endpoint.into(), token: None })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	pub fn set_token(&mut self, token: impl Into<String>) {
		self.token = Some(token.into());
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.endpoint, path)
	}

	fn bearer(&self) -> String {
		format!("Bearer {}", self.token().unwrap_or(UNSET_TOKEN))
	}

	/// Issues one call and unwraps the response envelope.
	///
	/// Connection failures become [`ProbeError::Connection`] and 4xx/5xx
	/// statuses [`ProbeError::Http`]. A body that is not JSON ends the
	/// process through [`die`].
	pub fn request(
		&self,
		verb: Verb,
		path: &str,
		body: Option<&Value>,
		params: Option<Params<'_>>,
	) -> ProbeResult<Reply> {
		let url = self.url(path);
		let json = body.map_or_else(|| "None".to_string(), serde_json::Value::to_string);
		tracing::debug!("REST request: {} {} params={:?} json={}", verb, url, params, json);

		let mut req = self.http.request(verb.method(), &url).header(AUTHORIZATION, self.bearer());
		if let Some(params) = params {
			req = req.query(params);
		}
		if let Some(body) = body {
			req = req.json(body);
		}

		let resp = req.send().map_err(|e| {
			if e.is_connect() {
				ProbeError::Connection(e)
			} else {
				ProbeError::Transport(e)
			}
		})?;
		let resp = resp.error_for_status().map_err(ProbeError::Http)?;
		let status = resp.status();
		let raw = resp.bytes().map_err(ProbeError::Transport)?;
		let json: Value = match serde_json::from_slice(&raw) {
			Ok(v) => v,
			Err(_) => die(format!("REST content: {}", verbatim(&raw))),
		};

		tracing::debug!("REST status: {} json={}", status.as_u16(), json);

		let ok = !status.is_client_error() && !status.is_server_error();
		Ok(Reply::from_body(ok, json))
	}

	pub fn get(&self, path: &str, params: Option<Params<'_>>) -> ProbeResult<Reply> {
		self.request(Verb::Get, path, None, params)
	}

	pub fn post(&self, path: &str, body: &Value) -> ProbeResult<Reply> {
		self.request(Verb::Post, path, Some(body), None)
	}
}

/// Body as sent: UTF-8 text unchanged, anything else byte-escaped.
fn verbatim(raw: &[u8]) -> String {
	match std::str::from_utf8(raw) {
		Ok(text) => text.to_string(),
		Err(_) => raw.escape_ascii().to_string(),
	}
}
