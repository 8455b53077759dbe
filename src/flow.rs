use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, Reply};
use crate::errors::{ProbeError, ProbeResult};

pub const STATUS_PATH: &str = "v1/status";
pub const TOKEN_PATH: &str = "v1/token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

impl Default for Credentials {
	fn default() -> Self {
		Self { username: "admin".into(), password: "ADMIN_PASS".into() }
	}
}

/// Progress of a smoke run. Failure is the `Err` side of [`Stage::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Start,
	StatusCheckedAnonymous,
	Authenticated,
	StatusCheckedAuthenticated,
}

impl Stage {
	pub fn is_terminal(self) -> bool {
		self == Stage::StatusCheckedAuthenticated
	}

	/// Info line emitted before leaving this stage, if any.
	pub fn milestone(self) -> Option<&'static str> {
		match self {
			Stage::Start => Some("Checking status"),
			Stage::StatusCheckedAnonymous => Some("Checking auth"),
			_ => None,
		}
	}

	pub fn advance(self, client: &mut ApiClient, creds: &Credentials) -> ProbeResult<Stage> {
		match self {
			Stage::Start => check_status(client),
			Stage::StatusCheckedAnonymous => authenticate(client, creds),
			Stage::Authenticated => check_authenticated_status(client),
			Stage::StatusCheckedAuthenticated => Ok(self),
		}
	}
}

fn expect_field(reply: &Reply, field: &'static str, expected: &'static str) -> ProbeResult<()> {
	let found = reply.fields().and_then(|f| f.get(field));
	match found.and_then(Value::as_str) {
		Some(v) if v == expected => Ok(()),
		_ => Err(ProbeError::Assertion {
			field,
			expected,
			found: found.map_or_else(|| "nothing".to_string(), Value::to_string),
		}),
	}
}

/// Anonymous status check: the service is online and reports no auth.
pub fn check_status(client: &ApiClient) -> ProbeResult<Stage> {
	let status = client.get(STATUS_PATH, None)?;
	expect_field(&status, "status", "online")?;
	expect_field(&status, "auth", "no")?;
	Ok(Stage::StatusCheckedAnonymous)
}

pub fn get_token(client: &ApiClient, creds: &Credentials) -> ProbeResult<String> {
	let body = serde_json::to_value(creds)?;
	let reply = client.post(TOKEN_PATH, &body)?;
	reply
		.data()
		.and_then(|d| d.get("token"))
		.and_then(Value::as_str)
		.filter(|t| !t.is_empty())
		.map(str::to_owned)
		.ok_or_else(|| ProbeError::Auth("No token returned".into()))
}

pub fn authenticate(client: &mut ApiClient, creds: &Credentials) -> ProbeResult<Stage> {
	let token = get_token(client, creds)?;
	tracing::info!("Got new token: {}", token);
	client.set_token(token);
	Ok(Stage::Authenticated)
}

pub fn check_authenticated_status(client: &ApiClient) -> ProbeResult<Stage> {
	let status = client.get(STATUS_PATH, None)?;
	expect_field(&status, "auth", "yes")?;
	Ok(Stage::StatusCheckedAuthenticated)
}

/// Token issuance followed by the authenticated status check.
pub fn check_auth(client: &mut ApiClient, creds: &Credentials) -> ProbeResult<Stage> {
	authenticate(client, creds)?;
	check_authenticated_status(client)
}

/// Drives the whole handshake; the first failing step aborts the run.
pub fn run(client: &mut ApiClient, creds: &Credentials) -> ProbeResult<Stage> {
	let mut stage = Stage::Start;
	while !stage.is_terminal() {
		if let Some(msg) = stage.milestone() {
			tracing::info!("{}", msg);
		}
		stage = stage.advance(client, creds)?;
	}
	Ok(stage)
}
