use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
	#[error("connection error")]
	Connection(#[source] reqwest::Error),
	#[error("http error")]
	Http(#[source] reqwest::Error),
	#[error("transport error")]
	Transport(#[source] reqwest::Error),
	#[error("auth error: {0}")]
	Auth(String),
	#[error("assertion failed: `{field}` expected {expected:?}, found {found}")]
	Assertion {
		field: &'static str,
		expected: &'static str,
		found: String,
	},
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl ProbeError {
	pub fn is_connection(&self) -> bool {
		matches!(self, ProbeError::Connection(_))
	}

	pub fn is_auth(&self) -> bool {
		matches!(self, ProbeError::Auth(_))
	}

	pub fn is_assertion(&self) -> bool {
		matches!(self, ProbeError::Assertion { .. })
	}

	/// HTTP status carried by an [`ProbeError::Http`] failure.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			ProbeError::Http(e) => e.status(),
			_ => None,
		}
	}
}

pub type ProbeResult<T> = Result<T, ProbeError>;
