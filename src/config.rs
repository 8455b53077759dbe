use clap::error::ErrorKind;
use clap::Parser;

use crate::flow::Credentials;

#[derive(Parser, Debug)]
#[command(name = "tsdb_probe")]
#[command(about = "Smoke test for a time-series DB REST API: status and token auth", long_about = None)]
pub struct Opts {
	/// Base API endpoint, e.g. https://tsdb.example.org:8080
	pub endpoint: Option<String>,
	/// Token-issuance username; override only for test servers
	#[arg(long, default_value = "admin")]
	pub username: String,
	/// Token-issuance password; override only for test servers
	#[arg(long, default_value = "ADMIN_PASS")]
	pub password: String,
}

impl Opts {
	/// Parses the process arguments. Help and version print and exit 0;
	/// any other parse failure dies like a missing endpoint.
	pub fn from_args() -> Self {
		match Opts::try_parse() {
			Ok(opts) => opts,
			Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
			Err(e) => {
				tracing::error!("{}", e.to_string().trim_end());
				crate::logging::die("Endpoint not given.")
			}
		}
	}

	pub fn credentials(&self) -> Credentials {
		Credentials { username: self.username.clone(), password: self.password.clone() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_is_positional() {
		let opts = Opts::try_parse_from(["tsdb_probe", "http://localhost:8080"]).unwrap();
		assert_eq!(opts.endpoint.as_deref(), Some("http://localhost:8080"));
		assert_eq!(opts.credentials(), Credentials::default());
	}

	#[test]
	fn missing_endpoint_is_left_to_the_caller() {
		let opts = Opts::try_parse_from(["tsdb_probe"]).unwrap();
		assert!(opts.endpoint.is_none());
	}

	#[test]
	fn credentials_can_be_overridden() {
		let opts = Opts::try_parse_from([
			"tsdb_probe",
			"http://localhost:8080",
			"--username",
			"ops",
			"--password",
			"s3cret",
		])
		.unwrap();
		assert_eq!(opts.credentials().username, "ops");
		assert_eq!(opts.credentials().password, "s3cret");
	}

	#[test]
	fn extra_positional_is_rejected() {
		assert!(Opts::try_parse_from(["tsdb_probe", "a", "b"]).is_err());
	}
}
