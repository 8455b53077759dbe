use std::fmt::Display;
use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Request/response tracing is on by default; transport crates stay at info.
pub const DEFAULT_FILTER: &str = "debug,hyper=info,reqwest=info,rustls=info";

pub fn init() {
	let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::new(env_filter))
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stdout)
				.with_ansi(std::io::stdout().is_terminal()),
		)
		.try_init()
		.ok();
}

/// Logs `msg` and terminates the process with exit code 1.
///
/// Reserved for states that mean the deployment itself is broken (no
/// endpoint, a body that is not JSON); everything else goes through
/// [`crate::ProbeError`].
pub fn die(msg: impl Display) -> ! {
	tracing::error!("DIE: {}", msg);
	std::process::exit(1)
}
