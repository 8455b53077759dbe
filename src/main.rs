use dotenvy::dotenv;

use tsdb_probe::config::Opts;
use tsdb_probe::{flow, logging, ApiClient};

fn main() -> anyhow::Result<()> {
	// Local .env may set RUST_LOG for CI jobs
	dotenv().ok();
	logging::init();

	let opts = Opts::from_args();
	let Some(endpoint) = opts.endpoint.as_deref() else {
		logging::die("Endpoint not given.");
	};

	let mut client = ApiClient::new(endpoint)?;
	let stage = flow::run(&mut client, &opts.credentials()).map_err(|e| {
		tracing::error!("Smoke test failed: {}", e);
		e
	})?;
	tracing::info!("Smoke test passed ({:?})", stage);
	Ok(())
}
