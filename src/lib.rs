//! Smoke-test probe for a time-series DB REST API.
//!
//! Checks that the service answers `v1/status` anonymously, issues a bearer
//! token from `v1/token`, and reports itself authenticated once that token
//! is presented.

pub mod client;
pub mod config;
pub mod errors;
pub mod flow;
pub mod logging;

pub use client::{ApiClient, Reply, Verb};
pub use errors::{ProbeError, ProbeResult};
pub use flow::{Credentials, Stage};
