//! Tracing setup for the CLI.
//!
//! Logs go to stderr in compact form so stdout stays clean for JSON output.
//! `RUST_LOG` controls filtering (default: "info"), e.g.
//! `RUST_LOG=storescrape=debug`.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
