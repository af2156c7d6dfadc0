//! Bulling runner (default binary).
//!
//! Runs one adapter session over stdin/stdout. Logs go to stderr so that stdout
//! only ever carries protocol lines.

use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bulling::adapter::{Session, SessionConfig};

fn main() -> Result<()> {
    let config = SessionConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(config).run(stdin.lock(), stdout.lock())
}
