//! # Dashboard
//!
//! The full covidash screen: a search box on top, the statistics table below
//! it, and the chart and map side by side.
//!
//! Run with: `cargo run --example dashboard [COUNTRY]`
//!
//! Set `COVIDASH_LOG=/tmp/covidash.log` (and optionally `RUST_LOG=debug`) to
//! capture fetch and lifecycle logs while the dashboard owns the terminal.

use covidash::api::{ApiConfig, HttpClient};
use covidash::dashboard::{Dashboard, Flags};
use covidash::ProgramOptions;
use std::path::PathBuf;
use std::sync::Arc;

#[covidash::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(HttpClient::new(ApiConfig::default())?);
    let flags = Flags {
        stats: client.clone(),
        geo: client,
        initial: std::env::args().nth(1),
    };
    let options = ProgramOptions {
        title: Some("covidash".to_string()),
        log_file: std::env::var_os("COVIDASH_LOG").map(PathBuf::from),
        ..ProgramOptions::default()
    };
    covidash::run_with::<Dashboard>(flags, options).await?;
    Ok(())
}
