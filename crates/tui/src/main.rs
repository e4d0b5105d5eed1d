//! Main entry point for the ao-tui binary.
//!
//! This executable opens the overlay in the current directory without a
//! replay script. The `overlay` binary of `ao-cli` exposes the options.

use anyhow::Result;
use ao_tui::{run_app, AppOptions};

#[tokio::main]
async fn main() -> Result<()> {
    run_app(AppOptions::default()).await
}
