mod cli;
mod transcript;

use std::time::Duration;

use ao_tui::AppOptions;
use clap::Parser;

use crate::cli::{Cli, Subcommand};
use crate::transcript::run_transcript;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.subcommand {
        Some(Subcommand::Transcript(cmd)) => run_transcript(cmd).await,
        // Without a subcommand, launch the overlay
        None => {
            let options = AppOptions {
                root: cli.root,
                replay: cli.replay,
                frame_delay: Duration::from_millis(cli.frame_delay_ms),
                debug: cli.debug,
            };
            ao_tui::run_app(options)
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e))
        }
    }
}
