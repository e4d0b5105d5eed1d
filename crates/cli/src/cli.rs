use std::path::PathBuf;

use clap::Parser;

/// Agent overlay
///
/// Without a subcommand, opens the assistant overlay in the terminal.
#[derive(Debug, Parser)]
#[clap(author, version, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Project root holding `.agent-overlay/`.
    #[clap(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Answer every submitted task by replaying this JSON-lines stream.
    #[clap(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Pause between replayed frames, in milliseconds.
    #[clap(long = "frame-delay-ms", value_name = "N", default_value_t = 300)]
    pub frame_delay_ms: u64,

    /// Log at debug level to `.agent-overlay/log/overlay.log`.
    #[clap(long)]
    pub debug: bool,

    #[clap(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Print the conversation a recorded stream produces for a task.
    Transcript(TranscriptCommand),
}

#[derive(Debug, clap::Args)]
pub struct TranscriptCommand {
    /// Text of the task the stream answers.
    #[clap(long)]
    pub task: String,

    /// Render with "Show Details" off.
    #[clap(long)]
    pub hide_details: bool,

    /// JSON-lines stream of progress events and control frames.
    #[clap(value_name = "FILE")]
    pub file: PathBuf,
}
