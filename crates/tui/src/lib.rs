//! # ao-tui
//!
//! Terminal front end for agent-overlay.
//!
//! This crate draws the assistant overlay (a collapsed badge or an expanded
//! chat panel) and drives it from the `ao-core` session. It talks to the
//! controller over channels using the `Op` and `Event` protocol defined in
//! `ao-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod render;
pub mod scroll_keeper;
pub mod style_registry;
pub mod tui;
pub mod widgets;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use ao_core::channel::ReplayChannel;
use ao_core::config::{load_config, log_dir};
use ao_core::controller::ChannelController;
use ao_protocol::{Event, Op};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub use app::App;
pub use tui::Tui;

/// Name of the log file inside the log directory.
pub const LOG_FILE: &str = "overlay.log";

/// How the application is started.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Project root holding `.agent-overlay/`.
    pub root: PathBuf,
    /// JSONL script of frames to answer tasks with.
    pub replay: Option<PathBuf>,
    /// Pause between replayed frames.
    pub frame_delay: Duration,
    pub debug: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            replay: None,
            frame_delay: Duration::from_millis(300),
            debug: false,
        }
    }
}

/// Route `tracing` output to `<root>/.agent-overlay/log/overlay.log`.
///
/// The terminal belongs to the overlay, so nothing is ever logged to it.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(root: &Path, debug: bool) -> Result<WorkerGuard> {
    let dir = log_dir(root);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let mut open = OpenOptions::new();
    open.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open.mode(0o600);
    }
    let path = dir.join(LOG_FILE);
    let file = open
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let default_filter = if debug {
        "ao_core=debug,ao_tui=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    Ok(guard)
}

/// Start the controller side of the channels.
///
/// With a replay script every submitted task is answered from it. Without
/// one, ops are only logged and the event sender is kept alive so the
/// overlay stays usable.
fn spawn_controller(
    replay: Option<ReplayChannel>,
    op_rx: UnboundedReceiver<Op>,
    event_tx: UnboundedSender<Event>,
) {
    match replay {
        Some(channel) => {
            let controller = ChannelController::new(channel, event_tx);
            tokio::spawn(async move {
                if let Err(e) = controller.run(op_rx).await {
                    error!("controller stopped: {e}");
                }
            });
        }
        None => {
            tokio::spawn(async move {
                let _events = event_tx;
                let mut op_rx = op_rx;
                while let Some(op) = op_rx.recv().await {
                    info!("op without controller: {op:?}");
                }
            });
        }
    }
}

/// Run the overlay until the user quits.
pub async fn run_app(options: AppOptions) -> Result<()> {
    let config = load_config(&options.root)
        .await
        .context("failed to load overlay configuration")?;
    let _log_guard = init_logging(&options.root, options.debug)?;
    info!("starting overlay in {}", options.root.display());

    let replay = match &options.replay {
        Some(path) => {
            let channel = ReplayChannel::from_file(path)
                .await
                .with_context(|| format!("failed to load replay script {}", path.display()))?;
            info!("replaying {} frames from {}", channel.frame_count(), path.display());
            Some(channel.with_frame_delay(options.frame_delay))
        }
        None => {
            warn!("no replay script; submitted tasks will not be answered");
            None
        }
    };

    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();
    spawn_controller(replay, op_rx, event_tx);

    let mut tui = Tui::init()?;
    tui.clear()?;
    let mut app = App::new(config, op_tx, event_rx);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    info!("overlay closed");
    result
}
