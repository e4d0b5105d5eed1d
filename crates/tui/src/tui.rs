//! Terminal session and input plumbing.
//!
//! [`Tui`] owns the raw-mode terminal for the lifetime of the overlay:
//! alternate screen, bracketed paste and mouse capture are switched on
//! together and off together, including from the panic hook. Redraws go
//! through a [`FrameRequester`]; requests are coalesced so any burst made
//! before the earliest pending deadline produces a single draw.

use std::io::{stdout, Stdout};
use std::pin::Pin;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    EventStream, KeyEvent, KeyEventKind, MouseEvent,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::select;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::{Stream, StreamExt};

pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Deadline used while no frame is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Input the overlay reacts to.
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    /// Click, movement or wheel.
    Mouse(MouseEvent),
    /// Bracketed paste.
    Paste(String),
    /// Time to redraw (scheduled frame or resize).
    Draw,
}

impl TuiEvent {
    /// Map a raw terminal event; key releases and focus changes are dropped.
    fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(TuiEvent::Key(key)),
            Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
            Event::Paste(text) => Some(TuiEvent::Paste(text)),
            Event::Resize(_, _) => Some(TuiEvent::Draw),
            _ => None,
        }
    }
}

fn enter_overlay_mode() -> std::io::Result<()> {
    enable_raw_mode()?;
    execute!(
        stdout(),
        EnableBracketedPaste,
        EnableMouseCapture,
        EnterAlternateScreen
    )
}

fn leave_overlay_mode() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(
        stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

pub struct Tui {
    terminal: Terminal<TerminalBackend>,
    frame_tx: mpsc::UnboundedSender<Instant>,
    draw_tx: broadcast::Sender<()>,
}

impl Tui {
    /// Take over the terminal and start the frame scheduler.
    pub fn init() -> Result<Self> {
        enter_overlay_mode()?;
        install_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (draw_tx, _) = broadcast::channel(1);
        tokio::spawn(coalesce_frames(frame_rx, draw_tx.clone()));

        Ok(Self {
            terminal,
            frame_tx,
            draw_tx,
        })
    }

    /// Hand the terminal back to the host shell.
    pub fn restore(&mut self) -> Result<()> {
        leave_overlay_mode()?;
        Ok(())
    }

    pub fn frame_requester(&self) -> FrameRequester {
        FrameRequester {
            frame_tx: self.frame_tx.clone(),
        }
    }

    /// Merged stream of terminal input and scheduled draws.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut terminal_events = EventStream::new();
        let mut draws = self.draw_tx.subscribe();

        Box::pin(async_stream::stream! {
            loop {
                select! {
                    Some(Ok(event)) = terminal_events.next() => {
                        if let Some(event) = TuiEvent::from_terminal(event) {
                            yield event;
                        }
                    }
                    draw = draws.recv() => match draw {
                        // A lagged receiver still owes exactly one draw.
                        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => yield TuiEvent::Draw,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = leave_overlay_mode();
    }
}

/// Turn frame deadlines into draw signals.
///
/// Keeps only the earliest outstanding deadline and fires once when it
/// passes. Ends when every [`FrameRequester`] is gone.
async fn coalesce_frames(mut requests: mpsc::UnboundedReceiver<Instant>, draws: broadcast::Sender<()>) {
    let mut deadline: Option<Instant> = None;
    loop {
        let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE_WAIT);
        select! {
            // Drain queued requests before deciding a deadline has passed.
            biased;
            request = requests.recv() => {
                let Some(at) = request else { break };
                deadline = Some(deadline.map_or(at, |current| current.min(at)));
            }
            _ = tokio::time::sleep_until(wake.into()) => {
                if deadline.take().is_some() {
                    let _ = draws.send(());
                }
            }
        }
    }
}

/// Cheap, cloneable handle for asking for a redraw.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    frame_tx: mpsc::UnboundedSender<Instant>,
}

impl FrameRequester {
    /// Redraw as soon as possible. Never fails; a stopped scheduler is ignored.
    pub fn schedule_frame(&self) {
        let _ = self.frame_tx.send(Instant::now());
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_overlay_mode();
        previous(info);
    }));
}
