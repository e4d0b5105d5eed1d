//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that hosts the overlay and the
//! event loop using `tokio::select!`. One loop applies controller events,
//! terminal input and scroll ticks in order, so the widget state is only
//! ever touched from here.

use std::time::{Duration, Instant};

use anyhow::Result;
use ao_core::overlay::{InstanceId, Transition};
use ao_core::session::{EventOutcome, SubmitOutcome, WidgetSession};
use ao_protocol::{Event, Op, OverlayConfig, ProcessingMode, VisibilityMode};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use tokio::select;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;
use tracing::debug;

use crate::event::EventStatus;
use crate::event_handler::{self, UiAction};
use crate::render::{render_overlay, OverlayLayout};
use crate::scroll_keeper::{ReconcileTimer, ScrollKeeper};
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{InputAction, InputGate};

/// Main TUI application state.
pub struct App {
    session: WidgetSession,
    config: OverlayConfig,
    gate: InputGate,
    scroll: ScrollKeeper,
    /// Notifications to the controller.
    hooks: UnboundedSender<Op>,
    /// Commands and progress from the controller.
    event_rx: UnboundedReceiver<Event>,
    tick_tx: UnboundedSender<InstanceId>,
    tick_rx: UnboundedReceiver<InstanceId>,
    /// Lives exactly as long as the expanded instance it ticks for.
    reconcile_timer: Option<ReconcileTimer>,
    /// Rectangles of the last draw, for mouse hit-testing.
    layout: OverlayLayout,
    seen_revision: u64,
    should_exit: bool,
}

impl App {
    pub fn new(config: OverlayConfig, hooks: UnboundedSender<Op>, event_rx: UnboundedReceiver<Event>) -> Self {
        let (tick_tx, tick_rx) = unbounded_channel();
        Self {
            session: WidgetSession::new(config.details_visible),
            scroll: ScrollKeeper::new(config.scroll),
            config,
            gate: InputGate::new(),
            hooks,
            event_rx,
            tick_tx,
            tick_rx,
            reconcile_timer: None,
            layout: OverlayLayout::Absent,
            seen_revision: 0,
            should_exit: false,
        }
    }

    pub fn session(&self) -> &WidgetSession {
        &self.session
    }

    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// First render, as the host page would trigger it.
    pub fn mount(&mut self) {
        let event = if self.config.start_expanded {
            Event::ShowExpanded {
                mode: ProcessingMode::Init,
                details_visible: self.config.details_visible,
            }
        } else {
            Event::ShowCollapsed {
                mode: ProcessingMode::Init,
            }
        };
        self.handle_core_event(event);
    }

    /// Main event loop.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        let frames = tui.frame_requester();

        self.mount();
        frames.schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    frames.schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
                Some(instance) = self.tick_rx.recv() => {
                    if self.handle_tick(instance, Instant::now()) {
                        frames.schedule_frame();
                    }
                }
                else => break,
            }
        }

        Ok(())
    }

    /// Apply one controller event.
    pub fn handle_core_event(&mut self, event: Event) {
        let outcome = self.session.handle_event(event, &mut self.hooks);
        if let EventOutcome::Transitioned(transition) = outcome {
            self.on_transition(transition);
        }
        self.sync_revision(Instant::now());
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Mouse(mouse_event) => {
                if self.handle_mouse_event(mouse_event).is_consumed() {
                    tui.frame_requester().schedule_frame();
                }
            }
            TuiEvent::Paste(text) => {
                if self.session.overlay().input_enabled() {
                    self.gate.insert_str(&text);
                    tui.frame_requester().schedule_frame();
                }
            }
            TuiEvent::Draw => {
                tui.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        let action = event_handler::map_key(key_event, self.session.overlay().visibility());
        self.apply(action);
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> EventStatus {
        let action = event_handler::map_mouse(mouse_event, &self.layout);
        self.apply(action)
    }

    fn apply(&mut self, action: UiAction) -> EventStatus {
        let now = Instant::now();
        match action {
            UiAction::Quit => self.should_exit = true,
            UiAction::ActivateBadge => {
                if let Some(transition) = self.session.overlay_mut().activate_badge(&mut self.hooks) {
                    self.on_transition(transition);
                }
            }
            UiAction::Minimize => {
                if let Some(transition) = self.session.overlay_mut().minimize(&mut self.hooks) {
                    self.on_transition(transition);
                }
            }
            UiAction::ToggleDetails => {
                if self.session.overlay_mut().toggle_details(&mut self.hooks).is_some() {
                    self.scroll.note_mutation(now);
                }
            }
            UiAction::ScrollUp(lines) => self.scroll.scroll_up(lines),
            UiAction::ScrollDown(lines) => self.scroll.scroll_down(lines),
            UiAction::PageUp => self.scroll.page_up(),
            UiAction::PageDown => self.scroll.page_down(),
            UiAction::Hover(hovered) => {
                if self.session.overlay().is_hovered() == hovered {
                    return EventStatus::NotConsumed;
                }
                self.session.overlay_mut().set_hovered(hovered);
            }
            UiAction::Send => {
                let action = self.gate.activate_send(self.session.overlay().input_enabled());
                self.apply_input(action, now);
            }
            UiAction::Input(key) => {
                let action = self.gate.handle_key_event(key, self.session.overlay().input_enabled());
                if action == InputAction::Ignored {
                    return EventStatus::NotConsumed;
                }
                self.apply_input(action, now);
            }
            UiAction::None => return EventStatus::NotConsumed,
        }
        EventStatus::Consumed
    }

    fn apply_input(&mut self, action: InputAction, now: Instant) {
        let InputAction::Submit(text) = action else {
            return;
        };
        match self.session.submit(&text, &mut self.hooks) {
            SubmitOutcome::Rejected => debug!("submit rejected"),
            SubmitOutcome::NewTask { .. } | SubmitOutcome::Reply => {
                self.scroll.request_scroll_to_bottom();
                self.sync_revision(now);
            }
        }
    }

    /// A fresh instance was mounted; rebind everything scoped to it.
    fn on_transition(&mut self, transition: Transition) {
        self.scroll.cancel();
        self.reconcile_timer = None;
        if transition.mounted.visibility == VisibilityMode::Expanded {
            let period = Duration::from_millis(self.config.scroll.reconcile_interval_ms);
            self.reconcile_timer = Some(ReconcileTimer::start(
                transition.mounted.id,
                period,
                self.tick_tx.clone(),
            ));
            self.scroll.begin_settle(Instant::now());
        }
    }

    /// Reconciliation tick. Returns whether a redraw is needed.
    pub fn handle_tick(&mut self, instance: InstanceId, now: Instant) -> bool {
        let bound = self
            .reconcile_timer
            .as_ref()
            .is_some_and(|timer| timer.is_for(instance));
        if !bound || !self.session.overlay().is_live(instance) {
            return false;
        }
        self.scroll.reconcile(now)
    }

    fn sync_revision(&mut self, now: Instant) {
        let revision = self.session.store().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.scroll.note_mutation(now);
        }
    }

    /// Render the TUI.
    pub fn render(&mut self, frame: &mut Frame) {
        self.layout = render_overlay(
            frame,
            &self.session.view(),
            &self.config,
            &self.gate,
            &mut self.scroll,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ao_protocol::{AgentProgressEvent, ORCHESTRATOR_AGENT, STATUS_OK};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn new_app() -> (App, UnboundedReceiver<Op>, UnboundedSender<Event>) {
        let (op_tx, op_rx) = unbounded_channel();
        let (event_tx, event_rx) = unbounded_channel();
        (App::new(OverlayConfig::default(), op_tx, event_rx), op_rx, event_tx)
    }

    fn screen(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    fn drain(rx: &mut UnboundedReceiver<Op>) -> Vec<Op> {
        let mut ops = Vec::new();
        while let Ok(op) = rx.try_recv() {
            ops.push(op);
        }
        ops
    }

    #[tokio::test]
    async fn test_app_mounts_collapsed_badge() {
        let (mut app, mut op_rx, _event_tx) = new_app();

        app.mount();

        assert_eq!(
            app.session().overlay().visibility(),
            Some(VisibilityMode::Collapsed)
        );
        assert_eq!(drain(&mut op_rx), vec![Op::VisibilityChanged { collapsed: true }]);
        assert!(screen(&mut app).contains("◉"));
    }

    #[tokio::test]
    async fn test_app_quit_on_q_when_collapsed() {
        let (mut app, _op_rx, _event_tx) = new_app();
        app.mount();

        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));

        assert!(app.should_exit());
    }

    #[tokio::test]
    async fn test_enter_expands_and_escape_minimizes() {
        let (mut app, mut op_rx, _event_tx) = new_app();
        app.mount();
        drain(&mut op_rx);

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert!(screen(&mut app).contains("AutoScraper"));
        let expanded = app.session().overlay().mounted().unwrap().id;

        app.handle_key_event(KeyEvent::from(KeyCode::Esc));

        assert_eq!(
            drain(&mut op_rx),
            vec![
                Op::VisibilityChanged { collapsed: false },
                Op::VisibilityChanged { collapsed: true },
            ]
        );
        assert!(!app.handle_tick(expanded, Instant::now()));
    }

    #[tokio::test]
    async fn test_typing_and_submitting_a_task() {
        let (mut app, mut op_rx, _event_tx) = new_app();
        app.mount();
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        drain(&mut op_rx);

        type_text(&mut app, "find the weather in Paris");
        assert!(screen(&mut app).contains("find the weather in Paris"));
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));

        let ops = drain(&mut op_rx);
        assert!(matches!(
            ops.as_slice(),
            [Op::SubmitTask { text, .. }] if text == "find the weather in Paris"
        ));
        assert_eq!(app.gate().input(), "");
        assert!(app.session().is_input_disabled());

        // Locked until the controller reports a mode
        type_text(&mut app, "more");
        assert_eq!(app.gate().input(), "");
    }

    #[tokio::test]
    async fn test_streamed_run_renders_summary_and_reenables_input() {
        let (mut app, mut op_rx, _event_tx) = new_app();
        app.mount();
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        type_text(&mut app, "find the weather in Paris");
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        drain(&mut op_rx);

        app.handle_core_event(Event::SetProcessingMode {
            mode: ProcessingMode::Processing,
        });
        app.handle_core_event(
            AgentProgressEvent::new("WebAgent")
                .with_instructions("search weather")
                .with_steps(["opened browser"])
                .into(),
        );
        assert!(screen(&mut app).contains("Processing..."));

        app.handle_core_event(
            AgentProgressEvent::new(ORCHESTRATOR_AGENT)
                .with_output("It is 18°C in Paris", STATUS_OK)
                .into(),
        );
        app.handle_core_event(Event::SetProcessingMode {
            mode: ProcessingMode::Done,
        });

        let content = screen(&mut app);
        assert!(content.contains("It is 18°C in Paris"));
        assert!(content.contains("What can I help you solve today?"));
        assert!(app.session().overlay().input_enabled());
    }

    #[tokio::test]
    async fn test_ctrl_d_toggles_details() {
        let (mut app, mut op_rx, _event_tx) = new_app();
        app.mount();
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        drain(&mut op_rx);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));

        assert_eq!(drain(&mut op_rx), vec![Op::DetailsToggled { visible: false }]);
        assert!(screen(&mut app).contains("[ ] Show Details"));
        assert_eq!(app.gate().input(), "");
    }

    #[tokio::test]
    async fn test_badge_hover_is_consumed_once() {
        let (mut app, _op_rx, _event_tx) = new_app();
        app.mount();
        screen(&mut app);
        let over_badge = MouseEvent {
            kind: crossterm::event::MouseEventKind::Moved,
            column: 76,
            row: 22,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(app.handle_mouse_event(over_badge), EventStatus::Consumed);
        assert!(app.session().overlay().is_hovered());
        assert_eq!(app.handle_mouse_event(over_badge), EventStatus::NotConsumed);
    }
}
