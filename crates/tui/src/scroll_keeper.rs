//! Follow-the-bottom scrolling for the message list.
//!
//! The keeper never scrolls a reader who moved away from the tail. A content
//! mutation schedules a reconciliation `mutation_delay_ms` later, which snaps
//! to the bottom only if the viewport sat within [`NEAR_BOTTOM_LINES`] of
//! the bottom when the mutation happened. Idle ticks only keep a viewport
//! pinned that already shows the last line. A user submit forces the snap,
//! and a few settle passes after expansion catch late layout changes.
//!
//! Reconciliation runs off ticks from a [`ReconcileTimer`], which lives
//! exactly as long as the expanded instance it was started for.

use std::time::{Duration, Instant};

use ao_core::overlay::InstanceId;
use ao_protocol::ScrollConfig;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Distance from the bottom, in lines, that still counts as "at the bottom".
pub const NEAR_BOTTOM_LINES: usize = 1;

#[derive(Debug, Clone, Copy)]
struct SettlePasses {
    remaining: u8,
    next: Instant,
}

/// Scroll state of the message list.
#[derive(Debug, Clone)]
pub struct ScrollKeeper {
    config: ScrollConfig,
    offset: usize,
    content_lines: usize,
    viewport_lines: usize,
    /// Deadline of the pending mutation reconciliation.
    pending: Option<Instant>,
    /// Whether the pending reconciliation should follow the tail.
    follow_pending: bool,
    force_bottom: bool,
    settle: Option<SettlePasses>,
}

impl ScrollKeeper {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            offset: 0,
            content_lines: 0,
            viewport_lines: 0,
            pending: None,
            follow_pending: false,
            force_bottom: false,
            settle: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.content_lines.saturating_sub(self.viewport_lines)
    }

    pub fn is_near_bottom(&self) -> bool {
        self.max_offset().saturating_sub(self.offset) <= NEAR_BOTTOM_LINES
    }

    /// Whether the last line is in view.
    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Record the rendered size of the list; called on every draw.
    pub fn measure(&mut self, content_lines: usize, viewport_lines: usize) {
        self.content_lines = content_lines;
        self.viewport_lines = viewport_lines;
        self.offset = self.offset.min(self.max_offset());
    }

    /// The store changed; schedule a reconciliation.
    ///
    /// The follow decision is taken now, against the pre-mutation layout.
    pub fn note_mutation(&mut self, now: Instant) {
        self.follow_pending |= self.is_near_bottom();
        if self.pending.is_none() {
            self.pending = Some(now + Duration::from_millis(self.config.mutation_delay_ms));
        }
    }

    /// The user submitted: the next reconciliation snaps unconditionally.
    pub fn request_scroll_to_bottom(&mut self) {
        self.force_bottom = true;
    }

    /// Arm the settle passes of a freshly expanded panel.
    pub fn begin_settle(&mut self, now: Instant) {
        self.force_bottom = true;
        self.settle = (self.config.settle_passes > 0).then(|| SettlePasses {
            remaining: self.config.settle_passes,
            next: now + Duration::from_millis(self.config.settle_interval_ms),
        });
    }

    /// Drop everything scheduled; the instance it was for is gone.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.follow_pending = false;
        self.force_bottom = false;
        self.settle = None;
    }

    /// Run everything that is due at `now`. Returns whether the offset moved.
    pub fn reconcile(&mut self, now: Instant) -> bool {
        let before = self.offset;
        let mut snap = std::mem::take(&mut self.force_bottom);

        if self.pending.is_some_and(|deadline| deadline <= now) {
            self.pending = None;
            snap |= std::mem::take(&mut self.follow_pending);
        }

        if let Some(settle) = self.settle.as_mut() {
            if settle.next <= now {
                snap = true;
                settle.remaining -= 1;
                settle.next = now + Duration::from_millis(self.config.settle_interval_ms);
                if settle.remaining == 0 {
                    self.settle = None;
                }
            }
        }

        // Stay pinned while sitting at the tail.
        if snap || self.is_at_bottom() {
            self.offset = self.max_offset();
        }
        self.offset != before
    }

    /// Whether anything is still scheduled.
    pub fn has_pending_work(&self) -> bool {
        self.pending.is_some() || self.force_bottom || self.settle.is_some()
    }

    /// Any upward move drops a pending follow.
    pub fn scroll_up(&mut self, lines: usize) {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        if self.offset != before {
            self.follow_pending = false;
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_lines.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_lines.max(1));
    }
}

/// Periodic reconciliation ticks bound to one mounted instance.
///
/// The ticking task is aborted when the timer is dropped. Each tick carries
/// the instance id so the receiver can also discard ticks already in flight
/// for an instance that has since been torn down.
#[derive(Debug)]
pub struct ReconcileTimer {
    instance: InstanceId,
    handle: JoinHandle<()>,
}

impl ReconcileTimer {
    pub fn start(instance: InstanceId, period: Duration, ticks: UnboundedSender<InstanceId>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if ticks.send(instance).is_err() {
                    break;
                }
            }
        });
        Self { instance, handle }
    }

    /// Whether this timer ticks for `instance`.
    pub fn is_for(&self, instance: InstanceId) -> bool {
        self.instance == instance
    }
}

impl Drop for ReconcileTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
