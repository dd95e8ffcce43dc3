// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity-heartbeat state machine.
//!
//! Watches user interaction signals, keeps the shared liveness flag
//! current, and notifies the backend session store at bounded intervals:
//! - at most one ping per idle window while the user keeps interacting
//!   (debounced),
//! - exactly one unconditional ping when the user goes idle, so the
//!   backend learns of the transition promptly.
//!
//! The tracker owns the idle timer and is the only writer of the
//! liveness flag. Dropping every [`TrackerHandle`] closes the event
//! channel and tears the tracker down, releasing the timer on every
//! exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::IDLE_WINDOW;
use crate::heartbeat::Heartbeat;

/// A user interaction signal observed by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    PointerClick,
    KeyPress,
    Scroll,
}

/// Shared liveness flag: the local "is this user active" bit, readable
/// by anyone the host injects it into (auth gates, other views).
///
/// The tracker is the only writer. `last_transition` records the most
/// recent active/idle edge.
#[derive(Clone)]
pub struct LivenessFlag {
    inner: Arc<FlagInner>,
}

struct FlagInner {
    active: AtomicBool,
    last_transition: RwLock<DateTime<Utc>>,
}

impl LivenessFlag {
    /// New flag in the active state (a freshly mounted page counts as
    /// activity).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FlagInner {
                active: AtomicBool::new(true),
                last_transition: RwLock::new(Utc::now()),
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// When the flag last changed value.
    pub fn last_transition(&self) -> DateTime<Utc> {
        *self
            .inner
            .last_transition
            .read()
            .expect("liveness flag lock poisoned")
    }

    /// RFC3339 rendering of [`last_transition`](Self::last_transition),
    /// `Z`-suffixed.
    pub fn last_transition_rfc3339(&self) -> String {
        self.last_transition()
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Tracker-only write path. Timestamps only actual edges.
    fn set(&self, active: bool) {
        let previous = self.inner.active.swap(active, Ordering::SeqCst);
        if previous != active {
            *self
                .inner
                .last_transition
                .write()
                .expect("liveness flag lock poisoned") = Utc::now();
        }
    }
}

impl Default for LivenessFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for feeding interaction events into a running tracker.
///
/// Clone freely; dropping the last handle tears the tracker down.
#[derive(Clone)]
pub struct TrackerHandle {
    tx: mpsc::UnboundedSender<Interaction>,
}

impl TrackerHandle {
    /// Record one interaction signal.
    pub fn record(&self, interaction: Interaction) {
        // A closed channel means the tracker was torn down; nothing to
        // notify.
        let _ = self.tx.send(interaction);
    }
}

/// The activity tracker state machine.
///
/// States are `ACTIVE` (idle timer counting down) and `IDLE` (timer
/// fired, waiting for new interaction); the liveness flag is the state.
/// The idle timer is armed immediately on spawn, before any interaction
/// is observed.
///
/// `last_ping` starts unset, so the first qualifying interaction after
/// mount always pings once. Deliberate startup behavior: the backend
/// learns of the session as soon as real activity appears.
pub struct ActivityTracker<H: Heartbeat> {
    heartbeat: H,
    flag: LivenessFlag,
    window: Duration,
    last_ping: Option<Instant>,
}

impl<H: Heartbeat> ActivityTracker<H> {
    /// Tracker with the standard 15-minute idle window.
    pub fn new(heartbeat: H, flag: LivenessFlag) -> Self {
        Self::with_window(heartbeat, flag, IDLE_WINDOW)
    }

    /// Tracker with a custom idle window.
    pub fn with_window(heartbeat: H, flag: LivenessFlag, window: Duration) -> Self {
        Self {
            heartbeat,
            flag,
            window,
            last_ping: None,
        }
    }

    /// Spawn the tracker task. The returned handle feeds it events;
    /// dropping every clone of the handle stops the task.
    pub fn spawn(self) -> (TrackerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(rx));
        (TrackerHandle { tx }, task)
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Interaction>) {
        // Mount counts as activity: flag up, timer armed before any
        // interaction arrives.
        self.flag.set(true);
        let idle = sleep(self.window);
        tokio::pin!(idle);
        tracing::debug!(window_secs = self.window.as_secs(), "activity tracker started");

        loop {
            if self.flag.is_active() {
                tokio::select! {
                    // Poll the event branch first: a ready interaction
                    // resets the deadline before a concurrently fired
                    // timer can run its idle side effect.
                    biased;
                    event = events.recv() => match event {
                        Some(interaction) => {
                            self.on_interaction(interaction);
                            idle.as_mut().reset(Instant::now() + self.window);
                        }
                        None => break,
                    },
                    () = &mut idle => self.on_idle_expiry(),
                }
            } else {
                // Idle: no timer pending, only a new interaction wakes us.
                match events.recv().await {
                    Some(interaction) => {
                        self.on_interaction(interaction);
                        idle.as_mut().reset(Instant::now() + self.window);
                    }
                    None => break,
                }
            }
        }

        tracing::debug!("activity tracker stopped");
    }

    fn on_interaction(&mut self, interaction: Interaction) {
        let was_idle = !self.flag.is_active();
        self.flag.set(true);
        if was_idle {
            tracing::info!(?interaction, "user active again");
        } else {
            tracing::debug!(?interaction, "activity observed");
        }
        self.ping_if_due();
    }

    fn on_idle_expiry(&mut self) {
        self.flag.set(false);
        tracing::info!(
            window_secs = self.window.as_secs(),
            "user idle, notifying backend"
        );
        // The idle transition always reaches the backend, debounced or not.
        self.issue_ping();
    }

    /// Debounce rule: ping only if more than one window has passed since
    /// the last issued ping (or none was ever issued).
    fn ping_if_due(&mut self) {
        let due = self
            .last_ping
            .map_or(true, |at| at.elapsed() > self.window);
        if due {
            self.issue_ping();
        }
    }

    fn issue_ping(&mut self) {
        self.heartbeat.mark_active();
        // Recorded when the attempt is issued, not when it succeeds, so
        // a failing backend cannot raise the ping rate.
        self.last_ping = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_active() {
        let flag = LivenessFlag::new();
        assert!(flag.is_active());
    }

    #[test]
    fn test_flag_records_transitions_only_on_edges() {
        let flag = LivenessFlag::new();
        let initial = flag.last_transition();

        // Same value: timestamp untouched.
        flag.set(true);
        assert_eq!(flag.last_transition(), initial);

        flag.set(false);
        assert!(!flag.is_active());
        assert!(flag.last_transition() >= initial);
    }

    #[test]
    fn test_flag_shared_between_clones() {
        let flag = LivenessFlag::new();
        let reader = flag.clone();
        flag.set(false);
        assert!(!reader.is_active());
    }

    #[test]
    fn test_flag_rfc3339_has_z_suffix() {
        let flag = LivenessFlag::new();
        assert!(flag.last_transition_rfc3339().ends_with('Z'));
    }
}
