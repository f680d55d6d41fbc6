#![forbid(unsafe_code)]

//! Control-event dispatch.
//!
//! For each event the controller loads the session for its key (creating an
//! idle one over a random array on first visit), applies the control, arms or disarms the timer
//! to match, writes the session back and returns a [`ReadModel`].
//!
//! # Invariants
//!
//! 1. The timer is armed exactly while the active session is Running.
//! 2. One timer per controller: arming it for a new key pauses the session
//!    that held it before.
//! 3. Start and restart re-arm the timer, so ticks queued against a
//!    replaced trace are never applied to its successor.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use sortviz_core::InputError;

use crate::config::ReplayConfig;
use crate::diagnostics::{DiagnosticEntry, DiagnosticLog};
use crate::read_model::ReadModel;
use crate::session::{ReplaySession, Transition};
use crate::store::{SessionKey, SessionStore};
use crate::timer::TimerSource;

/// A presentation-layer control event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Start,
    Restart,
    Stop,
    Resume,
    Back,
    Tick,
    JumpTo(usize),
    /// Replace the working array. Values are applied as given; use
    /// [`ReplayController::submit`] for manual entry.
    Submit(Vec<i32>),
}

impl Control {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Resume => "resume",
            Self::Back => "back",
            Self::Tick => "tick",
            Self::JumpTo(_) => "jump_to",
            Self::Submit(_) => "submit",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drives replay sessions held in a [`SessionStore`] with one [`TimerSource`].
pub struct ReplayController<S, T> {
    store: S,
    timer: T,
    rng: SmallRng,
    config: ReplayConfig,
    diagnostics: DiagnosticLog,
    /// Key the timer is currently armed for.
    active: Option<SessionKey>,
}

impl<S: SessionStore, T: TimerSource> ReplayController<S, T> {
    /// Build a controller. Random arrays are seeded from `config.seed`, or
    /// from the OS when unset.
    #[must_use]
    pub fn new(store: S, timer: T, config: ReplayConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let diagnostics = DiagnosticLog::new(config.diagnostics_capacity);
        Self {
            store,
            timer,
            rng,
            config,
            diagnostics,
            active: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Key whose session currently receives timer ticks.
    #[must_use]
    pub fn active_key(&self) -> Option<&SessionKey> {
        self.active.as_ref()
    }

    /// Current read model for `key` without applying a control.
    ///
    /// A first visit establishes the session with a random array, so the
    /// pre-sort array is always renderable.
    pub fn view(&mut self, key: &SessionKey) -> ReadModel {
        if let Some(session) = self.store.get(key) {
            return ReadModel::from_session(&session);
        }
        let session = self.fresh_session(key);
        let model = ReadModel::from_session(&session);
        self.store.set(key.clone(), session);
        model
    }

    /// Validate a manually entered array and submit it.
    ///
    /// Limits are checked only when `enforce_limits` is set. A rejected
    /// array leaves the session untouched.
    pub fn submit(&mut self, key: &SessionKey, values: Vec<i32>) -> Result<ReadModel, InputError> {
        if self.config.enforce_limits {
            if let Err(err) = self.config.limits.validate(&values) {
                tracing::warn!(key = %key, error = %err, "submitted array rejected");
                return Err(err);
            }
        }
        Ok(self.dispatch(key, Control::Submit(values)))
    }

    /// Apply `control` to the session for `key`.
    pub fn dispatch(&mut self, key: &SessionKey, control: Control) -> ReadModel {
        let mut session = self.load(key);
        let before = session.generation();
        let cursor_before = session.cursor();
        let name = control.name();

        let transition = self.apply(&mut session, control);
        let revealed = name == "tick" && session.cursor() != cursor_before;
        self.record(key, name, &session, before, revealed, transition);
        self.sync_timer(key, &session, session.generation() != before);

        let model = ReadModel::from_session(&session);
        self.store.set(key.clone(), session);
        model
    }

    /// Apply one pending tick to the active session, if any.
    pub fn poll(&mut self) -> Option<ReadModel> {
        let tick = self.timer.try_tick()?;
        self.deliver(tick.0)
    }

    /// Wait up to `timeout` for a tick and apply it to the active session.
    pub fn wait_tick(&mut self, timeout: Duration) -> Option<ReadModel> {
        let tick = self.timer.wait_tick(timeout)?;
        self.deliver(tick.0)
    }

    /// End a browsing session's page: stop its timer and drop its state.
    pub fn forget(&mut self, key: &SessionKey) -> Option<ReplaySession> {
        if self.active.as_ref() == Some(key) {
            self.timer.disarm();
            self.active = None;
        }
        self.store.remove(key)
    }

    // ====================================================================
    // Internals
    // ====================================================================

    /// A new idle session over a freshly drawn random array.
    fn fresh_session(&mut self, key: &SessionKey) -> ReplaySession {
        let values = self.config.random_spec().draw(&mut self.rng);
        tracing::debug!(key = %key, len = values.len(), "no stored session, initializing");
        ReplaySession::with_array(key.algorithm, values).with_narration(self.config.narration)
    }

    fn load(&mut self, key: &SessionKey) -> ReplaySession {
        match self.store.get(key) {
            Some(session) => session,
            None => self.fresh_session(key),
        }
    }

    fn apply(&mut self, session: &mut ReplaySession, control: Control) -> Transition {
        let spec = self.config.random_spec();
        let rng = &mut self.rng;
        match control {
            Control::Start => session.start(|| spec.draw(rng)),
            Control::Restart => session.restart(self.config.restart_policy, || spec.draw(rng)),
            Control::Stop => session.stop(),
            Control::Resume => session.resume(),
            Control::Back => session.back(),
            Control::Tick => session.tick(),
            Control::JumpTo(cursor) => session.jump_to(cursor),
            Control::Submit(values) => session.submit(values),
        }
    }

    fn deliver(&mut self, tick: u64) -> Option<ReadModel> {
        let Some(key) = self.active.clone() else {
            tracing::debug!(tick, "tick with no active session dropped");
            return None;
        };
        tracing::trace!(tick, key = %key, "tick");
        Some(self.dispatch(&key, Control::Tick))
    }

    fn sync_timer(&mut self, key: &SessionKey, session: &ReplaySession, regenerated: bool) {
        let is_active = self.active.as_ref() == Some(key);
        if session.wants_ticks() {
            if !is_active {
                self.pause_active();
            }
            if !is_active || regenerated || !self.timer.is_armed() {
                self.timer.arm(self.config.tick_interval());
                self.active = Some(key.clone());
            }
        } else if is_active {
            self.timer.disarm();
            self.active = None;
        }
    }

    /// Pause the session currently holding the timer.
    fn pause_active(&mut self) {
        let Some(prev) = self.active.take() else {
            return;
        };
        self.timer.disarm();
        if let Some(mut session) = self.store.get(&prev) {
            if session.stop().is_applied() {
                tracing::debug!(key = %prev, "paused to hand over the timer");
                self.store.set(prev, session);
            }
        }
    }

    fn record(
        &mut self,
        key: &SessionKey,
        control: &'static str,
        session: &ReplaySession,
        generation_before: u64,
        revealed: bool,
        transition: Transition,
    ) {
        let key_label = key.to_string();
        match transition {
            Transition::Ignored { status, reason } => {
                let seq = self.diagnostics.next_seq();
                self.diagnostics.push(DiagnosticEntry::Ignored {
                    seq,
                    key: key_label,
                    control,
                    status,
                    reason,
                });
            }
            Transition::Applied { from, to } => {
                if session.generation() != generation_before {
                    tracing::info!(
                        key = %key,
                        generation = session.generation(),
                        steps = session.trace().len(),
                        "trace generated"
                    );
                    let seq = self.diagnostics.next_seq();
                    self.diagnostics.push(DiagnosticEntry::TraceGenerated {
                        seq,
                        key: key_label.clone(),
                        generation: session.generation(),
                        len: session.trace().initial.len(),
                        steps: session.trace().len(),
                    });
                }
                if revealed {
                    let seq = self.diagnostics.next_seq();
                    self.diagnostics.push(DiagnosticEntry::StepRevealed {
                        seq,
                        key: key_label.clone(),
                        cursor: session.cursor(),
                        total: session.trace().len(),
                        kind: session.last_revealed().map_or("none", |s| s.action.kind()),
                    });
                }
                if from != to || control != "tick" {
                    tracing::debug!(key = %key, control, %from, %to, cursor = session.cursor(), "transition");
                    let seq = self.diagnostics.next_seq();
                    self.diagnostics.push(DiagnosticEntry::Transition {
                        seq,
                        key: key_label,
                        control,
                        from,
                        to,
                        cursor: session.cursor(),
                    });
                }
            }
        }
    }
}
