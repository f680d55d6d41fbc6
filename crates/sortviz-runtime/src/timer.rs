#![forbid(unsafe_code)]

//! Tick sources that drive a running replay.
//!
//! A timer is armed while a session is Running and disarmed otherwise. Ticks
//! carry a monotonically increasing counter so stale ticks can be told apart
//! in logs.
//!
//! # Invariants
//!
//! 1. A disarmed timer delivers nothing, including ticks queued before the
//!    disarm.
//! 2. Ticks are handed out one at a time; the driver applies each before
//!    asking for the next.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// One timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(pub u64);

/// Something that can deliver ticks at an interval.
pub trait TimerSource {
    /// Start firing every `interval`. Re-arming restarts the interval.
    fn arm(&mut self, interval: Duration);

    /// Stop firing and discard pending ticks.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Next pending tick without blocking.
    fn try_tick(&mut self) -> Option<Tick>;

    /// Next tick, waiting up to `timeout` for one.
    fn wait_tick(&mut self, timeout: Duration) -> Option<Tick> {
        let _ = timeout;
        self.try_tick()
    }
}

// ============================================================================
// ManualTimer
// ============================================================================

/// Deterministic timer fired by hand.
#[derive(Debug, Default)]
pub struct ManualTimer {
    armed: Option<Duration>,
    pending: VecDeque<Tick>,
    next: u64,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one tick if armed.
    pub fn fire(&mut self) -> Option<Tick> {
        self.armed?;
        let tick = Tick(self.next);
        self.next += 1;
        self.pending.push_back(tick);
        Some(tick)
    }

    /// Interval passed to the last `arm`, while armed.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.armed
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl TimerSource for ManualTimer {
    fn arm(&mut self, interval: Duration) {
        self.pending.clear();
        self.armed = Some(interval);
    }

    fn disarm(&mut self) {
        self.armed = None;
        self.pending.clear();
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    fn try_tick(&mut self) -> Option<Tick> {
        self.pending.pop_front()
    }
}

// ============================================================================
// IntervalTimer
// ============================================================================

/// Condvar-backed stop flag shared with the ticker thread.
#[derive(Clone, Default)]
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Wait for a stop or a timeout. Returns `true` if stopped.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }

    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }
}

struct Ticker {
    stop: StopSignal,
    thread: Option<thread::JoinHandle<()>>,
    receiver: mpsc::Receiver<Tick>,
}

/// Wall-clock timer running on a background thread.
pub struct IntervalTimer {
    ticker: Option<Ticker>,
    counter: Arc<AtomicU64>,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticker: None,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn spawn(&self, interval: Duration) -> Ticker {
        let (sender, receiver) = mpsc::channel();
        let stop = StopSignal::default();
        let signal = stop.clone();
        let counter = Arc::clone(&self.counter);
        let thread = thread::spawn(move || {
            loop {
                if signal.wait_timeout(interval) {
                    break;
                }
                let tick = Tick(counter.fetch_add(1, Ordering::Relaxed));
                if sender.send(tick).is_err() {
                    break;
                }
            }
        });
        Ticker {
            stop,
            thread: Some(thread),
            receiver,
        }
    }
}

impl TimerSource for IntervalTimer {
    fn arm(&mut self, interval: Duration) {
        self.disarm();
        tracing::trace!(interval_ms = interval.as_millis() as u64, "interval timer armed");
        self.ticker = Some(self.spawn(interval));
    }

    fn disarm(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop.stop();
            if let Some(handle) = ticker.thread.take() {
                let _ = handle.join();
            }
            // The receiver is dropped with the ticker, discarding stale ticks.
            tracing::trace!("interval timer disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.ticker.is_some()
    }

    fn try_tick(&mut self) -> Option<Tick> {
        self.ticker.as_ref()?.receiver.try_recv().ok()
    }

    fn wait_tick(&mut self, timeout: Duration) -> Option<Tick> {
        self.ticker.as_ref()?.receiver.recv_timeout(timeout).ok()
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        if let Some(ticker) = &self.ticker {
            ticker.stop.stop();
        }
    }
}
