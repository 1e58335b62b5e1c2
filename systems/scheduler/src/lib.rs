#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic tick scheduler driven by elapsed time.
//!
//! The scheduler is a single cancellable timer. Adapters feed it elapsed
//! time through [`Scheduler::advance`] and drain due ticks with
//! [`Scheduler::take_due`]. World events arm, cancel, or re-arm the timer
//! via [`Scheduler::handle`], so pausing, stopping, and tick-duration changes
//! never leave two timers running.

use std::time::Duration;

use danger_noodle_core::Event;
use tracing::trace;

/// Timer handle that decides when the next tick is due.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    interval: Option<Duration>,
    elapsed: Duration,
}

impl Scheduler {
    /// Creates a scheduler with no live timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer with `interval`, replacing any timer already running.
    pub fn schedule(&mut self, interval: Duration) {
        trace!(
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "tick timer armed"
        );
        self.interval = Some(interval);
        self.elapsed = Duration::ZERO;
    }

    /// Disarms the timer and discards accumulated time.
    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            trace!("tick timer cancelled");
        }
        self.elapsed = Duration::ZERO;
    }

    /// Reports whether a timer is live.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Interval of the live timer, if any.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Accrues elapsed time toward the next tick. Ignored while disarmed.
    pub fn advance(&mut self, dt: Duration) {
        if self.interval.is_some() {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Consumes one elapsed interval, returning `true` when a tick is due.
    ///
    /// A zero interval never fires.
    pub fn take_due(&mut self) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };

        if interval.is_zero() || self.elapsed < interval {
            return false;
        }

        self.elapsed -= interval;
        true
    }

    /// Time remaining before the next tick, or `None` while disarmed.
    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        self.interval
            .map(|interval| interval.saturating_sub(self.elapsed))
    }

    /// Consumes world events and re-arms or cancels the timer accordingly.
    ///
    /// `tick_duration` is the world's current interval, used when a game
    /// starts or resumes.
    pub fn handle(&mut self, events: &[Event], tick_duration: Duration) {
        for event in events {
            match event {
                Event::Started | Event::Resumed => self.schedule(tick_duration),
                Event::Paused | Event::Stopped { .. } => self.cancel(),
                Event::TickDurationChanged { duration } => self.schedule(*duration),
                _ => {}
            }
        }
    }
}
