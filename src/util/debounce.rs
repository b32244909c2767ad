use std::time::Duration;

/// Single-shot delay that restarts on every notification.
///
/// Only the last value notified within the delay window is delivered.
/// Times are seconds on any monotonic clock (egui's `InputState::time`
/// in the app).
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, f64)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Restart the timer with a new value
    pub fn notify(&mut self, value: T, now: f64) {
        let deadline = now + self.delay.as_secs_f64();
        self.pending = Some((value, deadline));
    }

    /// Take the value once the delay has elapsed since the last notification
    pub fn poll(&mut self, now: f64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Time left before the pending value fires
    pub fn remaining(&self, now: f64) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| Duration::from_secs_f64((deadline - now).max(0.0)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
