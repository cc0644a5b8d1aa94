//! Debounce Scheduler
//!
//! Pure timing and request coalescing: no business logic, no global state.
//! A rapid stream of compile requests collapses into one trigger after the
//! quiescence window; each new request supersedes the pending one and
//! re-arms the window. The staged input survives a fire so `refresh()` and
//! visibility-restore can re-trigger without new edits.

use std::time::{Duration, Instant};

use super::messages::CompileInput;

pub(crate) struct Debouncer {
    /// Latest staged request; superseded in place by newer requests
    staged: Option<CompileInput>,
    last_event: Option<Instant>,
    quiescence: Duration,
    /// Bypass flag: fire on the next tick regardless of the window
    fire_now: bool,
}

impl Debouncer {
    pub fn new(quiescence: Duration) -> Self {
        Self {
            staged: None,
            last_event: None,
            quiescence,
            fire_now: false,
        }
    }

    /// Stage a request, superseding any pending one and re-arming the window.
    pub fn stage(&mut self, input: CompileInput) {
        self.staged = Some(input);
        self.last_event = Some(Instant::now());
        self.fire_now = false;
    }

    /// Cancel the pending trigger, keeping the staged input for later re-arm.
    pub fn cancel(&mut self) {
        self.last_event = None;
        self.fire_now = false;
    }

    /// Re-trigger the staged request immediately (refresh / visibility restore).
    pub fn rearm_now(&mut self) {
        if self.staged.is_some() {
            self.fire_now = true;
        }
    }

    pub fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    /// A trigger is armed (window running or immediate fire requested).
    pub fn is_pending(&self) -> bool {
        self.fire_now || self.last_event.is_some()
    }

    /// Take the staged request if ready. Fires at most once per arm; the
    /// staged input itself is retained for refresh.
    pub fn take_if_ready(&mut self) -> Option<CompileInput> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        self.fire_now = false;
        self.staged.clone()
    }

    fn is_ready(&self) -> bool {
        if self.staged.is_none() {
            return false;
        }
        if self.fire_now {
            return true;
        }
        match self.last_event {
            Some(last) => last.elapsed() >= self.quiescence,
            None => false,
        }
    }

    /// Precise sleep duration until the next possible ready time.
    pub fn sleep_duration(&self) -> Duration {
        if self.fire_now {
            return Duration::from_millis(1);
        }
        let Some(last) = self.last_event else {
            return Duration::from_secs(86400);
        };
        self.quiescence
            .saturating_sub(last.elapsed())
            .max(Duration::from_millis(1))
    }
}
