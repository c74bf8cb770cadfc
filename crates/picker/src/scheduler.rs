//! One queue for every reason to re-run detection.
//!
//! Timer ticks, mutation batches, scroll and resize all land here and are
//! coalesced into at most one pending pass, so a burst of triggers costs one
//! detection pass and the order of passes is deterministic.

use core_types::Millis;

/// Why a pass was requested. Later variants win when requests coalesce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PassReason {
    Tick,
    Scroll,
    Resize,
    Mutation,
    Startup,
}

#[derive(Debug)]
pub struct RedetectScheduler {
    pending: Option<PassReason>,
    /// Passes are held until the host app has had time to mount its composer.
    not_before: Millis,
    tick_interval: Millis,
    last_tick: Option<Millis>,
    passes: u64,
}

impl RedetectScheduler {
    pub fn new(tick_interval: Millis) -> Self {
        Self {
            pending: None,
            not_before: 0,
            tick_interval: tick_interval.max(1),
            last_tick: None,
            passes: 0,
        }
    }

    /// Arm the startup pass for `load_time + delay`.
    pub fn start(&mut self, load_time: Millis, delay: Millis) {
        self.not_before = load_time.saturating_add(delay);
        self.last_tick = Some(self.not_before);
        self.request(PassReason::Startup);
    }

    pub fn request(&mut self, reason: PassReason) {
        self.pending = Some(match self.pending {
            Some(p) => p.max(reason),
            None => reason,
        });
    }

    /// Advance the clock, requesting a tick pass when one is due.
    pub fn advance(&mut self, now: Millis) {
        let Some(last) = self.last_tick else {
            return;
        };
        if now >= last.saturating_add(self.tick_interval) {
            // Missed intervals collapse into one tick.
            self.last_tick = Some(now);
            self.request(PassReason::Tick);
        }
    }

    pub fn pending(&self) -> Option<PassReason> {
        self.pending
    }

    /// Take the pending pass if the startup delay has elapsed.
    pub fn take(&mut self, now: Millis) -> Option<PassReason> {
        if now < self.not_before {
            return None;
        }
        let reason = self.pending.take()?;
        self.passes += 1;
        Some(reason)
    }

    pub fn passes_run(&self) -> u64 {
        self.passes
    }
}
