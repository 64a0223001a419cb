// src/engine/debounce.rs

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::CalcMode;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Per-mode debounce timers: a burst of edits collapses into one trigger per
/// mode after a quiet period. Rescheduling a mode aborts its pending timer
/// and restarts it (pure debounce, not throttle).
///
/// Each schedule bumps the mode's generation and hands it to the fire
/// callback; the engine rechecks the generation when the timer lands, since
/// an abort can lose the race against a timer that already woke up.
/// The scheduler never inspects field values.
#[derive(Debug, Default)]
pub(crate) struct DebounceScheduler {
    slots: [Slot; 2],
}

impl DebounceScheduler {
    pub(crate) fn schedule<F, Fut>(&mut self, mode: CalcMode, delay: Duration, fire: F)
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let slot = &mut self.slots[mode.index()];
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        debug!("Debounce armed: mode={}, generation={}", mode, generation);
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(generation).await;
        }));
    }

    pub(crate) fn is_current(&self, mode: CalcMode, generation: u64) -> bool {
        self.slots[mode.index()].generation == generation
    }

    /// Teardown: aborts every pending timer and invalidates generations so a
    /// timer that already woke up finds itself stale.
    pub(crate) fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            slot.generation += 1;
            if let Some(handle) = slot.handle.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_per_mode() {
        let mut sched = DebounceScheduler::default();
        assert!(sched.is_current(CalcMode::ProfitBased, 0));

        // Bookkeeping only; no runtime needed when nothing is spawned.
        sched.slots[CalcMode::VolumeBased.index()].generation = 3;
        assert!(sched.is_current(CalcMode::VolumeBased, 3));
        assert!(!sched.is_current(CalcMode::VolumeBased, 2));
        assert!(sched.is_current(CalcMode::ProfitBased, 0));
    }

    #[test]
    fn cancel_all_invalidates_generations() {
        let mut sched = DebounceScheduler::default();
        sched.cancel_all();
        assert!(!sched.is_current(CalcMode::ProfitBased, 0));
        assert!(!sched.is_current(CalcMode::VolumeBased, 0));
    }
}
