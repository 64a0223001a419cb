// src/engine/mod.rs
//
// Trade-parameter synchronization engine shared by the quick-order and
// bulk-order screens. One instance per open order-entry screen; the hosting
// screen differences (which lanes exist, debounce delay) come in through
// `EngineOptions`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::warn;

mod debounce;
mod fields;
mod gate;
mod orchestrator;

pub use fields::{LaneFields, LaneSet, OrderDraft};
pub use orchestrator::ModeState;

use debounce::DebounceScheduler;
use gate::SuppressionGate;
use orchestrator::{ModeTable, evaluate_triggers};

use crate::config::Config;
use crate::models::{CalcMode, OrderSide};
use crate::notifier::Notifier;
use crate::pricing::PricingCalculator;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub debounce_delay: Duration,
    pub lanes: LaneSet,
    pub trading_account_id: i64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(300),
            lanes: LaneSet::Both,
            trading_account_id: 0,
        }
    }
}

impl EngineOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            debounce_delay: Duration::from_millis(cfg.debounce_ms),
            lanes: LaneSet::Both,
            trading_account_id: cfg.trading_account_id,
        }
    }
}

pub(crate) struct EngineState {
    pub(crate) draft: OrderDraft,
    pub(crate) debounce: DebounceScheduler,
    pub(crate) gate: SuppressionGate,
    pub(crate) modes: ModeTable,
    pub(crate) torn_down: bool,
}

struct Inner<P> {
    pricing: P,
    notifier: Arc<dyn Notifier>,
    options: EngineOptions,
    token_seq: AtomicU64,
    state: Mutex<EngineState>,
}

/// The synchronization engine. Cheap to clone; clones share state, which is
/// how the debounce timer tasks and response handlers reach it.
pub struct SyncEngine<P> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for SyncEngine<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P> SyncEngine<P>
where
    P: PricingCalculator + 'static,
{
    pub fn new(
        pricing: P,
        notifier: Arc<dyn Notifier>,
        draft: OrderDraft,
        options: EngineOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                pricing,
                notifier,
                options,
                token_seq: AtomicU64::new(0),
                state: Mutex::new(EngineState {
                    draft,
                    debounce: DebounceScheduler::default(),
                    gate: SuppressionGate::default(),
                    modes: ModeTable::default(),
                    torn_down: false,
                }),
            }),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, EngineState> {
        // Poison-tolerant: the state is a plain field set, a panicked writer
        // cannot leave it logically torn.
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn pricing(&self) -> &P {
        &self.inner.pricing
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    pub(crate) fn options(&self) -> &EngineOptions {
        &self.inner.options
    }

    /// Monotonic request token; never reused within one engine instance.
    pub(crate) fn mint_token(&self) -> u64 {
        self.inner.token_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn edit(&self, mutate: impl FnOnce(&mut OrderDraft)) {
        let mut st = self.state();
        if st.torn_down {
            return;
        }
        mutate(&mut st.draft);
        evaluate_triggers(self, &mut st);
    }

    // --- user edit handlers -------------------------------------------------

    pub fn set_account_balance(&self, balance: f64) {
        self.edit(|d| d.account_balance = balance);
    }

    pub fn set_leverage(&self, leverage: f64) {
        self.edit(|d| d.leverage = leverage);
    }

    pub fn set_volume(&self, volume: Option<f64>) {
        self.edit(|d| d.volume = volume);
    }

    pub fn set_target_profit(&self, target_profit: Option<f64>) {
        self.edit(|d| d.target_profit = target_profit);
    }

    /// Logical price edits route into the lane of the currently selected
    /// side.
    pub fn set_open_price(&self, price: Option<f64>) {
        self.edit(|d| d.active_lane_mut().open_price = price);
    }

    pub fn set_close_price(&self, price: Option<f64>) {
        self.edit(|d| d.active_lane_mut().close_price = price);
    }

    /// Lane-addressed edit for screens that render both lanes at once.
    pub fn set_lane_open_price(&self, side: OrderSide, price: Option<f64>) {
        if !self.lane_enabled(side) {
            return;
        }
        self.edit(|d| d.lane_mut(side).open_price = price);
    }

    pub fn set_lane_close_price(&self, side: OrderSide, price: Option<f64>) {
        if !self.lane_enabled(side) {
            return;
        }
        self.edit(|d| d.lane_mut(side).close_price = price);
    }

    pub fn set_side(&self, side: OrderSide) {
        if !self.lane_enabled(side) {
            return;
        }
        self.edit(|d| d.side = side);
    }

    fn lane_enabled(&self, side: OrderSide) -> bool {
        if self.inner.options.lanes.allows(side) {
            true
        } else {
            warn!("Edit rejected: {} lane is not enabled on this screen", side);
            false
        }
    }

    // --- reads --------------------------------------------------------------

    pub fn snapshot(&self) -> OrderDraft {
        self.state().draft.clone()
    }

    pub fn side(&self) -> OrderSide {
        self.state().draft.side
    }

    /// Where one mode's calculation machine currently stands.
    pub fn mode_state(&self, mode: CalcMode) -> ModeState {
        self.state().modes.slot(mode).state
    }

    // --- lifecycle ----------------------------------------------------------

    /// Screen teardown: cancels pending timers and makes every outstanding
    /// response unconditionally stale. Transport calls are not aborted, their
    /// results are simply never applied.
    pub fn teardown(&self) {
        let mut st = self.state();
        st.torn_down = true;
        st.debounce.cancel_all();
        st.modes.reset();
    }
}
