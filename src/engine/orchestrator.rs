// src/engine/orchestrator.rs
//
// Per-mode calculation state machine. Each mode (profit-based /
// volume-based) runs its own Idle -> Scheduled -> InFlight cycle; the two
// share the draft but never each other's tokens.

use anyhow::Result;
use tracing::{debug, info, trace};

use super::fields::OrderDraft;
use super::{EngineState, SyncEngine};
use crate::models::{CalcMode, OrderSide};
use crate::notifier::AlertKind;
use crate::pricing::{
    CalculationResult, PricingCalculator, ProfitCalcRequest, VolumeCalcRequest,
};

/// Observable state of one mode's calculation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Idle,
    Scheduled,
    InFlight {
        token: u64,
    },
}

#[derive(Debug, Default)]
pub(crate) struct ModeSlot {
    pub(crate) state: ModeState,
    /// Token of the newest request for this mode; a response whose token
    /// does not match at arrival time is stale. Cleared (not preserved) when
    /// a newer edit supersedes the in-flight request.
    pub(crate) latest_token: Option<u64>,
}

#[derive(Debug, Default)]
pub(crate) struct ModeTable {
    slots: [ModeSlot; 2],
}

impl ModeTable {
    pub(crate) fn slot(&self, mode: CalcMode) -> &ModeSlot {
        &self.slots[mode.index()]
    }

    pub(crate) fn slot_mut(&mut self, mode: CalcMode) -> &mut ModeSlot {
        &mut self.slots[mode.index()]
    }

    pub(crate) fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.state = ModeState::Idle;
            slot.latest_token = None;
        }
    }
}

/// Mode selection, evaluated on every relevant edit. Mutually exclusive;
/// volume-based takes priority when both are satisfiable.
pub(crate) fn select_mode(draft: &OrderDraft) -> Option<CalcMode> {
    let lane = draft.active_lane();
    if draft.volume.is_some() && lane.open_price.is_some() && lane.close_price.is_some() {
        return Some(CalcMode::VolumeBased);
    }
    if draft.target_profit.is_some() {
        return Some(CalcMode::ProfitBased);
    }
    None
}

#[derive(Debug, Clone)]
pub(crate) enum CalcPayload {
    Profit(ProfitCalcRequest),
    Volume(VolumeCalcRequest),
}

/// Immutable snapshot of one issued calculation attempt.
#[derive(Debug, Clone)]
pub(crate) struct IssuedRequest {
    pub(crate) token: u64,
    pub(crate) mode: CalcMode,
    /// Side at issue time; a draft whose side differs at arrival time
    /// invalidates the response the same way a stale token does.
    pub(crate) side: OrderSide,
    pub(crate) payload: CalcPayload,
}

/// Snapshots the inputs for `mode`. Returns `None` when a trigger field was
/// cleared between scheduling and the timer landing.
pub(crate) fn build_request(
    draft: &OrderDraft,
    mode: CalcMode,
    trading_account_id: i64,
    token: u64,
) -> Option<IssuedRequest> {
    let payload = match mode {
        CalcMode::VolumeBased => {
            let lane = draft.active_lane();
            CalcPayload::Volume(VolumeCalcRequest {
                symbol: draft.symbol.clone(),
                volume: draft.volume?,
                account_balance: draft.account_balance,
                side: draft.side,
                entry_price: lane.open_price?,
                exit_price: lane.close_price?,
                leverage: draft.leverage,
                trading_account_id,
            })
        }
        CalcMode::ProfitBased => CalcPayload::Profit(ProfitCalcRequest {
            symbol: draft.symbol.clone(),
            target_profit: draft.target_profit?,
            account_balance: draft.account_balance,
            side: draft.side,
            leverage: draft.leverage,
            trading_account_id,
        }),
    };
    Some(IssuedRequest { token, mode, side: draft.side, payload })
}

/// Runs after every draft mutation: picks a mode and (re)arms its debounce
/// timer. No-ops while the suppression gate is engaged or after teardown.
pub(super) fn evaluate_triggers<P>(engine: &SyncEngine<P>, st: &mut EngineState)
where
    P: PricingCalculator + 'static,
{
    if st.torn_down || st.gate.is_suppressed() {
        return;
    }
    let Some(mode) = select_mode(&st.draft) else {
        trace!("No trigger condition met, nothing scheduled");
        return;
    };

    let eng = engine.clone();
    st.debounce
        .schedule(mode, engine.options().debounce_delay, move |generation| async move {
            run_calculation(eng, mode, generation).await;
        });

    // An edit supersedes any in-flight request for this mode immediately:
    // clearing the token makes the outstanding response stale on arrival,
    // without cancelling it at the transport level.
    let slot = st.modes.slot_mut(mode);
    slot.latest_token = None;
    slot.state = ModeState::Scheduled;
}

/// Debounce timer landed: mint a token, snapshot the inputs, call the remote
/// calculator, then decide what to do with the outcome.
pub(super) async fn run_calculation<P>(engine: SyncEngine<P>, mode: CalcMode, generation: u64)
where
    P: PricingCalculator + 'static,
{
    let issued = {
        let mut st = engine.state();
        if st.torn_down || !st.debounce.is_current(mode, generation) {
            return;
        }
        if select_mode(&st.draft) != Some(mode) {
            // The condition dissolved while the timer was pending: a trigger
            // field was cleared, or the volume-based mode became satisfiable
            // and outranks a scheduled profit-based run.
            trace!("Trigger for {} no longer holds, skipping", mode);
            st.modes.slot_mut(mode).state = ModeState::Idle;
            return;
        }
        let token = engine.mint_token();
        let Some(issued) =
            build_request(&st.draft, mode, engine.options().trading_account_id, token)
        else {
            // A trigger field was cleared while the timer was pending.
            st.modes.slot_mut(mode).state = ModeState::Idle;
            return;
        };
        let slot = st.modes.slot_mut(mode);
        slot.latest_token = Some(token);
        slot.state = ModeState::InFlight { token };
        debug!("Calculation issued: mode={}, token={}", mode, token);
        issued
    };

    let outcome = match &issued.payload {
        CalcPayload::Profit(req) => engine.pricing().calculate_from_profit(req).await,
        CalcPayload::Volume(req) => engine.pricing().calculate_from_volume(req).await,
    };
    settle(&engine, issued, outcome);
}

/// Response arrival. Only the response matching `latest_token` at arrival
/// time is ever applied; the apply itself runs under the suppression gate so
/// it cannot schedule a follow-up calculation.
pub(super) fn settle<P>(
    engine: &SyncEngine<P>,
    issued: IssuedRequest,
    outcome: Result<CalculationResult>,
) where
    P: PricingCalculator + 'static,
{
    let mut st = engine.state();
    if st.torn_down {
        return;
    }
    if st.modes.slot(issued.mode).latest_token != Some(issued.token) {
        debug!(
            "Superseded response dropped: mode={}, token={}",
            issued.mode, issued.token
        );
        return;
    }

    match outcome {
        Ok(result) => {
            if st.draft.side != issued.side {
                debug!(
                    "Side changed since issue, response dropped: mode={}, token={}",
                    issued.mode, issued.token
                );
                st.modes.slot_mut(issued.mode).state = ModeState::Idle;
                return;
            }
            let st = &mut *st;
            st.gate.engage();
            st.draft.apply_result(issued.mode, &result);
            // The write-back touches trigger fields; re-running the trigger
            // evaluation under the gate is exactly the no-op the gate exists
            // to guarantee.
            evaluate_triggers(engine, st);
            st.gate.release();
            st.modes.slot_mut(issued.mode).state = ModeState::Idle;
            info!(
                "Calculation applied: mode={}, token={}",
                issued.mode, issued.token
            );
        }
        Err(e) => {
            st.modes.slot_mut(issued.mode).state = ModeState::Idle;
            engine.notifier().notify(
                AlertKind::Error,
                &format!("Trade parameter calculation failed: {e}"),
            );
        }
    }
}
