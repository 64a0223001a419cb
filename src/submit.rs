// src/submit.rs
//
// Order submission from a finished draft snapshot. Not part of the
// synchronization loop: it only reads the final field values the engine
// produced. The draft is never cleared here, so the operator can retry a
// failed submission as-is.

use anyhow::{Result, anyhow};
use tracing::info;

use crate::engine::OrderDraft;
use crate::notifier::{AlertKind, Notifier};
use crate::pricing::{BulkOrderRequest, OrderAck, OrderGateway, SmartPlOrderRequest};

pub async fn submit_bulk_order(
    gateway: &impl OrderGateway,
    notifier: &dyn Notifier,
    draft: &OrderDraft,
    trading_account_id: i64,
) -> Result<OrderAck> {
    let Some(volume) = draft.volume else {
        notifier.notify(AlertKind::Warning, "Cannot submit: volume is not set");
        return Err(anyhow!("Bulk order submission requires a volume"));
    };
    let lane = draft.lane(draft.side);
    let req = BulkOrderRequest {
        symbol: draft.symbol.clone(),
        side: draft.side,
        volume,
        open_price: lane.open_price,
        close_price: lane.close_price,
        leverage: draft.leverage,
        trading_account_id,
    };

    report(notifier, "Bulk order", gateway.create_bulk_order(&req).await)
}

pub async fn submit_order_with_smart_pl(
    gateway: &impl OrderGateway,
    notifier: &dyn Notifier,
    draft: &OrderDraft,
    trading_account_id: i64,
) -> Result<OrderAck> {
    let Some(target_profit) = draft.target_profit else {
        notifier.notify(AlertKind::Warning, "Cannot submit: target profit is not set");
        return Err(anyhow!("Smart P/L submission requires a target profit"));
    };
    let lane = draft.lane(draft.side);
    let req = SmartPlOrderRequest {
        symbol: draft.symbol.clone(),
        side: draft.side,
        target_profit,
        volume: draft.volume,
        open_price: lane.open_price,
        leverage: draft.leverage,
        trading_account_id,
    };

    report(
        notifier,
        "Smart P/L order",
        gateway.create_order_with_smart_pl(&req).await,
    )
}

fn report(notifier: &dyn Notifier, what: &str, outcome: Result<OrderAck>) -> Result<OrderAck> {
    match outcome {
        Ok(ack) => {
            info!("{} accepted: id={}", what, ack.order_id);
            notifier.notify(AlertKind::Success, &format!("{what} created"));
            Ok(ack)
        }
        Err(e) => {
            // Backend message when there is one, generic fallback otherwise.
            let msg = e.to_string();
            let msg = if msg.is_empty() {
                format!("{what} submission failed")
            } else {
                format!("{what} submission failed: {msg}")
            };
            notifier.notify(AlertKind::Error, &msg);
            Err(e)
        }
    }
}
