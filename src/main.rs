use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use ordersync::config::Config;
use ordersync::{
    EngineOptions, HttpPricingClient, LogNotifier, OrderDraft, OrderSide, SyncEngine, logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // 1) config + logger
    let cfg = Config::load()?;
    logger::init();

    // 2) pricing service client + ping
    let client = HttpPricingClient::from_config(&cfg)?;
    client.check_connection().await?;
    info!("Pricing calculator reachable at {}", cfg.pricing_base_url);

    // 3) optional scripted session against the live calculator
    if let Some(symbol) = cfg.demo_symbol.clone() {
        run_smoke_session(&cfg, client, &symbol).await;
    }
    Ok(())
}

/// Composes a draft the way an operator would and lets the engine sync it:
/// set a balance and a profit target, wait out the debounce window plus a
/// round trip, then dump the resulting field set.
async fn run_smoke_session(cfg: &Config, client: HttpPricingClient, symbol: &str) {
    let engine = SyncEngine::new(
        client,
        Arc::new(LogNotifier),
        OrderDraft::new(symbol, OrderSide::Buy),
        EngineOptions::from_config(cfg),
    );

    engine.set_account_balance(5_000.0);
    engine.set_leverage(10.0);
    engine.set_target_profit(Some(100.0));

    tokio::time::sleep(Duration::from_millis(cfg.debounce_ms) + Duration::from_secs(3)).await;

    let draft = engine.snapshot();
    info!(
        "Smoke session draft: volume={:?}, open={:?}, margin={:?}, expected profit={:?}",
        draft.volume,
        draft.lane(draft.side).open_price,
        draft.lane(draft.side).required_margin,
        draft.lane(draft.side).expected_profit,
    );
    engine.teardown();
}
