// src/config.rs
use anyhow::Result;
use config::{Config as Loader, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    // Pricing service
    pub pricing_base_url: String,
    pub pricing_api_key: Option<String>,
    pub trading_account_id: i64,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Symbol used by the binary's smoke session; no session is run when unset
    pub demo_symbol: Option<String>,
}

fn default_debounce_ms() -> u64 { 300 }
fn default_request_timeout_secs() -> u64 { 10 }

impl Config {
    pub fn load() -> Result<Self> {
        let file = env::var("ORDERSYNC_CONFIG").unwrap_or_else(|_| "Ordersync.toml".into());
        let loader = Loader::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::with_prefix("ORDERSYNC").separator("__"))
            .build()?;
        Ok(loader.try_deserialize()?)
    }
}
