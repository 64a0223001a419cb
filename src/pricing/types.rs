// src/pricing/types.rs
use serde::{Deserialize, Serialize};

use crate::models::OrderSide;

/// Envelope every pricing-service endpoint wraps its payload in.
/// `code == 0` means success; anything else carries a backend message.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Inputs for the smart-P/L calculation: size the trade from a profit target.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitCalcRequest {
    pub symbol: String,
    pub target_profit: f64,
    pub account_balance: f64,
    pub side: OrderSide,
    pub leverage: f64,
    pub trading_account_id: i64,
}

/// Inputs for the volume-based calculation: explicit volume plus the current
/// lane's entry/exit prices.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeCalcRequest {
    pub symbol: String,
    pub volume: f64,
    pub account_balance: f64,
    pub side: OrderSide,
    pub entry_price: f64,
    pub exit_price: f64,
    pub leverage: f64,
    pub trading_account_id: i64,
}

/// Calculator response. Every field is optional: the service only returns
/// what the requested mode derives, and side-specific prices come back only
/// for the side it priced.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationResult {
    pub volume: Option<f64>,
    pub entry_price: Option<f64>,
    pub buy_open_price: Option<f64>,
    pub buy_close_price: Option<f64>,
    pub sell_open_price: Option<f64>,
    pub sell_close_price: Option<f64>,
    pub required_margin: Option<f64>,
    pub expected_profit: Option<f64>,
    pub commission: Option<f64>,
    pub swap: Option<f64>,
}

/// Submission payload for the bulk-order endpoint.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_price: Option<f64>,
    pub leverage: f64,
    pub trading_account_id: i64,
}

/// Submission payload for the smart-P/L order endpoint.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SmartPlOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub target_profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<f64>,
    pub leverage: f64,
    pub trading_account_id: i64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub order_id: String,
    #[serde(default)]
    pub message: Option<String>,
}
