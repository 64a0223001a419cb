// src/pricing/mod.rs
use async_trait::async_trait;

pub mod http;
pub mod types;

pub use http::HttpPricingClient;
pub use types::{
    BulkOrderRequest, CalculationResult, OrderAck, ProfitCalcRequest, SmartPlOrderRequest,
    VolumeCalcRequest,
};

/// Remote trade-math service. Stateless: every call carries the full input
/// snapshot, nothing is kept between requests.
#[async_trait]
pub trait PricingCalculator: Send + Sync {
    async fn calculate_from_profit(
        &self,
        req: &ProfitCalcRequest,
    ) -> anyhow::Result<CalculationResult>;

    async fn calculate_from_volume(
        &self,
        req: &VolumeCalcRequest,
    ) -> anyhow::Result<CalculationResult>;
}

/// Order-creation endpoints consuming a finished draft snapshot.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_bulk_order(&self, req: &BulkOrderRequest) -> anyhow::Result<OrderAck>;

    async fn create_order_with_smart_pl(
        &self,
        req: &SmartPlOrderRequest,
    ) -> anyhow::Result<OrderAck>;
}
