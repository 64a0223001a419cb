pub mod config;
pub mod engine;
pub mod logger;
pub mod models;
pub mod notifier;
pub mod pricing;
pub mod submit;

pub use engine::{EngineOptions, LaneFields, LaneSet, ModeState, OrderDraft, SyncEngine};
pub use models::{CalcMode, OrderSide};
pub use notifier::{AlertKind, LogNotifier, Notifier};
pub use pricing::{
    CalculationResult, HttpPricingClient, OrderGateway, PricingCalculator, ProfitCalcRequest,
    VolumeCalcRequest,
};
