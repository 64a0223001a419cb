// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade side selected on the order-entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "Buy"),
            OrderSide::Sell => write!(f, "Sell"),
        }
    }
}

impl OrderSide {
    pub fn opposite(self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

/// Which remote calculation is being requested.
///
/// `VolumeBased` derives prices/margin from an explicit volume and entry/exit
/// pair; `ProfitBased` ("smart P/L") derives the trade size from a desired
/// profit target. The two run independent scheduling slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcMode {
    ProfitBased,
    VolumeBased,
}

impl CalcMode {
    pub(crate) fn index(self) -> usize {
        match self {
            CalcMode::ProfitBased => 0,
            CalcMode::VolumeBased => 1,
        }
    }
}

impl fmt::Display for CalcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcMode::ProfitBased => write!(f, "profit-based"),
            CalcMode::VolumeBased => write!(f, "volume-based"),
        }
    }
}
