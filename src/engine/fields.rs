// src/engine/fields.rs

use crate::models::{CalcMode, OrderSide};
use crate::pricing::CalculationResult;

/// Price/margin/profit slots for one side. `None` means "not populated yet";
/// a populated value may come from the operator or from an applied result,
/// the engine does not distinguish.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaneFields {
    pub open_price: Option<f64>,
    pub close_price: Option<f64>,
    pub required_margin: Option<f64>,
    pub expected_profit: Option<f64>,
}

/// Which lanes the hosting screen actually renders. The bulk-order screen
/// shows both; the quick-order screen shows only the active side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneSet {
    Both,
    BuyOnly,
    SellOnly,
}

impl LaneSet {
    pub fn allows(self, side: OrderSide) -> bool {
        match self {
            LaneSet::Both => true,
            LaneSet::BuyOnly => side == OrderSide::Buy,
            LaneSet::SellOnly => side == OrderSide::Sell,
        }
    }
}

/// Working field set for one order being composed.
///
/// The buy and sell lanes are independent storage slots: switching `side`
/// changes which lane future edits and applies target, it never copies or
/// merges lane contents.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub symbol: String,
    pub side: OrderSide,
    pub leverage: f64,
    pub account_balance: f64,
    pub volume: Option<f64>,
    pub target_profit: Option<f64>,
    pub commission: Option<f64>,
    pub swap: Option<f64>,
    pub buy: LaneFields,
    pub sell: LaneFields,
}

impl OrderDraft {
    pub fn new(symbol: impl Into<String>, side: OrderSide) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            leverage: 1.0,
            account_balance: 0.0,
            volume: None,
            target_profit: None,
            commission: None,
            swap: None,
            buy: LaneFields::default(),
            sell: LaneFields::default(),
        }
    }

    pub fn lane(&self, side: OrderSide) -> &LaneFields {
        match side {
            OrderSide::Buy => &self.buy,
            OrderSide::Sell => &self.sell,
        }
    }

    pub fn lane_mut(&mut self, side: OrderSide) -> &mut LaneFields {
        match side {
            OrderSide::Buy => &mut self.buy,
            OrderSide::Sell => &mut self.sell,
        }
    }

    /// The lane a logical price edit targets right now.
    pub fn active_lane(&self) -> &LaneFields {
        self.lane(self.side)
    }

    pub(crate) fn active_lane_mut(&mut self) -> &mut LaneFields {
        self.lane_mut(self.side)
    }

    /// Side-matching open price from a result, falling back to the generic
    /// entry price the profit-based endpoint returns.
    fn result_open_price(&self, result: &CalculationResult) -> Option<f64> {
        let side_specific = match self.side {
            OrderSide::Buy => result.buy_open_price,
            OrderSide::Sell => result.sell_open_price,
        };
        side_specific.or(result.entry_price)
    }

    fn result_close_price(&self, result: &CalculationResult) -> Option<f64> {
        match self.side {
            OrderSide::Buy => result.buy_close_price,
            OrderSide::Sell => result.sell_close_price,
        }
    }

    /// Writes a calculation result into the draft, all-or-nothing.
    ///
    /// Only the lane matching the CURRENT side is touched; response fields
    /// for the opposite side are dropped. Absent response fields leave the
    /// existing values alone. Callers must hold the suppression gate.
    pub(crate) fn apply_result(&mut self, mode: CalcMode, result: &CalculationResult) {
        let open = self.result_open_price(result);
        let close = self.result_close_price(result);

        if let Some(v) = result.volume {
            self.volume = Some(v);
        }

        let lane = self.active_lane_mut();
        if let Some(p) = open {
            lane.open_price = Some(p);
        }
        if let Some(m) = result.required_margin {
            lane.required_margin = Some(m);
        }
        if let Some(p) = result.expected_profit {
            lane.expected_profit = Some(p);
        }

        match mode {
            CalcMode::VolumeBased => {
                let lane = self.active_lane_mut();
                if let Some(p) = close {
                    lane.close_price = Some(p);
                }
                // Keep the profit trigger input consistent with what the
                // operator now sees in the expected-profit field.
                if let Some(p) = result.expected_profit {
                    self.target_profit = Some(p);
                }
                if let Some(c) = result.commission {
                    self.commission = Some(c);
                }
                if let Some(s) = result.swap {
                    self.swap = Some(s);
                }
            }
            CalcMode::ProfitBased => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> CalculationResult {
        CalculationResult {
            volume: Some(2.1),
            buy_open_price: Some(50_010.0),
            buy_close_price: Some(51_020.0),
            sell_open_price: Some(49_990.0),
            sell_close_price: Some(48_980.0),
            required_margin: Some(476.7),
            expected_profit: Some(101.5),
            commission: Some(1.2),
            swap: Some(-0.3),
            ..CalculationResult::default()
        }
    }

    #[test]
    fn volume_apply_targets_current_lane_only() {
        let mut draft = OrderDraft::new("BTCUSD", OrderSide::Buy);
        draft.sell.open_price = Some(42.0);

        draft.apply_result(CalcMode::VolumeBased, &result());

        assert_eq!(draft.volume, Some(2.1));
        assert_eq!(draft.buy.open_price, Some(50_010.0));
        assert_eq!(draft.buy.close_price, Some(51_020.0));
        assert_eq!(draft.buy.required_margin, Some(476.7));
        assert_eq!(draft.target_profit, Some(101.5));
        assert_eq!(draft.commission, Some(1.2));
        assert_eq!(draft.swap, Some(-0.3));
        // Sell lane untouched apart from what was already there
        assert_eq!(draft.sell.open_price, Some(42.0));
        assert_eq!(draft.sell.close_price, None);
        assert_eq!(draft.sell.required_margin, None);
    }

    #[test]
    fn profit_apply_leaves_close_price_and_costs_alone() {
        let mut draft = OrderDraft::new("BTCUSD", OrderSide::Sell);
        draft.sell.close_price = Some(48_000.0);
        draft.target_profit = Some(100.0);

        draft.apply_result(CalcMode::ProfitBased, &result());

        assert_eq!(draft.volume, Some(2.1));
        assert_eq!(draft.sell.open_price, Some(49_990.0));
        assert_eq!(draft.sell.required_margin, Some(476.7));
        assert_eq!(draft.sell.expected_profit, Some(101.5));
        // Profit-based applies never touch these
        assert_eq!(draft.sell.close_price, Some(48_000.0));
        assert_eq!(draft.target_profit, Some(100.0));
        assert_eq!(draft.commission, None);
        assert_eq!(draft.swap, None);
    }

    #[test]
    fn open_price_falls_back_to_entry_price() {
        let mut draft = OrderDraft::new("BTCUSD", OrderSide::Buy);
        let res = CalculationResult {
            entry_price: Some(123.4),
            ..CalculationResult::default()
        };

        draft.apply_result(CalcMode::ProfitBased, &res);
        assert_eq!(draft.buy.open_price, Some(123.4));
    }

    #[test]
    fn absent_fields_do_not_clear_existing_values() {
        let mut draft = OrderDraft::new("BTCUSD", OrderSide::Buy);
        draft.volume = Some(3.0);
        draft.buy.required_margin = Some(10.0);

        draft.apply_result(CalcMode::VolumeBased, &CalculationResult::default());
        assert_eq!(draft.volume, Some(3.0));
        assert_eq!(draft.buy.required_margin, Some(10.0));
    }

    #[test]
    fn lane_set_gating() {
        assert!(LaneSet::Both.allows(OrderSide::Buy));
        assert!(LaneSet::Both.allows(OrderSide::Sell));
        assert!(LaneSet::BuyOnly.allows(OrderSide::Buy));
        assert!(!LaneSet::BuyOnly.allows(OrderSide::Sell));
        assert!(!LaneSet::SellOnly.allows(OrderSide::Buy));
    }
}
