//! Price solver.
//!
//! Finds the advertised price `P` whose net revenue after the marketplace
//! percentage fee, the client discount and the flat marketplace fee equals the
//! target net revenue:
//!
//! ```text
//! net(P) = P * (1 - market% - discount%) - market_fixed
//! target = total_cost * (1 + profit_factor)
//! P      = (target + market_fixed) / (1 - market% - discount%)
//! ```

use super::inputs::PricingInputs;
use super::number::to_number_safe;
use serde::Serialize;

/// Marketplace fees and client discount applied to the advertised price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Percentage of the price kept by the marketplace (12.5 means 12.5%).
    pub market_pct: f64,
    /// Flat fee per sale.
    pub market_fixed: f64,
    /// Percentage of the price given up as a client discount.
    pub client_discount_pct: f64,
}

impl FeeSchedule {
    pub fn from_inputs(inputs: &PricingInputs) -> Self {
        FeeSchedule {
            market_pct: inputs.market_pct,
            market_fixed: inputs.market_fixed,
            client_discount_pct: inputs.client_discount_pct,
        }
    }

    /// Combined percentage deductions as a fraction of the price.
    pub fn pct_fraction(&self) -> f64 {
        to_number_safe(self.market_pct) / 100.0 + to_number_safe(self.client_discount_pct) / 100.0
    }

    pub fn fixed(&self) -> f64 {
        to_number_safe(self.market_fixed)
    }
}

/// Outcome of [`solve_final_price`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinalPrice {
    Solved(f64),
    /// Percentage deductions take 100% or more of the price; no finite price works.
    Unsolvable,
}

impl FinalPrice {
    /// Numeric view: the solved price, or positive infinity when unsolvable.
    pub fn value(self) -> f64 {
        match self {
            FinalPrice::Solved(p) => p,
            FinalPrice::Unsolvable => f64::INFINITY,
        }
    }

    pub fn is_solvable(self) -> bool {
        matches!(self, FinalPrice::Solved(_))
    }
}

/// Net revenue the sale must leave after all fees.
pub fn target_net_revenue(total_cost: f64, profit_factor: f64) -> f64 {
    to_number_safe(total_cost) * (1.0 + to_number_safe(profit_factor))
}

pub fn solve_final_price(total_cost: f64, profit_factor: f64, fees: &FeeSchedule) -> FinalPrice {
    let target = target_net_revenue(total_cost, profit_factor);
    let pct_total = 1.0 - fees.pct_fraction();
    if pct_total <= 0.0 {
        return FinalPrice::Unsolvable;
    }
    let price = (target + fees.fixed()) / pct_total;
    if price.is_finite() {
        FinalPrice::Solved(price)
    } else {
        FinalPrice::Unsolvable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fees(market_pct: f64, market_fixed: f64, client_discount_pct: f64) -> FeeSchedule {
        FeeSchedule {
            market_pct,
            market_fixed,
            client_discount_pct,
        }
    }

    #[test]
    fn no_fees_doubles_cost_at_factor_one() {
        let price = solve_final_price(100.0, 1.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(price, FinalPrice::Solved(200.0));
    }

    #[test]
    fn zero_factor_breaks_even() {
        let price = solve_final_price(50.0, 0.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(price.value(), 50.0);
    }

    #[test]
    fn fixed_fee_is_added_before_dividing() {
        // (100 * 2 + 4) / (1 - 0.2)
        let price = solve_final_price(100.0, 1.0, &fees(20.0, 4.0, 0.0));
        assert_relative_eq!(price.value(), 255.0, epsilon = 1e-9);
    }

    #[test]
    fn discount_and_market_pct_combine() {
        // (10 * 1 + 0) / (1 - 0.25 - 0.25)
        let price = solve_final_price(10.0, 0.0, &fees(25.0, 0.0, 25.0));
        assert_relative_eq!(price.value(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn hundred_percent_deductions_are_unsolvable() {
        let price = solve_final_price(100.0, 1.0, &fees(60.0, 0.0, 40.0));
        assert_eq!(price, FinalPrice::Unsolvable);
        assert_eq!(price.value(), f64::INFINITY);
        assert!(!price.is_solvable());
    }

    #[test]
    fn over_hundred_percent_is_unsolvable() {
        let price = solve_final_price(100.0, 1.0, &fees(150.0, 4.0, 0.0));
        assert_eq!(price, FinalPrice::Unsolvable);
        assert!(!price.value().is_nan());
    }

    #[test]
    fn overflow_is_unsolvable() {
        let price = solve_final_price(f64::MAX, 1.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(price, FinalPrice::Unsolvable);
    }

    #[test]
    fn negative_inputs_still_solve() {
        let price = solve_final_price(-10.0, 1.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(price, FinalPrice::Solved(-20.0));
    }

    #[test]
    fn target_net_revenue_formula() {
        assert_eq!(target_net_revenue(100.0, 2.0), 300.0);
        assert_eq!(target_net_revenue(f64::NAN, 2.0), 0.0);
    }
}
