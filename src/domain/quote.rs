//! The full pricing pipeline: inputs in, every derived value out.

use super::costs::CostBreakdown;
use super::inputs::PricingInputs;
use super::kpis::compute_kpis;
use super::pricing::{FeeSchedule, FinalPrice, solve_final_price, target_net_revenue};
use serde::Serialize;

/// Every derived value for one input record. Recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub filament_cost: f64,
    pub energy_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
    pub target_net_revenue: f64,
    /// Positive infinity when no finite price reaches the target.
    pub final_price: f64,
    pub fees_pct_value: f64,
    pub revenue_after_fees: f64,
    pub profit: f64,
    pub margin: f64,
    pub roi: f64,
}

impl Quote {
    pub fn price(&self) -> FinalPrice {
        if self.final_price.is_finite() {
            FinalPrice::Solved(self.final_price)
        } else {
            FinalPrice::Unsolvable
        }
    }
}

/// Run costs, solver and KPIs for `inputs`. Pure; call after every change.
pub fn compute_all(inputs: &PricingInputs) -> Quote {
    let costs = CostBreakdown::compute(inputs);
    let fees = FeeSchedule::from_inputs(inputs);

    let final_price = solve_final_price(costs.total, inputs.profit_factor, &fees).value();
    let kpis = compute_kpis(final_price, costs.total, &fees);

    Quote {
        filament_cost: costs.filament,
        energy_cost: costs.energy,
        labor_cost: costs.labor,
        total_cost: costs.total,
        target_net_revenue: target_net_revenue(costs.total, inputs.profit_factor),
        final_price,
        fees_pct_value: kpis.fees_pct_value,
        revenue_after_fees: kpis.revenue_after_fees,
        profit: kpis.profit,
        margin: kpis.margin,
        roi: kpis.roi,
    }
}
