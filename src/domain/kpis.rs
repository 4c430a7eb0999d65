//! Profitability KPIs for a given advertised price.

use super::number::to_number_safe;
use super::pricing::FeeSchedule;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub fees_pct_value: f64,
    pub revenue_after_fees: f64,
    pub profit: f64,
    /// Profit as a fraction of the advertised price.
    pub margin: f64,
    /// Profit as a fraction of total cost.
    pub roi: f64,
}

impl Kpis {
    /// Money values as the price grows without bound: each one heads to the
    /// infinity matching the sign of its per-unit-of-price slope, or settles
    /// at its constant term when the slope is zero. Ratios are reported as `0`.
    fn unbounded(total_cost: f64, fees: &FeeSchedule) -> Self {
        let pct = fees.pct_fraction();
        let kept = 1.0 - pct;
        Kpis {
            fees_pct_value: limit(pct, 0.0),
            revenue_after_fees: limit(kept, -fees.fixed()),
            profit: limit(kept, -fees.fixed() - total_cost),
            margin: 0.0,
            roi: 0.0,
        }
    }
}

fn limit(slope: f64, constant: f64) -> f64 {
    if slope > 0.0 {
        f64::INFINITY
    } else if slope < 0.0 {
        f64::NEG_INFINITY
    } else {
        constant
    }
}

/// Never fails. A non-finite `final_price` (the unsolvable sentinel) yields
/// the unbounded-price limits of the money values and zero ratios, never `NaN`.
pub fn compute_kpis(final_price: f64, total_cost: f64, fees: &FeeSchedule) -> Kpis {
    let total_cost = to_number_safe(total_cost);
    if !final_price.is_finite() {
        return Kpis::unbounded(total_cost, fees);
    }

    let fees_pct_value = final_price * fees.pct_fraction();
    let revenue_after_fees = final_price - fees_pct_value - fees.fixed();
    let profit = revenue_after_fees - total_cost;

    let margin = if final_price > 0.0 {
        profit / final_price
    } else {
        0.0
    };
    let roi = if total_cost > 0.0 {
        profit / total_cost
    } else {
        0.0
    };

    Kpis {
        fees_pct_value,
        revenue_after_fees,
        profit,
        margin,
        roi,
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
    fn kpis_without_fees() {
        let k = compute_kpis(200.0, 100.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(k.fees_pct_value, 0.0);
        assert_eq!(k.revenue_after_fees, 200.0);
        assert_eq!(k.profit, 100.0);
        assert_relative_eq!(k.margin, 0.5);
        assert_relative_eq!(k.roi, 1.0);
    }

    #[test]
    fn kpis_with_fees_recover_target() {
        // price 255 solved for cost 100, factor 1, 20% + R$4
        let k = compute_kpis(255.0, 100.0, &fees(20.0, 4.0, 0.0));
        assert_relative_eq!(k.fees_pct_value, 51.0, epsilon = 1e-9);
        assert_relative_eq!(k.revenue_after_fees, 200.0, epsilon = 1e-9);
        assert_relative_eq!(k.profit, 100.0, epsilon = 1e-9);
        assert_relative_eq!(k.roi, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_price_has_zero_margin() {
        let k = compute_kpis(0.0, 10.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(k.margin, 0.0);
        assert_eq!(k.profit, -10.0);
        assert_eq!(k.roi, -1.0);
    }

    #[test]
    fn zero_cost_has_zero_roi() {
        let k = compute_kpis(10.0, 0.0, &fees(0.0, 0.0, 0.0));
        assert_eq!(k.roi, 0.0);
        assert_eq!(k.margin, 1.0);
    }

    #[test]
    fn infinite_price_does_not_produce_nan() {
        let k = compute_kpis(f64::INFINITY, 100.0, &fees(60.0, 4.0, 40.0));
        assert_eq!(k.fees_pct_value, f64::INFINITY);
        // fees take exactly the whole price, leaving only the fixed fee
        assert_eq!(k.revenue_after_fees, -4.0);
        assert_eq!(k.profit, -104.0);
        assert_eq!(k.margin, 0.0);
        assert_eq!(k.roi, 0.0);
    }

    #[test]
    fn fees_above_price_drive_revenue_and_profit_negative() {
        let k = compute_kpis(f64::INFINITY, 100.0, &fees(150.0, 0.0, 0.0));
        assert_eq!(k.fees_pct_value, f64::INFINITY);
        assert_eq!(k.revenue_after_fees, f64::NEG_INFINITY);
        assert_eq!(k.profit, f64::NEG_INFINITY);
        assert_eq!(k.margin, 0.0);
        assert_eq!(k.roi, 0.0);
    }

    #[test]
    fn overflowing_price_keeps_positive_profit() {
        let k = compute_kpis(f64::INFINITY, 100.0, &fees(20.0, 4.0, 0.0));
        assert_eq!(k.fees_pct_value, f64::INFINITY);
        assert_eq!(k.revenue_after_fees, f64::INFINITY);
        assert_eq!(k.profit, f64::INFINITY);
    }

    #[test]
    fn nan_price_is_treated_as_unsolvable() {
        let k = compute_kpis(f64::NAN, 100.0, &fees(0.0, 0.0, 0.0));
        assert!(!k.margin.is_nan());
        assert!(!k.profit.is_nan());
    }
}
