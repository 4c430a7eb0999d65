//! Itemized production costs.

use super::inputs::PricingInputs;
use super::number::to_number_safe;

const GRAMS_PER_KG: f64 = 1000.0;
const WATTS_PER_KW: f64 = 1000.0;

/// Filament cost: price per gram times grams, inflated by the waste percentage.
pub fn filament_cost(price_per_kg: f64, grams: f64, waste_pct: f64) -> f64 {
    let kg_price = to_number_safe(price_per_kg);
    let g = to_number_safe(grams);
    let waste = to_number_safe(waste_pct) / 100.0;
    (kg_price / GRAMS_PER_KG) * g * (1.0 + waste)
}

/// Energy cost: kilowatts times hours times tariff.
pub fn energy_cost(watts: f64, hours: f64, kwh_tariff: f64) -> f64 {
    let w = to_number_safe(watts);
    let h = to_number_safe(hours);
    let t = to_number_safe(kwh_tariff);
    (w / WATTS_PER_KW) * h * t
}

pub fn labor_cost(hours: f64, hourly_rate: f64) -> f64 {
    to_number_safe(hours) * to_number_safe(hourly_rate)
}

/// Unweighted sum; each addend is coerced on its own so one bad part
/// cannot poison the total.
pub fn sum_costs(parts: &[f64]) -> f64 {
    parts.iter().fold(0.0, |acc, &p| acc + to_number_safe(p))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub filament: f64,
    pub energy: f64,
    pub labor: f64,
    pub total: f64,
}

impl CostBreakdown {
    pub fn compute(inputs: &PricingInputs) -> Self {
        let filament = filament_cost(
            inputs.filament_price_per_kg,
            inputs.grams_used,
            inputs.waste_pct,
        );
        let energy = energy_cost(inputs.watts, inputs.print_hours, inputs.kwh_tariff);
        let labor = labor_cost(inputs.labor_hours, inputs.hourly_rate);

        let total = sum_costs(&[
            filament,
            inputs.paint_cost,
            inputs.primer_cost,
            inputs.varnish_cost,
            inputs.other_materials,
            inputs.packaging,
            energy,
            labor,
        ]);

        CostBreakdown {
            filament,
            energy,
            labor,
            total,
        }
    }
}
