//! Text and JSON rendering of quotes and input records.
//!
//! Money is shown in Brazilian reais with pt-BR separators (`R$ 1.234,56`).
//! Anything non-finite, such as the price of an unsolvable quote, is shown
//! as a dash.

use crate::domain::error::PricingError;
use crate::domain::inputs::{InputField, PricingInputs};
use crate::domain::quote::Quote;

pub const PLACEHOLDER: &str = "—";

const FORMULA_NOTE: &str = "Price = (target net revenue + fixed fee) / (1 - fee% - discount%); \
target net revenue = total cost x (1 + profit factor)";

pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let magnitude = value.abs();
    let mut whole = magnitude.trunc();
    let mut cents = ((magnitude - whole) * 100.0).round();
    if cents >= 100.0 {
        whole += 1.0;
        cents = 0.0;
    }
    let sign = if value < 0.0 && (whole > 0.0 || cents > 0.0) {
        "-"
    } else {
        ""
    };
    // `{:.0}` prints every integer digit of the f64; no integer cast caps it.
    let digits = format!("{whole:.0}");
    format!("{sign}R$ {},{:02}", group_thousands(&digits), cents as u8)
}

/// Ratio as a percentage with one decimal: `0.6667` becomes `66.7%`.
pub fn format_pct(ratio: f64) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.1}%", ratio * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<24}{:>16}\n", label, value));
}

pub fn render_summary(inputs: &PricingInputs, quote: &Quote) -> String {
    let mut out = String::new();

    out.push_str("=== Costs ===\n");
    row(&mut out, "Filament", &format_brl(quote.filament_cost));
    row(&mut out, "Paint", &format_brl(inputs.paint_cost));
    row(&mut out, "Primer", &format_brl(inputs.primer_cost));
    row(&mut out, "Varnish", &format_brl(inputs.varnish_cost));
    row(&mut out, "Other materials", &format_brl(inputs.other_materials));
    row(&mut out, "Packaging", &format_brl(inputs.packaging));
    row(&mut out, "Energy", &format_brl(quote.energy_cost));
    row(&mut out, "Labor", &format_brl(quote.labor_cost));

    out.push_str("\n=== Summary ===\n");
    row(&mut out, "Total cost", &format_brl(quote.total_cost));
    row(&mut out, "Target net revenue", &format_brl(quote.target_net_revenue));
    row(&mut out, "Suggested price", &format_brl(quote.final_price));
    row(&mut out, "Fees (% + discount)", &format_brl(quote.fees_pct_value));
    row(&mut out, "Fixed fee", &format_brl(inputs.market_fixed));
    row(&mut out, "Revenue after fees", &format_brl(quote.revenue_after_fees));
    row(&mut out, "Estimated profit", &format_brl(quote.profit));
    row(&mut out, "Margin on price", &format_pct(quote.margin));
    row(&mut out, "ROI on cost", &format_pct(quote.roi));

    if !quote.price().is_solvable() {
        out.push_str("\nNo finite price reaches the target: fees and discount take 100% or more.\n");
    }
    out.push('\n');
    out.push_str(FORMULA_NOTE);
    out.push('\n');
    out
}

pub fn render_json(quote: &Quote) -> Result<String, PricingError> {
    Ok(serde_json::to_string_pretty(quote)?)
}

pub fn render_inputs(inputs: &PricingInputs) -> Result<String, PricingError> {
    Ok(serde_json::to_string_pretty(inputs)?)
}

/// Field catalogue: wire name, unit and stock default.
pub fn render_fields() -> String {
    let mut out = String::new();
    for field in InputField::ALL {
        out.push_str(&format!(
            "{:<20}{:<8}{}\n",
            field.name(),
            field.unit(),
            field.default_value()
        ));
    }
    out
}
