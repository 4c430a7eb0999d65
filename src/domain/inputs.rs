//! The flat input record and its field catalogue.

use super::error::PricingError;
use super::number::{RawValue, deserialize_lenient, to_number_safe};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every user-editable input. All values are already coerced to finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInputs {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub filament_price_per_kg: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub grams_used: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub waste_pct: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub paint_cost: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub primer_cost: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub varnish_cost: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub other_materials: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub packaging: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub watts: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub print_hours: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub kwh_tariff: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub labor_hours: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub hourly_rate: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub market_pct: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub market_fixed: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub client_discount_pct: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub profit_factor: f64,
}

impl PricingInputs {
    /// The stock record used on first run: FDM printing, prices in BRL.
    pub fn defaults() -> Self {
        let mut inputs = Self::default();
        for field in InputField::ALL {
            inputs.set(field, field.default_value());
        }
        inputs
    }

    /// Build a record from a name → value mapping. Unnamed fields stay `0`.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = (&'a str, RawValue)>,
    {
        let mut inputs = Self::default();
        for (name, raw) in fields {
            let field: InputField = name.parse()?;
            inputs.set(field, raw);
        }
        Ok(inputs)
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::FilamentPricePerKg => self.filament_price_per_kg,
            InputField::GramsUsed => self.grams_used,
            InputField::WastePct => self.waste_pct,
            InputField::PaintCost => self.paint_cost,
            InputField::PrimerCost => self.primer_cost,
            InputField::VarnishCost => self.varnish_cost,
            InputField::OtherMaterials => self.other_materials,
            InputField::Packaging => self.packaging,
            InputField::Watts => self.watts,
            InputField::PrintHours => self.print_hours,
            InputField::KwhTariff => self.kwh_tariff,
            InputField::LaborHours => self.labor_hours,
            InputField::HourlyRate => self.hourly_rate,
            InputField::MarketPct => self.market_pct,
            InputField::MarketFixed => self.market_fixed,
            InputField::ClientDiscountPct => self.client_discount_pct,
            InputField::ProfitFactor => self.profit_factor,
        }
    }

    /// Coerce `raw` and store it in `field`.
    pub fn set(&mut self, field: InputField, raw: impl Into<RawValue>) {
        let value = to_number_safe(raw);
        let slot = match field {
            InputField::FilamentPricePerKg => &mut self.filament_price_per_kg,
            InputField::GramsUsed => &mut self.grams_used,
            InputField::WastePct => &mut self.waste_pct,
            InputField::PaintCost => &mut self.paint_cost,
            InputField::PrimerCost => &mut self.primer_cost,
            InputField::VarnishCost => &mut self.varnish_cost,
            InputField::OtherMaterials => &mut self.other_materials,
            InputField::Packaging => &mut self.packaging,
            InputField::Watts => &mut self.watts,
            InputField::PrintHours => &mut self.print_hours,
            InputField::KwhTariff => &mut self.kwh_tariff,
            InputField::LaborHours => &mut self.labor_hours,
            InputField::HourlyRate => &mut self.hourly_rate,
            InputField::MarketPct => &mut self.market_pct,
            InputField::MarketFixed => &mut self.market_fixed,
            InputField::ClientDiscountPct => &mut self.client_discount_pct,
            InputField::ProfitFactor => &mut self.profit_factor,
        };
        *slot = value;
    }
}

/// Names one field of [`PricingInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputField {
    FilamentPricePerKg,
    GramsUsed,
    WastePct,
    PaintCost,
    PrimerCost,
    VarnishCost,
    OtherMaterials,
    Packaging,
    Watts,
    PrintHours,
    KwhTariff,
    LaborHours,
    HourlyRate,
    MarketPct,
    MarketFixed,
    ClientDiscountPct,
    ProfitFactor,
}

impl InputField {
    pub const ALL: [InputField; 17] = [
        InputField::FilamentPricePerKg,
        InputField::GramsUsed,
        InputField::WastePct,
        InputField::PaintCost,
        InputField::PrimerCost,
        InputField::VarnishCost,
        InputField::OtherMaterials,
        InputField::Packaging,
        InputField::Watts,
        InputField::PrintHours,
        InputField::KwhTariff,
        InputField::LaborHours,
        InputField::HourlyRate,
        InputField::MarketPct,
        InputField::MarketFixed,
        InputField::ClientDiscountPct,
        InputField::ProfitFactor,
    ];

    /// Wire name, as used in stored records and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            InputField::FilamentPricePerKg => "filamentPricePerKg",
            InputField::GramsUsed => "gramsUsed",
            InputField::WastePct => "wastePct",
            InputField::PaintCost => "paintCost",
            InputField::PrimerCost => "primerCost",
            InputField::VarnishCost => "varnishCost",
            InputField::OtherMaterials => "otherMaterials",
            InputField::Packaging => "packaging",
            InputField::Watts => "watts",
            InputField::PrintHours => "printHours",
            InputField::KwhTariff => "kwhTariff",
            InputField::LaborHours => "laborHours",
            InputField::HourlyRate => "hourlyRate",
            InputField::MarketPct => "marketPct",
            InputField::MarketFixed => "marketFixed",
            InputField::ClientDiscountPct => "clientDiscountPct",
            InputField::ProfitFactor => "profitFactor",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            InputField::FilamentPricePerKg => "R$/kg",
            InputField::GramsUsed => "g",
            InputField::WastePct | InputField::MarketPct | InputField::ClientDiscountPct => "%",
            InputField::PaintCost
            | InputField::PrimerCost
            | InputField::VarnishCost
            | InputField::OtherMaterials
            | InputField::Packaging
            | InputField::MarketFixed => "R$",
            InputField::Watts => "W",
            InputField::PrintHours | InputField::LaborHours => "h",
            InputField::KwhTariff => "R$/kWh",
            InputField::HourlyRate => "R$/h",
            InputField::ProfitFactor => "x",
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            InputField::FilamentPricePerKg => 70.0,
            InputField::GramsUsed => 200.0,
            InputField::WastePct => 10.0,
            InputField::PaintCost => 5.0,
            InputField::PrimerCost => 3.0,
            InputField::VarnishCost => 2.0,
            InputField::OtherMaterials => 0.0,
            InputField::Packaging => 3.5,
            InputField::Watts => 150.0,
            InputField::PrintHours => 10.0,
            InputField::KwhTariff => 0.85,
            InputField::LaborHours => 2.0,
            InputField::HourlyRate => 20.0,
            InputField::MarketPct => 12.5,
            InputField::MarketFixed => 4.0,
            InputField::ClientDiscountPct => 0.0,
            InputField::ProfitFactor => 2.0,
        }
    }

    fn snake_case(self) -> String {
        let mut out = String::new();
        for c in self.name().chars() {
            if c.is_ascii_uppercase() {
                out.push('_');
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputField {
    type Err = PricingError;

    /// Accepts the wire name (`gramsUsed`) or its snake_case form (`grams_used`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InputField::ALL
            .into_iter()
            .find(|f| f.name() == wanted || f.snake_case() == wanted)
            .ok_or_else(|| PricingError::UnknownField {
                name: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_values() {
        let d = PricingInputs::defaults();
        assert_eq!(d.filament_price_per_kg, 70.0);
        assert_eq!(d.grams_used, 200.0);
        assert_eq!(d.waste_pct, 10.0);
        assert_eq!(d.packaging, 3.5);
        assert_eq!(d.kwh_tariff, 0.85);
        assert_eq!(d.market_pct, 12.5);
        assert_eq!(d.market_fixed, 4.0);
        assert_eq!(d.client_discount_pct, 0.0);
        assert_eq!(d.profit_factor, 2.0);
    }

    #[test]
    fn get_and_set_cover_every_field() {
        let mut inputs = PricingInputs::default();
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            inputs.set(field, i as f64 + 1.0);
        }
        for (i, field) in InputField::ALL.into_iter().enumerate() {
            assert_eq!(inputs.get(field), i as f64 + 1.0, "field {field}");
        }
    }

    #[test]
    fn set_coerces_text() {
        let mut inputs = PricingInputs::defaults();
        inputs.set(InputField::GramsUsed, "250,5");
        assert_eq!(inputs.grams_used, 250.5);
        inputs.set(InputField::GramsUsed, "oops");
        assert_eq!(inputs.grams_used, 0.0);
        inputs.set(InputField::GramsUsed, "");
        assert_eq!(inputs.grams_used, 0.0);
    }

    #[test]
    fn field_names_parse_both_spellings() {
        assert_eq!("gramsUsed".parse::<InputField>().unwrap(), InputField::GramsUsed);
        assert_eq!("grams_used".parse::<InputField>().unwrap(), InputField::GramsUsed);
        assert_eq!(
            "client_discount_pct".parse::<InputField>().unwrap(),
            InputField::ClientDiscountPct
        );
        assert!(matches!(
            "grams".parse::<InputField>(),
            Err(PricingError::UnknownField { name }) if name == "grams"
        ));
    }

    #[test]
    fn from_fields_zeroes_unnamed() {
        let inputs = PricingInputs::from_fields([
            ("gramsUsed", RawValue::from("12,5")),
            ("watts", RawValue::Number(150.0)),
            ("paintCost", RawValue::Missing),
        ])
        .unwrap();
        assert_eq!(inputs.grams_used, 12.5);
        assert_eq!(inputs.watts, 150.0);
        assert_eq!(inputs.paint_cost, 0.0);
        assert_eq!(inputs.filament_price_per_kg, 0.0);
    }

    #[test]
    fn from_fields_rejects_unknown_names() {
        let err = PricingInputs::from_fields([("color", RawValue::Number(1.0))]).unwrap_err();
        assert!(matches!(err, PricingError::UnknownField { .. }));
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(PricingInputs::defaults()).unwrap();
        for field in InputField::ALL {
            assert_eq!(json[field.name()], field.default_value(), "field {field}");
        }
    }

    #[test]
    fn deserialize_is_lenient() {
        let json = r#"{
            "filamentPricePerKg": "80,5",
            "gramsUsed": "",
            "wastePct": null,
            "watts": 200,
            "color": "red"
        }"#;
        let inputs: PricingInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.filament_price_per_kg, 80.5);
        assert_eq!(inputs.grams_used, 0.0);
        assert_eq!(inputs.waste_pct, 0.0);
        assert_eq!(inputs.watts, 200.0);
        assert_eq!(inputs.profit_factor, 0.0);
    }

    #[test]
    fn one_malformed_field_does_not_spoil_the_record() {
        let json = r#"{"gramsUsed": 999, "watts": {"x": 1}, "printHours": [3], "laborHours": true}"#;
        let inputs: PricingInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.grams_used, 999.0);
        assert_eq!(inputs.watts, 0.0);
        assert_eq!(inputs.print_hours, 0.0);
        assert_eq!(inputs.labor_hours, 0.0);
    }

    #[test]
    fn serialization_round_trips() {
        let mut inputs = PricingInputs::defaults();
        inputs.set(InputField::KwhTariff, 0.1 + 0.2);
        inputs.set(InputField::WastePct, -5.0);
        let json = serde_json::to_string(&inputs).unwrap();
        let back: PricingInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inputs);
    }
}
