//! Pricing engine: pure formulas over the flat input record.

pub mod error;
pub mod number;
pub mod inputs;
pub mod costs;
pub mod pricing;
pub mod kpis;
pub mod quote;
