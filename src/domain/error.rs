//! Error types for everything outside the pricing formulas.
//!
//! The formulas themselves never fail; these cover field lookup, the
//! key-value store, serialization and configuration.

/// Top-level error type for print3d-pricing.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("unknown input field: {name}")]
    UnknownField { name: String },

    #[error("invalid assignment '{raw}': expected FIELD=VALUE")]
    InvalidAssignment { raw: String },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("store query error: {reason}")]
    StoreQuery { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<&PricingError> for std::process::ExitCode {
    fn from(err: &PricingError) -> Self {
        let code: u8 = match err {
            PricingError::Io(_) => 1,
            PricingError::ConfigParse { .. }
            | PricingError::ConfigMissing { .. }
            | PricingError::ConfigInvalid { .. } => 2,
            PricingError::Store { .. } | PricingError::StoreQuery { .. } => 3,
            PricingError::Serialization { .. } => 4,
            PricingError::UnknownField { .. } | PricingError::InvalidAssignment { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
