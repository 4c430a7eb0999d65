//! print3d-pricing — sale-price calculator for 3D-printed objects.
//!
//! Hexagonal layout: the pricing engine lives in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], and the command line
//! in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber. Call once, before anything logs.
///
/// Verbosity comes from `RUST_LOG`, defaulting to `warn`; output goes to
/// stderr so stdout stays clean for quotes and JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
