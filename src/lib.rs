//! # tracelen
//!
//! Command-line front end for path-length extraction from 2D polygon
//! layouts. The measurement pipeline itself lives in `tracelen-core`; this
//! crate handles run configuration, layout snapshot loading, logging setup,
//! and report output.

pub mod config;

pub use config::{LayerConfig, RunConfig};
pub use tracelen_core::{
    measure_path_lengths, Layout, MeasureError, MeasureParams, PathReport, PathRow,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, pretty formatting, and
/// RUST_LOG environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
