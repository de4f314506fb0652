//! Paris processor driver.
//!
//! Runs the pipeline once per round:
//!
//! ```text
//! RoundInput
//!     ↓  config freeze (first wins), external manifests folded into the arena
//! RFinder::locate
//!     ↓
//! ModelBuilder::build  →  build_tree  →  emit_round
//!     ↓
//! RoundOutput  (files, manifest, diagnostics on the final round only)
//! ```
//!
//! The `Processor` is the per-process context: it owns the error aggregator,
//! the frozen config and the resolver, and outlives every round.

mod cli;
mod config;
mod filer;
mod processor;

use std::sync::Once;

pub use cli::{run, CliOptions, DriverError};
pub use config::ProcessorConfig;
pub use filer::{DirectoryFiler, Filer, FilerError};
pub use processor::{Processor, RoundContext, RoundOutput};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the processor.
///
/// Enable with `RUST_LOG=paris_model=debug` or `RUST_LOG=trace`. Does nothing
/// when `RUST_LOG` is unset; runs at most once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
