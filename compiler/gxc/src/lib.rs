//! Galaxy interpreter driver.
//!
//! Library half of the `gx` binary: command implementations, the stdio
//! transport and diagnostic rendering live here so integration tests can
//! call them without spawning a process.

use std::sync::Once;

pub mod commands;
pub mod render;
pub mod report;
pub mod transport;

pub use commands::CommandError;
pub use transport::StdioTransport;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`, once per process.
///
/// Does nothing when `RUST_LOG` is unset. Output is a span tree on stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
