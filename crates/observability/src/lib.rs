//! Tracing/logging setup shared by every process that embeds the ledger or
//! the pricer.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};

/// Initialize process-wide tracing with defaults (`RUST_LOG`, JSON output).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    crate::tracing::init();
}

/// Initialize process-wide tracing from an explicit configuration.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(config: &LogConfig) -> bool {
    crate::tracing::init_with(config)
}
