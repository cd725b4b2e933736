//! Infrastructure layer: configuration loading and process bootstrap.

pub mod config;

pub use config::{ConfigError, Settings};

/// Install tracing according to `settings`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn bootstrap(settings: &Settings) {
    let installed = tally_observability::init_with(&settings.log);
    tracing::info!(
        filter = %settings.log.filter,
        format = ?settings.log.format,
        installed,
        "observability initialized"
    );
}
