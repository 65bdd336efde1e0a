//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::config::CoreConfig;

/// Install a global fmt subscriber filtered per `config`.
///
/// Returns `false` if a global subscriber was already set; repeated calls
/// are harmless.
pub fn init_logging(config: &CoreConfig) -> bool {
    let directive = config.filter_directive();
    let (filter, rejected) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if let Some(e) = rejected {
        tracing::warn!("Invalid log filter {:?} ({}), falling back to info", directive, e);
    }
    if installed {
        tracing::info!("Logging initialized with filter {}", directive);
    }
    installed
}
