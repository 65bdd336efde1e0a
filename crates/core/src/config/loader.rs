//! Config path resolution
//!
//! Handles resolving paths for configuration files.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable that overrides the base directory
pub const HOME_ENV: &str = "RECSCHEMA_HOME";

/// Returns the recschema base directory.
///
/// `$RECSCHEMA_HOME` when set and non-empty, otherwise the current working
/// directory.
pub fn recschema_base_dir() -> ConfigResult<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir().map_err(|_| ConfigError::NoConfigDirectory),
    }
}

/// Returns the base configs directory.
///
/// Path: `{base}/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    Ok(recschema_base_dir()?.join("configs"))
}

/// Returns the core config path.
///
/// Path: `{base}/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join("core.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_path_format() {
        // Whatever the base resolves to, the suffix is fixed
        let path = core_config_path().unwrap();
        assert!(path.ends_with("configs/core.toml"));
    }
}
