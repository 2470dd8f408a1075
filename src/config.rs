//! Configuration constants and utilities for seekline.

use std::path::PathBuf;

/// Default path of the remembered-identity state file.
pub const DEFAULT_STATE_PATH: &str = "~/.seekline/identity.json";

/// Environment variable name for overriding the state path.
pub const STATE_PATH_ENV_VAR: &str = "SEEKLINE_STATE_PATH";

/// Get the state file path: explicit override first, then environment
/// variable, then the default.
pub fn get_state_path(cli_override: Option<&str>) -> String {
    if let Some(path) = cli_override {
        return path.to_string();
    }
    std::env::var_os(STATE_PATH_ENV_VAR)
        .and_then(|value| value.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
}

/// Expand a leading tilde and return a concrete path.
pub fn resolve_state_path(cli_override: Option<&str>) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&get_state_path(cli_override)).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_path() {
        assert_eq!(DEFAULT_STATE_PATH, "~/.seekline/identity.json");
    }

    #[test]
    fn test_cli_override_wins() {
        assert_eq!(
            get_state_path(Some("/tmp/custom.json")),
            "/tmp/custom.json"
        );
    }

    #[test]
    fn test_env_var_override() {
        // Save current env var state
        let original = std::env::var_os(STATE_PATH_ENV_VAR);

        std::env::set_var(STATE_PATH_ENV_VAR, "/custom/state/path.json");
        assert_eq!(get_state_path(None), "/custom/state/path.json");

        // Restore original state
        match original {
            Some(value) => std::env::set_var(STATE_PATH_ENV_VAR, value),
            None => std::env::remove_var(STATE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn test_tilde_expansion() {
        let resolved = resolve_state_path(None);
        assert!(!resolved.to_string_lossy().starts_with('~'));
    }
}
