//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(data_folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(data_folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    let fallback = default_data_folder();
    tracing::debug!("No data folder configured, using default: {}", fallback.display());
    Ok(fallback)
}

/// Get default configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let config_path = if cfg!(target_os = "linux") {
        // Try ~/.config/bondtrack/config.toml first, then /etc/bondtrack/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("bondtrack").join("config.toml"));
        let system_config = PathBuf::from("/etc/bondtrack/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    } else {
        dirs::config_dir()
            .map(|d| d.join("bondtrack").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?
    };

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", config_path)))
    }
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/bondtrack (or /var/lib/bondtrack for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("bondtrack"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/bondtrack"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("bondtrack"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/bondtrack"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("bondtrack"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\bondtrack"))
    } else {
        PathBuf::from("./bondtrack_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_arg_takes_priority() {
        let resolved =
            resolve_data_folder(Some("/tmp/bt-cli"), "BONDTRACK_TEST_UNSET_VAR").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/bt-cli"));
    }

    #[test]
    fn test_env_var_used_when_no_cli_arg() {
        std::env::set_var("BONDTRACK_TEST_DATA_VAR", "/tmp/bt-env");
        let resolved = resolve_data_folder(None, "BONDTRACK_TEST_DATA_VAR").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/bt-env"));
        std::env::remove_var("BONDTRACK_TEST_DATA_VAR");
    }

    #[test]
    fn test_fallback_resolves_to_some_path() {
        let resolved = resolve_data_folder(None, "BONDTRACK_TEST_UNSET_VAR_2").unwrap();
        assert!(!resolved.as_os_str().is_empty());
    }
}
