use anyhow::{Context, Result};
use std::path::PathBuf;

const CONFIG_FILE: &str = ".storefront.toml";
const APP_NAME: &str = "storefront";

/// Load config file content
///
/// Searches for the config in:
/// 1. Current working directory as .storefront.toml
/// 2. Platform config directory as storefront/config.toml
/// 3. Home directory as .storefront.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    for path in candidate_paths() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some(content);
        }
    }

    None
}

/// Path of the config file that would be loaded, if any exists
pub fn config_file_path() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|p| p.is_file())
}

/// Read a config file from an explicit path
pub fn read_config_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_NAME).join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwd_is_searched_first() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let err = read_config_file(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
