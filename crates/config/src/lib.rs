pub mod schema;
pub mod settings;
pub mod watcher;

pub use schema::{BarWidth, PowerbarConfig, ThemeConfig};
pub use settings::{definitions, Placement, SegmentOption, SettingDefinition, Settings};
pub use watcher::ConfigWatcher;

use powerbar_core::{PowerbarError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `PowerbarConfig::default()`
/// if the file doesn't exist so the bar always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<PowerbarConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(PowerbarConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| PowerbarError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| PowerbarError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("powerbar").join("powerbar.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.left, schema::DEFAULT_LEFT);
    }

    #[test]
    fn loads_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerbar.toml");
        std::fs::write(
            &path,
            "left = \"model\"\nright = \"tokens, git-branch\"\nseparator = \" · \"\nbar-width = 30\n",
        )
        .unwrap();

        let settings = Settings::from_config(&load(&path).unwrap());
        assert_eq!(settings.left, vec!["model"]);
        assert_eq!(settings.right, vec!["tokens", "git-branch"]);
        assert_eq!(settings.separator, " · ");
        assert_eq!(settings.bar_width, settings::MAX_BAR_WIDTH);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("powerbar.toml");
        std::fs::write(&path, "left = [unterminated").unwrap();

        assert!(matches!(load(&path), Err(PowerbarError::Config(_))));
    }
}
