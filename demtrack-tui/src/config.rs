//! Configuration loading for the Demtrack TUI.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use demtrack_core::RecordId;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    /// Proprietário pre-selected at startup. Without it the app starts on the
    /// Proprietários view and waits for a selection.
    pub proprietario_id: Option<RecordId>,
    pub request_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    pub page_size: u32,
    pub persistence_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or DEMTRACK_TUI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be between 1 and 100".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "claro" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'claro' is supported".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("DEMTRACK_TUI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_toml() -> String {
        r#"
api_base_url = "http://localhost:3333"
proprietario_id = 1
request_timeout_ms = 5000
refresh_interval_ms = 30000
page_size = 25
persistence_path = "/tmp/demtrack-tui-state.json"

[theme]
name = "claro"
"#
        .to_string()
    }

    #[test]
    fn parses_and_validates_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(valid_toml().as_bytes()).unwrap();

        let config = TuiConfig::from_path(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert_eq!(config.proprietario_id, Some(1));
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn proprietario_id_is_optional() {
        let toml = valid_toml().replace("proprietario_id = 1\n", "");
        let config: TuiConfig = toml::from_str(&toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.proprietario_id, None);
    }

    #[test]
    fn rejects_unknown_fields() {
        let toml = format!("{}\nextra_field = true\n", valid_toml());
        assert!(toml::from_str::<TuiConfig>(&toml).is_err());
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let toml = valid_toml().replace("page_size = 25", "page_size = 101");
        let config: TuiConfig = toml::from_str(&toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "page_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unsupported_theme() {
        let toml = valid_toml().replace("name = \"claro\"", "name = \"escuro\"");
        let config: TuiConfig = toml::from_str(&toml).unwrap();
        assert!(config.validate().is_err());
    }
}
