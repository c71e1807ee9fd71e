//! TOML configuration: database location and provider API keys.
//!
//! A commented default file is written on first run under the platform
//! config directory.

use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkflowConfig {
    pub database: DatabaseConfig,
    pub api_keys: Option<ApiKeysConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiKeysConfig {
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: get_default_db_path(),
            },
            api_keys: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            let default_db_path = get_default_db_path();
            let default_config = format!(
                r#"
[database]
path = "{}"

[api_keys]
# gemini_api_key = "your-gemini-key"
# groq_api_key = "your-groq-key"
"#,
                default_db_path.display()
            );
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let mut config: WorkflowConfig = builder.try_deserialize()?;

        // Expand tilde in database path
        if config.database.path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                let path_str = config.database.path.to_string_lossy();
                let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
                config.database.path = PathBuf::from(expanded);
            }
        }

        Ok((config, config_path))
    }
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("tenderflow/workflow.toml")
    } else {
        PathBuf::from("workflow.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("tenderflow/workflow.db")
    } else {
        PathBuf::from("workflow.db")
    }
}
