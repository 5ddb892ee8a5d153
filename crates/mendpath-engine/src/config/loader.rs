use super::policy::AttributesConfig;
use super::schema::MendpathConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Points at a user-defined attributes file, overriding the built-in policy.
pub const ATTRIBUTES_FILE_ENV: &str = "MENDPATH_ATTRIBUTES_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./mendpath.yaml
    /// 2. ~/.mendpath/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<MendpathConfig, ConfigError> {
        let local_config = PathBuf::from("./mendpath.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".mendpath").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(MendpathConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<MendpathConfig, ConfigError> {
        debug!("Loading config file '{}'", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: MendpathConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Attribute policy from `$MENDPATH_ATTRIBUTES_FILE`, or the built-in one.
    pub async fn load_attributes() -> Result<AttributesConfig, ConfigError> {
        match std::env::var_os(ATTRIBUTES_FILE_ENV) {
            Some(path) => Self::load_attributes_from(Path::new(&path)).await,
            None => {
                debug!("Using built-in attributes policy");
                Ok(AttributesConfig::default())
            }
        }
    }

    pub async fn load_attributes_from(path: &Path) -> Result<AttributesConfig, ConfigError> {
        debug!("Loading user-defined attributes file '{}'", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: AttributesConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
