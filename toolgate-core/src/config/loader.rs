use super::error::ConfigError;
use super::gateway::GatewayConfig;
use crate::constants::ENV_PATH;
use dotenvy::from_filename;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Ensures environment variables are loaded from `.env` when one exists
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

impl GatewayConfig {
    /// Load and validate a gateway config from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading gateway configuration file");

        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let config: GatewayConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as 2-space indented JSON, failing if the file exists
    pub fn save_new(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let encoded = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    ConfigError::AlreadyExists {
                        path: path.to_path_buf(),
                    }
                } else {
                    ConfigError::Io {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
        file.write_all(encoded.as_bytes())
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Gateway configuration written");
        Ok(())
    }
}
