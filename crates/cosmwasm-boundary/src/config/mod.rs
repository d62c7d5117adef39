// Boundary configuration: address scheme and resource limits for guest output

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::address::{DEFAULT_BECH32_PREFIX, DEFAULT_CANONICAL_LENGTH};

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    #[serde(default)]
    pub address: AddressConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressConfig {
    /// Bech32 human-readable prefix of chain-native addresses
    pub bech32_prefix: String,
    /// Length in bytes of a canonical address
    pub canonical_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest guest response accepted, in bytes
    pub max_response_bytes: usize,
    /// Most messages a single result may request
    pub max_messages: usize,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            bech32_prefix: DEFAULT_BECH32_PREFIX.to_string(),
            canonical_length: DEFAULT_CANONICAL_LENGTH,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: 1024 * 1024,
            max_messages: 64,
        }
    }
}

impl BoundaryConfig {
    /// Load configuration from TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: BoundaryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.bech32_prefix.is_empty() {
            return Err(ConfigError::Invalid("bech32_prefix must not be empty".to_string()));
        }
        if self.address.canonical_length == 0 {
            return Err(ConfigError::Invalid("canonical_length must be positive".to_string()));
        }
        if self.limits.max_response_bytes == 0 || self.limits.max_messages == 0 {
            return Err(ConfigError::Invalid("limits must be positive".to_string()));
        }
        Ok(())
    }
}
