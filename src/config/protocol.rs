//! Protocol configuration module.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Stdio protocol configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Maximum size of one command line in bytes
    pub max_line_bytes: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024, // 64 KiB
        }
    }
}

impl Validate for ProtocolConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_line_bytes == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "protocol.max_line_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
