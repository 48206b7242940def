//! Store configuration module.
//!
//! Where declarations are loaded from at startup and how large a
//! declaration file may be.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest accepted declaration file by default (16 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Declaration file loaded when the server starts
    pub data_file: Option<PathBuf>,

    /// Maximum size of a declaration file in bytes
    pub max_input_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "store.max_input_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "store.data_file cannot be an empty path".to_string(),
                ));
            }
        }

        Ok(())
    }
}
