//! Binary persistence of `TransferConfig`
//!
//! The configuration is wrapped in a small header so stale or foreign data
//! in the storage slot is rejected instead of being misread.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use super::types::TransferConfig;

/// Magic number to identify stored transfer configuration
pub const CONFIG_MAGIC: u32 = 0x4C57_4346; // "LWCF"

/// Current stored format version
pub const CONFIG_VERSION: u8 = 1;

/// Buffer size that always fits a serialized configuration
pub const MAX_CONFIG_SIZE: usize = 64;

/// Config persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (usually buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Invalid magic or version
    InvalidFormat,
}

#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredConfig {
    magic: u32,
    version: u8,
    config: TransferConfig,
}

#[cfg(feature = "serde")]
impl TransferConfig {
    /// Serialize into `buffer`, returning the used prefix
    pub fn to_bytes<'b>(&self, buffer: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        let stored = StoredConfig {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config: *self,
        };
        postcard::to_slice(&stored, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize a configuration written by [`TransferConfig::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if stored.magic != CONFIG_MAGIC || stored.version != CONFIG_VERSION {
            return Err(ConfigError::InvalidFormat);
        }

        Ok(stored.config)
    }
}
