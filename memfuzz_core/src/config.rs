use crate::error::MemFuzzResult;
use crate::width::{Width, WidthDistribution};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Byte order used to store multi-byte values in the buffer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    /// little-endian, the same result on every host
    Little,
    /// big-endian, network order
    Big,
    /// whatever the host uses, like a plain pointer store would
    Native,
}

impl ByteOrder {
    /// Stores the low `width.size()` bytes of `bits` into `dst`.
    pub(crate) fn store(self, dst: &mut [u8], width: Width, bits: u64) {
        let size = width.size();
        let big = match self {
            ByteOrder::Little => false,
            ByteOrder::Big => true,
            ByteOrder::Native => cfg!(target_endian = "big"),
        };
        if big {
            dst[..size].copy_from_slice(&bits.to_be_bytes()[8 - size..]);
        } else {
            dst[..size].copy_from_slice(&bits.to_le_bytes()[..size]);
        }
    }
}

/// Settings of the mutation engine. Every field has a default so a config file only has to name
/// what it changes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzConfig {
    /// How the width of each mutation is chosen
    pub distribution: WidthDistribution,
    /// How multi-byte values are laid out in the buffer
    pub byte_order: ByteOrder,
}

impl FuzzConfig {
    /// Loads the config from a JSON file.
    /// # Errors
    /// If the file cannot be read or is not a valid config.
    pub fn load(path: &Path) -> MemFuzzResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
