//! Operator Settings
//!
//! Render settings shared by every operator of a graph instance. Settings
//! can be written by hand or loaded from JSON.

use serde::{Deserialize, Serialize};

fn default_sample_rate() -> f32 {
    48_000.0
}

fn default_block_size() -> usize {
    256
}

/// Settings an operator is created and reset with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSettings {
    /// Audio sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f32,
    /// Frames rendered per execute call.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

impl OperatorSettings {
    /// Parse settings from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
        }
    }
}
