//! Night configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SessionError};

/// Tunables for how fast a playthrough decays and how heavy knowledge is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightConfig {
    pub entropy_per_night: f64,
    pub text_decay_per_night: f64,
    pub color_loss_per_night: f64,

    /// Integrity lost by the current location each night. Color fades at
    /// half this rate and clarity at three tenths.
    pub location_decay: f64,

    /// Strength every unbroken treaty loses each night.
    pub treaty_decay: f64,

    /// Condition every key object loses each night.
    pub object_decay: f64,

    /// `k` in `speed = 1 / (1 + total_weight * k)`.
    pub weight_coefficient: f64,

    /// Content of the weightless whisper every session starts with.
    pub first_whisper: String,

    /// Memory a character loses when a conversation ends.
    pub conversation_memory_loss: f64,

    /// Floor for conversation clarity and coherence.
    pub min_clarity: f64,

    /// How many recent knowledge items a dialogue prompt carries.
    pub dialogue_knowledge_limit: usize,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            entropy_per_night: 0.01,
            text_decay_per_night: 0.02,
            color_loss_per_night: 0.015,
            location_decay: 0.01,
            treaty_decay: 0.03,
            object_decay: 0.02,
            weight_coefficient: 0.1,
            first_whisper: "The night has no intention of ending".to_string(),
            conversation_memory_loss: 0.02,
            min_clarity: 0.1,
            dialogue_knowledge_limit: 5,
        }
    }
}

impl NightConfig {
    /// Parse a configuration; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
