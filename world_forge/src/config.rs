//! Forge configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::DEFAULT_REPUTATION_THRESHOLD;
use crate::error::{ForgeError, Result};

/// Tunables for turning a source document into a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Characters below this reputation may become the witness.
    pub witness_reputation_threshold: u8,

    /// How many locations the world keeps as key locations.
    pub max_key_locations: usize,

    /// How many characters the world keeps as key characters.
    pub max_key_characters: usize,

    /// Name used when the source document has none.
    pub default_world_name: String,

    /// Where the witness starts when the world has no locations.
    pub fallback_starting_location: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            witness_reputation_threshold: DEFAULT_REPUTATION_THRESHOLD,
            max_key_locations: 10,
            max_key_characters: 10,
            default_world_name: "Unknown World".to_string(),
            fallback_starting_location: "threshold".to_string(),
        }
    }
}

impl ForgeConfig {
    /// Parse a configuration; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ForgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.witness_reputation_threshold, 30);
        assert_eq!(config.max_key_locations, 10);
        assert_eq!(config.fallback_starting_location, "threshold");
    }

    #[test]
    fn test_partial_toml() {
        let config = ForgeConfig::from_toml_str(
            r#"
            witness_reputation_threshold = 45
            default_world_name = "Nowhere"
            "#,
        )
        .unwrap();

        assert_eq!(config.witness_reputation_threshold, 45);
        assert_eq!(config.default_world_name, "Nowhere");
        assert_eq!(config.max_key_characters, 10);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ForgeConfig::from_toml_str("max_key_locations = \"many\""),
            Err(ForgeError::Config(_))
        ));
    }
}
