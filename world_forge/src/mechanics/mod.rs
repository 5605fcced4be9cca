//! World mechanics: resource classes, witness shapes, conflict kinds, scales.

use serde::{Deserialize, Serialize};

use crate::analysis::{KeywordTable, KeywordTier};

/// The three classes every piece of knowledge or object falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Decays over time (whispers, rumors, secrets).
    Ephemeral,
    /// Permanent but dangerous (marks, scars).
    Physical,
    /// Changes reality (oaths, contracts).
    Binding,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Ephemeral,
        ResourceType::Physical,
        ResourceType::Binding,
    ];
}

/// How small the witness is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WitnessSize {
    Thumb,
    Scarab,
    Mite,
    Dust,
}

/// Where the witness sees the world from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    GroundLevel,
    InsideWalls,
    BetweenWords,
}

/// Where a conflict was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// A hostile relation between elements.
    Direct,
    /// A narrative describing a struggle.
    Narrative,
}

/// Spatial scale of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationScale {
    Microscopic,
    Small,
    #[default]
    Human,
    Large,
    Vast,
}

impl LocationScale {
    /// Determine the scale of a location from its description.
    pub fn from_description(description: &str) -> Self {
        SCALE_TIERS.classify(description)
    }
}

const SCALE_TIERS: KeywordTable<LocationScale> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["vast", "endless", "infinite"],
            result: LocationScale::Vast,
        },
        KeywordTier {
            keywords: &["large", "grand", "massive"],
            result: LocationScale::Large,
        },
        KeywordTier {
            keywords: &["small", "tiny", "cramped"],
            result: LocationScale::Small,
        },
        KeywordTier {
            keywords: &["microscopic", "minuscule"],
            result: LocationScale::Microscopic,
        },
    ],
    LocationScale::Human,
);
