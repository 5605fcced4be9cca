//! Power analysis: who has agency in this world.

use serde::{Deserialize, Serialize};

use super::{KeywordTable, KeywordTier};
use crate::entities::{CharacterElement, ElementId};

/// Score given when no keyword tier matches.
pub const DEFAULT_POWER: u8 = 5;

const POWER_TIERS: KeywordTable<u8> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["ruler", "king", "queen", "lord", "master"],
            result: 8,
        },
        KeywordTier {
            keywords: &["knight", "warrior", "captain", "leader"],
            result: 6,
        },
        KeywordTier {
            keywords: &["merchant", "craftsman", "citizen"],
            result: 4,
        },
        KeywordTier {
            keywords: &["servant", "slave", "prisoner"],
            result: 2,
        },
        KeywordTier {
            keywords: &["child", "orphan", "beggar"],
            result: 1,
        },
    ],
    DEFAULT_POWER,
);

/// A character paired with its power score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCharacter<'a> {
    pub character: &'a CharacterElement,
    /// Agency from 0 (powerless) to 10.
    pub power: u8,
}

/// Characters bucketed by their standing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStructure {
    pub rulers: Vec<String>,
    pub enforcers: Vec<String>,
    pub influencers: Vec<String>,
    pub powerless: Vec<String>,
}

/// Scores a character's power and agency from keywords.
pub struct PowerAnalyzer;

impl PowerAnalyzer {
    /// Score a character from its description and traits, 0-10.
    pub fn score(character: &CharacterElement) -> u8 {
        POWER_TIERS.classify(&character.profile_text())
    }

    /// Score every character, preserving extraction order.
    pub fn score_all(characters: &[CharacterElement]) -> Vec<ScoredCharacter<'_>> {
        characters
            .iter()
            .map(|character| ScoredCharacter {
                character,
                power: Self::score(character),
            })
            .collect()
    }

    /// Bucket characters into rulers, enforcers, influencers and the powerless.
    pub fn structure(characters: &[CharacterElement]) -> PowerStructure {
        let mut structure = PowerStructure::default();

        for character in characters {
            let traits = character
                .traits
                .iter()
                .map(|t| t.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            let name = character.name().to_string();

            if character.reputation > 80 || traits.contains("ruler") {
                structure.rulers.push(name);
            } else if character.reputation > 50 || traits.contains("warrior") {
                structure.enforcers.push(name);
            } else if character.reputation > 20 {
                structure.influencers.push(name);
            } else {
                structure.powerless.push(name);
            }
        }

        structure
    }
}

/// Power score per character id, in extraction order.
pub fn power_scores(scored: &[ScoredCharacter<'_>]) -> Vec<(ElementId, u8)> {
    scored.iter().map(|s| (s.character.id(), s.power)).collect()
}
