//! Witness selection - finding the powerless observer the player embodies.

use serde::{Deserialize, Serialize};

use super::{contains_any, ScoredCharacter};
use crate::entities::ElementId;
use crate::mechanics::{Perspective, WitnessSize};

/// Characters at or above this reputation are only eligible as observers.
pub const DEFAULT_REPUTATION_THRESHOLD: u8 = 30;

const OBSERVER_KEYWORDS: &[&str] = &[
    "scribe",
    "child",
    "servant",
    "apprentice",
    "student",
    "watcher",
    "recorder",
    "witness",
];

const FALLBACK_NAME: &str = "The Chronicler";
const FALLBACK_DESCRIPTION: &str = "A forgotten scribe, shrunk by knowledge itself";
const FALLBACK_TRAITS: [&str; 3] = ["observant", "burdened", "persistent"];
const FALLBACK_REASON: &str = "Created to observe what others cannot see";

/// The character (or synthesized stand-in) the player will embody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessCandidate {
    /// `None` for the synthesized fallback.
    pub character_id: Option<ElementId>,
    pub name: String,
    pub description: String,
    pub traits: Vec<String>,
    /// Explanations only; never consulted during selection.
    pub suitability_reasons: Vec<String>,
    pub size: WitnessSize,
    pub perspective: Perspective,
}

impl WitnessCandidate {
    /// The fixed witness used when no character qualifies.
    pub fn chronicler() -> Self {
        let text = format!(
            "{} {} {}",
            FALLBACK_NAME,
            FALLBACK_DESCRIPTION,
            FALLBACK_TRAITS.join(" ")
        )
        .to_lowercase();
        let size = size_for(&text);

        Self {
            character_id: None,
            name: FALLBACK_NAME.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            traits: FALLBACK_TRAITS.iter().map(|t| t.to_string()).collect(),
            suitability_reasons: vec![FALLBACK_REASON.to_string()],
            size,
            perspective: perspective_for(&text, size),
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.character_id.is_none()
    }
}

/// Picks or synthesizes the player's low-power avatar.
pub struct WitnessSelector {
    reputation_threshold: u8,
}

impl WitnessSelector {
    pub fn new(reputation_threshold: u8) -> Self {
        Self {
            reputation_threshold,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_REPUTATION_THRESHOLD)
    }

    /// Check if a character can serve as witness.
    pub fn is_eligible(&self, scored: &ScoredCharacter<'_>) -> bool {
        scored.character.reputation < self.reputation_threshold
            || contains_any(&scored.character.full_text(), OBSERVER_KEYWORDS)
    }

    /// Select the eligible character with the lowest reputation.
    ///
    /// Ties go to the character extracted first. With no eligible character
    /// the fixed [`WitnessCandidate::chronicler`] is returned.
    pub fn select(&self, characters: &[ScoredCharacter<'_>]) -> WitnessCandidate {
        characters
            .iter()
            .filter(|scored| self.is_eligible(scored))
            .min_by_key(|scored| scored.character.reputation)
            .map(|scored| self.describe(scored))
            .unwrap_or_else(WitnessCandidate::chronicler)
    }

    fn describe(&self, scored: &ScoredCharacter<'_>) -> WitnessCandidate {
        let character = scored.character;
        let text = character.full_text();
        let size = size_for(&text);

        WitnessCandidate {
            character_id: Some(character.id()),
            name: character.name().to_string(),
            description: character.element.description.clone(),
            traits: character.traits.iter().cloned().collect(),
            suitability_reasons: self.reasons(scored, &text),
            size,
            perspective: perspective_for(&text, size),
        }
    }

    /// Each rule contributes its own reason independently.
    fn reasons(&self, scored: &ScoredCharacter<'_>, text: &str) -> Vec<String> {
        let mut reasons = Vec::new();

        if scored.character.reputation < self.reputation_threshold {
            reasons.push("Low reputation means ignored by powerful".to_string());
        }
        if text.contains("child") {
            reasons.push("Children see what adults ignore".to_string());
        }
        if text.contains("scribe") {
            reasons.push("Natural observer and recorder".to_string());
        }
        if scored.power <= 2 {
            reasons.push(format!(
                "A power of {} leaves them beneath notice",
                scored.power
            ));
        }
        if !scored.character.has_abilities() {
            reasons.push("No special powers means must rely on observation".to_string());
        }

        if reasons.is_empty() {
            reasons.push("Overlooked by those in power".to_string());
        }
        reasons
    }
}

impl Default for WitnessSelector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn size_for(text: &str) -> WitnessSize {
    if text.contains("insect") {
        WitnessSize::Scarab
    } else if text.contains("child") {
        WitnessSize::Thumb
    } else {
        WitnessSize::Mite
    }
}

fn perspective_for(text: &str, size: WitnessSize) -> Perspective {
    if text.contains("scribe") {
        Perspective::BetweenWords
    } else if size == WitnessSize::Mite {
        Perspective::InsideWalls
    } else {
        Perspective::GroundLevel
    }
}
