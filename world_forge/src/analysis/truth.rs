//! Hidden truth synthesis - the single secret a world keeps.

use super::contains_any;
use crate::entities::Element;

const REVEALING_KEYWORDS: &[&str] = &["secret", "hidden", "truth", "real", "actually"];

/// Worlds with more characters than this hide impostors.
pub const CROWDED_WORLD: usize = 50;

/// Worlds with more conflicts than this are being steered.
pub const ORCHESTRATED_CONFLICTS: usize = 10;

/// What a hidden-truth rule can look at.
#[derive(Debug, Clone, Copy)]
pub struct TruthEvidence<'a> {
    pub narratives: &'a [Element],
    pub character_count: usize,
    pub conflict_count: usize,
}

/// A named rule that may produce the hidden truth.
pub struct TruthRule {
    pub name: &'static str,
    pub apply: fn(&TruthEvidence<'_>) -> Option<String>,
}

/// Rules in strict priority order; the last always applies.
pub const TRUTH_RULES: &[TruthRule] = &[
    TruthRule {
        name: "revealing_narrative",
        apply: revealing_narrative,
    },
    TruthRule {
        name: "crowded_world",
        apply: crowded_world,
    },
    TruthRule {
        name: "orchestrated_conflicts",
        apply: orchestrated_conflicts,
    },
    TruthRule {
        name: "ending_world",
        apply: ending_world,
    },
];

fn revealing_narrative(evidence: &TruthEvidence<'_>) -> Option<String> {
    evidence
        .narratives
        .iter()
        .find(|n| contains_any(&n.description_text(), REVEALING_KEYWORDS))
        .map(|n| format!("The truth about {}", n.name))
}

fn crowded_world(evidence: &TruthEvidence<'_>) -> Option<String> {
    (evidence.character_count > CROWDED_WORLD).then(|| "Not everyone here is real".to_string())
}

fn orchestrated_conflicts(evidence: &TruthEvidence<'_>) -> Option<String> {
    (evidence.conflict_count > ORCHESTRATED_CONFLICTS)
        .then(|| "The conflicts are orchestrated".to_string())
}

fn ending_world(_: &TruthEvidence<'_>) -> Option<String> {
    Some(ENDING_WORLD.to_string())
}

const ENDING_WORLD: &str = "This world is already ending";

pub struct HiddenTruthSynthesizer;

impl HiddenTruthSynthesizer {
    /// Apply the rules in order; the first that produces a truth wins.
    pub fn synthesize(evidence: &TruthEvidence<'_>) -> String {
        TRUTH_RULES
            .iter()
            .find_map(|rule| (rule.apply)(evidence))
            .unwrap_or_else(|| ENDING_WORLD.to_string())
    }

    /// Name of the rule that decided the truth.
    pub fn deciding_rule(evidence: &TruthEvidence<'_>) -> &'static str {
        TRUTH_RULES
            .iter()
            .find(|rule| (rule.apply)(evidence).is_some())
            .map(|rule| rule.name)
            .unwrap_or("ending_world")
    }
}
