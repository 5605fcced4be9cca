//! Degradation patterns - the five-stage entropy curve of a world.

use serde::{Deserialize, Serialize};

use crate::entities::Element;

/// Every pattern has exactly this many stages.
pub const STAGE_COUNT: usize = 5;

pub const DEFAULT_SPEED: f64 = 1.0;
pub const DEFAULT_ENTROPY_RATE: f64 = 0.01;

/// A themed stage sequence. Templates replace the default stages wholesale;
/// speed and entropy rate are the same for every theme.
#[derive(Debug, Clone, Copy)]
pub struct DegradationTemplate {
    pub theme: &'static str,
    pub stages: [&'static str; STAGE_COUNT],
}

const DEFAULT_TEMPLATE: DegradationTemplate = DegradationTemplate {
    theme: "default",
    stages: ["color", "sound", "meaning", "memory", "hope"],
};

/// Themed templates in priority order; the first theme found in any
/// location or narrative wins.
const THEMED_TEMPLATES: &[DegradationTemplate] = &[
    DegradationTemplate {
        theme: "desert",
        stages: ["moisture", "form", "identity", "purpose", "sand"],
    },
    DegradationTemplate {
        theme: "war",
        stages: ["peace", "order", "humanity", "meaning", "silence"],
    },
];

/// How a world falls apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationPattern {
    pub stages: [String; STAGE_COUNT],
    /// Only ever moves forward.
    pub current_stage_index: usize,
    pub speed: f64,
    pub entropy_rate: f64,
}

impl DegradationPattern {
    fn from_template(template: &DegradationTemplate) -> Self {
        Self {
            stages: template.stages.map(str::to_string),
            current_stage_index: 0,
            speed: DEFAULT_SPEED,
            entropy_rate: DEFAULT_ENTROPY_RATE,
        }
    }

    /// Name of the active stage.
    pub fn current_stage(&self) -> &str {
        &self.stages[self.current_stage_index.min(STAGE_COUNT - 1)]
    }

    /// Stage index a given world entropy has reached: one stage per fifth.
    pub fn stage_for_entropy(entropy: f64) -> usize {
        let fifths = (entropy.clamp(0.0, 1.0) * STAGE_COUNT as f64 + 1e-9).floor() as usize;
        fifths.min(STAGE_COUNT - 1)
    }

    /// Move to `index` if it lies ahead. Returns true if the stage changed.
    pub fn advance_to(&mut self, index: usize) -> bool {
        let index = index.min(STAGE_COUNT - 1);
        if index > self.current_stage_index {
            self.current_stage_index = index;
            true
        } else {
            false
        }
    }
}

impl Default for DegradationPattern {
    fn default() -> Self {
        Self::from_template(&DEFAULT_TEMPLATE)
    }
}

/// Derives the entropy curve from a world's locations and narratives.
pub struct DegradationPatternBuilder;

impl DegradationPatternBuilder {
    pub fn build(locations: &[Element], narratives: &[Element]) -> DegradationPattern {
        let texts: Vec<String> = locations
            .iter()
            .chain(narratives)
            .map(Element::full_text)
            .collect();

        THEMED_TEMPLATES
            .iter()
            .find(|template| texts.iter().any(|text| text.contains(template.theme)))
            .map(DegradationPattern::from_template)
            .unwrap_or_default()
    }
}
