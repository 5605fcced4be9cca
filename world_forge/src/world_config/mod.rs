//! World configuration - the single immutable result of the forge.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{
    power_scores, ClassifiedItem, ConflictDetector, ConflictRecord, DegradationPattern,
    DegradationPatternBuilder, HiddenTruthSynthesizer, PowerAnalyzer, PowerStructure,
    ResourceClassifier, ResourceFlavors, TreatyIdentifier, TruthEvidence, WitnessCandidate,
    WitnessSelector,
};
use crate::config::ForgeConfig;
use crate::entities::ElementId;
use crate::mechanics::{LocationScale, Perspective, WitnessSize};
use crate::source::{PartitionedSource, SourceDocument, SourceIngestor};

/// Unique identifier for assembled worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(pub Uuid);

impl WorldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The witness as the world presents it to a playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessProfile {
    pub character_id: Option<ElementId>,
    pub name: String,
    pub size: WitnessSize,
    pub perspective: Perspective,
    pub suitability_reasons: Vec<String>,
    pub starting_location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLocation {
    pub id: ElementId,
    pub name: String,
    pub description: String,
    pub scale: LocationScale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCharacter {
    pub id: ElementId,
    pub name: String,
    pub description: String,
    pub traits: Vec<String>,
    pub power: u8,
    pub reputation: u8,
}

/// A fully classified world, ready to be witnessed.
///
/// Never mutated after assembly; playthroughs share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub id: WorldId,
    pub world_name: String,
    pub witness: WitnessProfile,
    pub resources: ResourceFlavors,
    pub degradation: DegradationPattern,
    pub treaties: Vec<String>,
    pub hidden_truth: String,
    pub key_locations: Vec<KeyLocation>,
    pub key_characters: Vec<KeyCharacter>,
    pub key_objects: Vec<ClassifiedItem>,
}

impl WorldConfig {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn location(&self, id: ElementId) -> Option<&KeyLocation> {
        self.key_locations.iter().find(|l| l.id == id)
    }

    pub fn character(&self, id: ElementId) -> Option<&KeyCharacter> {
        self.key_characters.iter().find(|c| c.id == id)
    }
}

/// Intermediate results of the analysis stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldAnalysis {
    pub power_scores: Vec<(ElementId, u8)>,
    pub power_structure: PowerStructure,
    pub conflicts: Vec<ConflictRecord>,
    pub witness: WitnessCandidate,
    pub items: Vec<ClassifiedItem>,
}

impl WorldAnalysis {
    pub fn power_of(&self, id: ElementId) -> Option<u8> {
        self.power_scores
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, power)| *power)
    }
}

/// A world together with the analysis it was built from.
#[derive(Debug, Clone)]
pub struct ForgedWorld {
    pub analysis: WorldAnalysis,
    pub config: WorldConfig,
}

/// Combines every classifier into one [`WorldConfig`].
pub struct WorldConfigAssembler {
    config: ForgeConfig,
}

impl WorldConfigAssembler {
    pub fn new(config: ForgeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ForgeConfig::default())
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Run the independent classifiers and the witness selection.
    ///
    /// Power, conflict and resource analysis read only the partitioned
    /// source; witness selection consumes the power scores.
    pub fn analyze(&self, source: &PartitionedSource) -> WorldAnalysis {
        let scored = PowerAnalyzer::score_all(&source.characters);
        let power_structure = PowerAnalyzer::structure(&source.characters);
        let conflicts = ConflictDetector::find(&source.relations, &source.narratives);
        let items = ResourceClassifier::classify_all(&source.objects);

        let witness =
            WitnessSelector::new(self.config.witness_reputation_threshold).select(&scored);

        debug!(
            rulers = power_structure.rulers.len(),
            powerless = power_structure.powerless.len(),
            conflicts = conflicts.len(),
            items = items.len(),
            witness = witness.name.as_str(),
            "Analyzed world"
        );

        WorldAnalysis {
            power_scores: power_scores(&scored),
            power_structure,
            conflicts,
            witness,
            items,
        }
    }

    /// Analyze and assemble in one pass.
    pub fn forge(&self, source: &PartitionedSource) -> ForgedWorld {
        let analysis = self.analyze(source);
        let config = self.assemble_from(source, &analysis);
        ForgedWorld { analysis, config }
    }

    pub fn assemble(&self, source: &PartitionedSource) -> WorldConfig {
        self.forge(source).config
    }

    /// Ingest a raw document and forge it.
    pub fn forge_document(&self, document: &SourceDocument) -> ForgedWorld {
        self.forge(&SourceIngestor::ingest(document))
    }

    fn assemble_from(&self, source: &PartitionedSource, analysis: &WorldAnalysis) -> WorldConfig {
        let resources = ResourceClassifier::flavors(&analysis.conflicts);
        let degradation = DegradationPatternBuilder::build(&source.locations, &source.narratives);
        let treaties = TreatyIdentifier::identify(&source.relations);
        let hidden_truth = HiddenTruthSynthesizer::synthesize(&TruthEvidence {
            narratives: &source.narratives,
            character_count: source.characters.len(),
            conflict_count: analysis.conflicts.len(),
        });

        let starting_location = source
            .locations
            .first()
            .map(|l| l.name.clone())
            .unwrap_or_else(|| self.config.fallback_starting_location.clone());

        let witness = WitnessProfile {
            character_id: analysis.witness.character_id,
            name: analysis.witness.name.clone(),
            size: analysis.witness.size,
            perspective: analysis.witness.perspective,
            suitability_reasons: analysis.witness.suitability_reasons.clone(),
            starting_location,
        };

        let key_locations = source
            .locations
            .iter()
            .take(self.config.max_key_locations)
            .map(|l| KeyLocation {
                id: l.id,
                name: l.name.clone(),
                description: l.description.clone(),
                scale: LocationScale::from_description(&l.description),
            })
            .collect();

        let key_characters = source
            .characters
            .iter()
            .take(self.config.max_key_characters)
            .map(|c| KeyCharacter {
                id: c.id(),
                name: c.name().to_string(),
                description: c.element.description.clone(),
                traits: c.traits.iter().cloned().collect(),
                power: analysis.power_of(c.id()).unwrap_or_else(|| PowerAnalyzer::score(c)),
                reputation: c.reputation,
            })
            .collect();

        let world_name = source
            .world_name
            .clone()
            .unwrap_or_else(|| self.config.default_world_name.clone());

        let config = WorldConfig {
            id: WorldId::new(),
            world_name,
            witness,
            resources,
            degradation,
            treaties,
            hidden_truth,
            key_locations,
            key_characters,
            key_objects: analysis.items.clone(),
        };

        info!(
            world = config.world_name.as_str(),
            witness = config.witness.name.as_str(),
            stages = config.degradation.stages.join(" -> ").as_str(),
            hidden_truth = config.hidden_truth.as_str(),
            "Assembled world"
        );
        config
    }
}

impl Default for WorldConfigAssembler {
    fn default() -> Self {
        Self::with_defaults()
    }
}
