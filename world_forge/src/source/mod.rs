//! Source ingestion - parsing a world document and partitioning its elements.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::entities::{CharacterElement, Element, ElementId, ElementKind, MAX_REPUTATION};
use crate::error::{ForgeError, Result};

/// A structured world document: a name, ordered raw elements and, optionally,
/// a separate list of relations.
///
/// Elements stay as raw JSON until ingestion so that one malformed element
/// cannot reject the whole document. Entries of `relations` need no
/// `element_type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
    #[serde(default)]
    pub relations: Vec<serde_json::Value>,
}

impl SourceDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ForgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// The shape one element is expected to have.
#[derive(Debug, Clone, Deserialize)]
struct RawElement {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "type")]
    element_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reputation: Option<f64>,
    #[serde(default)]
    traits: Vec<String>,
    #[serde(default, alias = "involved")]
    characters: Vec<String>,
    #[serde(flatten)]
    attributes: HashMap<String, serde_json::Value>,
}

/// Why an element was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Malformed(String),
    MissingName,
    MissingType,
    UnknownType(String),
}

/// Elements partitioned by type, each list in extraction order.
#[derive(Debug, Clone, Default)]
pub struct PartitionedSource {
    pub world_name: Option<String>,
    pub characters: Vec<CharacterElement>,
    pub locations: Vec<Element>,
    pub objects: Vec<Element>,
    pub narratives: Vec<Element>,
    pub relations: Vec<Element>,
    /// Number of elements that were dropped.
    pub skipped: usize,
}

impl PartitionedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_count(&self) -> usize {
        self.characters.len()
            + self.locations.len()
            + self.objects.len()
            + self.narratives.len()
            + self.relations.len()
    }

    /// Route an element into its partition.
    pub fn push(&mut self, element: Element) {
        match element.kind {
            ElementKind::Character => self.characters.push(CharacterElement::from_element(element)),
            ElementKind::Location => self.locations.push(element),
            ElementKind::Object => self.objects.push(element),
            ElementKind::Narrative => self.narratives.push(element),
            ElementKind::Relation => self.relations.push(element),
        }
    }
}

/// Partitions raw source elements by type.
pub struct SourceIngestor;

impl SourceIngestor {
    /// Ingest a document. Never fails: malformed or unknown elements are
    /// skipped individually.
    pub fn ingest(document: &SourceDocument) -> PartitionedSource {
        let mut source = PartitionedSource {
            world_name: document
                .name
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            ..PartitionedSource::default()
        };

        let elements = document.elements.iter().map(|value| (value, None));
        let relations = document
            .relations
            .iter()
            .map(|value| (value, Some(ElementKind::Relation)));

        for (index, (value, implied_kind)) in elements.chain(relations).enumerate() {
            match Self::ingest_element(value, implied_kind) {
                Ok(Ingested::Character(character)) => source.characters.push(character),
                Ok(Ingested::Element(element)) => source.push(element),
                Err(reason) => {
                    warn!(index, reason = ?reason, "Skipping source element");
                    source.skipped += 1;
                }
            }
        }

        debug!(
            characters = source.characters.len(),
            locations = source.locations.len(),
            objects = source.objects.len(),
            narratives = source.narratives.len(),
            relations = source.relations.len(),
            skipped = source.skipped,
            "Partitioned source"
        );
        source
    }

    /// Relations are identified by what they describe, so only they may
    /// go without a name.
    fn ingest_element(
        value: &serde_json::Value,
        implied_kind: Option<ElementKind>,
    ) -> std::result::Result<Ingested, SkipReason> {
        let raw: RawElement = serde_json::from_value(value.clone())
            .map_err(|e| SkipReason::Malformed(e.to_string()))?;

        let type_tag = raw
            .element_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let kind = match (type_tag, implied_kind) {
            (Some(tag), _) => {
                ElementKind::parse(tag).ok_or_else(|| SkipReason::UnknownType(tag.to_string()))?
            }
            (None, Some(kind)) => kind,
            (None, None) => return Err(SkipReason::MissingType),
        };
        let name = raw
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let name = match (name, kind) {
            (Some(name), _) => name.to_string(),
            (None, ElementKind::Relation) => String::new(),
            (None, _) => return Err(SkipReason::MissingName),
        };

        let id = match raw.id.as_deref() {
            Some(text) => ElementId::parse(text).unwrap_or_else(|| {
                debug!(id = text, "Replacing unparseable element id");
                ElementId::new()
            }),
            None => ElementId::new(),
        };

        let mut element = Element::new(kind, name)
            .with_id(id)
            .with_description(raw.description.unwrap_or_default())
            .with_involved(raw.characters.iter().filter_map(|c| ElementId::parse(c)));
        element.attributes = raw.attributes;

        if kind != ElementKind::Character {
            return Ok(Ingested::Element(element));
        }

        let reputation = raw
            .reputation
            .filter(|r| r.is_finite())
            .map(|r| r.round().clamp(0.0, MAX_REPUTATION as f64) as u8)
            .unwrap_or(0);
        let mut character = CharacterElement::from_element(element).with_reputation(reputation);
        for name in raw.traits {
            character = character.with_trait(name);
        }
        Ok(Ingested::Character(character))
    }
}

enum Ingested {
    Character(CharacterElement),
    Element(Element),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(elements: serde_json::Value) -> SourceDocument {
        serde_json::from_value(json!({ "name": "Test World", "elements": elements })).unwrap()
    }

    #[test]
    fn test_partition_by_type() {
        let doc = document(json!([
            { "element_type": "character", "name": "Ada", "reputation": 12, "traits": ["quiet"] },
            { "element_type": "location", "name": "Mill" },
            { "element_type": "item", "name": "Key" },
            { "element_type": "narrative", "name": "The Fire" },
            { "element_type": "relation", "name": "Kinship" },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.world_name.as_deref(), Some("Test World"));
        assert_eq!(source.characters.len(), 1);
        assert_eq!(source.characters[0].reputation, 12);
        assert!(source.characters[0].traits.contains("quiet"));
        assert_eq!(source.locations.len(), 1);
        assert_eq!(source.objects.len(), 1);
        assert_eq!(source.narratives.len(), 1);
        assert_eq!(source.relations.len(), 1);
        assert_eq!(source.skipped, 0);
    }

    #[test]
    fn test_malformed_elements_skipped() {
        let doc = document(json!([
            { "element_type": "character" },
            { "name": "Typeless" },
            { "element_type": "species", "name": "Elves" },
            { "element_type": "location", "name": "   " },
            { "element_type": "character", "name": "Bad", "traits": "not-a-list" },
            "just a string",
            { "element_type": "location", "name": "Survivor" },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.skipped, 6);
        assert_eq!(source.element_count(), 1);
        assert_eq!(source.locations[0].name, "Survivor");
    }

    #[test]
    fn test_nameless_relations_kept() {
        let doc = document(json!([
            { "element_type": "relation", "description": "an uneasy truce" },
            { "element_type": "location", "description": "nameless place" },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.relations.len(), 1);
        assert_eq!(source.relations[0].name, "");
        assert_eq!(source.relations[0].description, "an uneasy truce");
        assert_eq!(source.skipped, 1);
    }

    #[test]
    fn test_top_level_relations() {
        let a = ElementId::new();
        let doc: SourceDocument = serde_json::from_value(json!({
            "elements": [
                { "id": a.to_string(), "element_type": "character", "name": "A" },
                { "element_type": "relation", "name": "Inline", "description": "kin" },
            ],
            "relations": [
                { "description": "sworn enemies", "involved": [a.to_string()] },
                { "element_type": "location", "name": "Typed Anyway" },
                "garbage",
            ]
        }))
        .unwrap();

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.relations.len(), 2);
        assert_eq!(source.relations[0].name, "Inline");
        assert_eq!(source.relations[1].involved, vec![a]);
        assert_eq!(source.locations.len(), 1);
        assert_eq!(source.skipped, 1);
    }

    #[test]
    fn test_ids_and_involved() {
        let a = ElementId::new();
        let b = ElementId::new();
        let doc = document(json!([
            { "id": a.to_string(), "element_type": "character", "name": "A" },
            { "element_type": "relation", "name": "Feud", "characters": [a.to_string(), b.to_string(), "junk"] },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.characters[0].id(), a);
        assert_eq!(source.relations[0].involved, vec![a, b]);
    }

    #[test]
    fn test_reputation_clamped() {
        let doc = document(json!([
            { "element_type": "character", "name": "Giant", "reputation": 400 },
            { "element_type": "character", "name": "Ghost", "reputation": -3 },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert_eq!(source.characters[0].reputation, 100);
        assert_eq!(source.characters[1].reputation, 0);
    }

    #[test]
    fn test_attributes_preserved() {
        let doc = document(json!([
            { "element_type": "character", "name": "Mage", "abilities": ["fire"] },
        ]));

        let source = SourceIngestor::ingest(&doc);
        assert!(source.characters[0].has_abilities());
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(SourceDocument::from_json_str("{ not json").is_err());
        let empty = SourceDocument::from_json_str("{}").unwrap();
        assert!(SourceIngestor::ingest(&empty).world_name.is_none());
    }
}
