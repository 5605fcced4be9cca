//! Extracted element definitions.

mod character;

pub use character::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for every extracted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Create a new random element ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an element ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an element ID from its textual form.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Create a nil/empty element ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of element a source document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Character,
    Location,
    Object,
    Narrative,
    Relation,
}

impl ElementKind {
    /// Parse an element type tag, case-insensitively. `item` is an object.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "character" => Some(ElementKind::Character),
            "location" => Some(ElementKind::Location),
            "object" | "item" => Some(ElementKind::Object),
            "narrative" => Some(ElementKind::Narrative),
            "relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

/// A single unit extracted from source material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub name: String,
    pub description: String,

    /// Elements this one refers to (relation parties, narrative participants).
    #[serde(default)]
    pub involved: Vec<ElementId>,

    /// Raw attributes carried over from the source document.
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Element {
    /// Create a new element with the given kind and name.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            name: name.into(),
            description: String::new(),
            involved: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_involved(mut self, ids: impl IntoIterator<Item = ElementId>) -> Self {
        self.involved.extend(ids);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Lowercased description, the text most classifiers match against.
    pub fn description_text(&self) -> String {
        self.description.to_lowercase()
    }

    /// Lowercased name and description together.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(ElementKind::parse("Character"), Some(ElementKind::Character));
        assert_eq!(ElementKind::parse(" item "), Some(ElementKind::Object));
        assert_eq!(ElementKind::parse("RELATION"), Some(ElementKind::Relation));
        assert_eq!(ElementKind::parse("species"), None);
    }

    #[test]
    fn test_element_text() {
        let element = Element::new(ElementKind::Location, "The Dune Sea")
            .with_description("An Endless DESERT");

        assert_eq!(element.description_text(), "an endless desert");
        assert_eq!(element.full_text(), "the dune sea an endless desert");
    }

    #[test]
    fn test_element_id_parse() {
        let id = ElementId::new();
        assert_eq!(ElementId::parse(&id.to_string()), Some(id));
        assert_eq!(ElementId::parse("not-a-uuid"), None);
    }
}
