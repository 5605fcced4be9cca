//! Character elements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Element, ElementId, ElementKind};

/// Highest reputation a character can hold.
pub const MAX_REPUTATION: u8 = 100;

/// A character element with its social standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterElement {
    pub element: Element,

    /// Standing in the world, 0-100.
    pub reputation: u8,

    pub traits: BTreeSet<String>,
}

impl CharacterElement {
    /// Create a new character with the given name and no reputation.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_element(Element::new(ElementKind::Character, name))
    }

    /// Wrap an already extracted element.
    pub fn from_element(element: Element) -> Self {
        Self {
            element,
            reputation: 0,
            traits: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.element.description = description.into();
        self
    }

    /// Set the reputation, clamped to 0-100.
    pub fn with_reputation(mut self, reputation: u8) -> Self {
        self.reputation = reputation.min(MAX_REPUTATION);
        self
    }

    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    pub fn id(&self) -> ElementId {
        self.element.id
    }

    pub fn name(&self) -> &str {
        &self.element.name
    }

    /// Lowercased description followed by every trait.
    pub fn profile_text(&self) -> String {
        let mut text = self.element.description.to_lowercase();
        for name in &self.traits {
            text.push(' ');
            text.push_str(&name.to_lowercase());
        }
        text
    }

    /// Lowercased name, description and traits.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.element.name.to_lowercase(), self.profile_text())
    }

    /// Check if the source listed any special abilities for this character.
    pub fn has_abilities(&self) -> bool {
        match self.element.attributes.get("abilities") {
            Some(serde_json::Value::Array(items)) => !items.is_empty(),
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        }
    }
}
