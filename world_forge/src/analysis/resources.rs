//! Resource classification and per-world flavor labels.

use serde::{Deserialize, Serialize};

use super::{ConflictRecord, KeywordTable, KeywordTier};
use crate::entities::{Element, ElementId};
use crate::mechanics::ResourceType;

const RESOURCE_TIERS: KeywordTable<ResourceType> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["whisper", "rumor", "secret", "tale"],
            result: ResourceType::Ephemeral,
        },
        KeywordTier {
            keywords: &["oath", "contract", "promise", "vow"],
            result: ResourceType::Binding,
        },
    ],
    ResourceType::Physical,
);

const EPHEMERAL_FLAVORS: KeywordTable<&str> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["secret"],
            result: "secrets",
        },
        KeywordTier {
            keywords: &["memory"],
            result: "memories",
        },
    ],
    "whispers",
);

const PHYSICAL_FLAVORS: KeywordTable<&str> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["scar"],
            result: "scars",
        },
        KeywordTier {
            keywords: &["blood"],
            result: "bloodstains",
        },
    ],
    "marks",
);

const BINDING_FLAVORS: KeywordTable<&str> = KeywordTable::new(
    &[
        KeywordTier {
            keywords: &["oath"],
            result: "oaths",
        },
        KeywordTier {
            keywords: &["curse"],
            result: "curses",
        },
    ],
    "promises",
);

/// The label this world gives each resource class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFlavors {
    pub ephemeral: String,
    pub physical: String,
    pub binding: String,
}

impl ResourceFlavors {
    /// Get the label for a resource class.
    pub fn label(&self, resource: ResourceType) -> &str {
        match resource {
            ResourceType::Ephemeral => &self.ephemeral,
            ResourceType::Physical => &self.physical,
            ResourceType::Binding => &self.binding,
        }
    }
}

impl Default for ResourceFlavors {
    fn default() -> Self {
        Self {
            ephemeral: EPHEMERAL_FLAVORS.fallback().to_string(),
            physical: PHYSICAL_FLAVORS.fallback().to_string(),
            binding: BINDING_FLAVORS.fallback().to_string(),
        }
    }
}

/// An object with its resource class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub id: ElementId,
    pub name: String,
    pub resource: ResourceType,
}

/// Assigns resource classes to items and flavor labels to worlds.
pub struct ResourceClassifier;

impl ResourceClassifier {
    /// Classify an item from its description and name.
    pub fn classify(description: &str, name: &str) -> ResourceType {
        RESOURCE_TIERS.classify(&format!("{} {}", description, name))
    }

    pub fn classify_element(element: &Element) -> ResourceType {
        Self::classify(&element.description, &element.name)
    }

    /// Classify every item, preserving extraction order.
    pub fn classify_all(items: &[Element]) -> Vec<ClassifiedItem> {
        items
            .iter()
            .map(|item| ClassifiedItem {
                id: item.id,
                name: item.name.clone(),
                resource: Self::classify_element(item),
            })
            .collect()
    }

    /// Pick this world's flavor labels from the text of its conflicts.
    ///
    /// Each class picks independently: the first flavor tier matched by any
    /// conflict wins.
    pub fn flavors(conflicts: &[ConflictRecord]) -> ResourceFlavors {
        let texts: Vec<String> = conflicts.iter().map(ConflictRecord::text).collect();
        let pick = |table: &KeywordTable<&'static str>| -> String {
            table
                .tiers()
                .iter()
                .find(|tier| {
                    texts
                        .iter()
                        .any(|text| super::contains_any(text, tier.keywords))
                })
                .map(|tier| tier.result)
                .unwrap_or(table.fallback())
                .to_string()
        };

        ResourceFlavors {
            ephemeral: pick(&EPHEMERAL_FLAVORS),
            physical: pick(&PHYSICAL_FLAVORS),
            binding: pick(&BINDING_FLAVORS),
        }
    }
}
