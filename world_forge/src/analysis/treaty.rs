//! Treaty identification - the implicit agreements that keep order.

use super::contains_any;
use crate::entities::Element;

const AGREEMENT_KEYWORDS: &[&str] = &["agreement", "treaty", "pact", "accord", "truce"];

/// Used whole when a world names no agreements of its own.
pub const DEFAULT_TREATIES: [&str; 3] = [
    "The Silence Accord - No one speaks of what happened",
    "The Border Treaty - Territories remain separate",
    "The Observation Pact - Watchers must not interfere",
];

pub struct TreatyIdentifier;

impl TreatyIdentifier {
    /// Names of every relation describing an agreement, or the default set.
    /// Discovered and default treaties are never mixed.
    pub fn identify(relations: &[Element]) -> Vec<String> {
        let treaties: Vec<String> = relations
            .iter()
            .filter(|r| contains_any(&r.description_text(), AGREEMENT_KEYWORDS))
            .map(|r| {
                if r.name.trim().is_empty() {
                    "Unknown Treaty".to_string()
                } else {
                    r.name.clone()
                }
            })
            .collect();

        if treaties.is_empty() {
            DEFAULT_TREATIES.iter().map(|t| t.to_string()).collect()
        } else {
            treaties
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ElementKind;

    fn relation(name: &str, description: &str) -> Element {
        Element::new(ElementKind::Relation, name).with_description(description)
    }

    #[test]
    fn test_discovered_treaties() {
        let relations = vec![
            relation("The Salt Truce", "An uneasy TRUCE between the clans"),
            relation("Blood Feud", "They hate each other"),
            relation("River Pact", "A pact over the water rights"),
        ];

        assert_eq!(
            TreatyIdentifier::identify(&relations),
            vec!["The Salt Truce", "River Pact"]
        );
    }

    #[test]
    fn test_nameless_treaty() {
        let treaties = TreatyIdentifier::identify(&[relation("", "an uneasy truce between clans")]);
        assert_eq!(treaties, vec!["Unknown Treaty"]);
    }

    #[test]
    fn test_default_treaties() {
        let treaties = TreatyIdentifier::identify(&[relation("Feud", "old enemies")]);
        assert_eq!(treaties.len(), 3);
        assert_eq!(treaties[0], DEFAULT_TREATIES[0]);
    }

    #[test]
    fn test_never_mixed() {
        let treaties = TreatyIdentifier::identify(&[relation("Accord", "an accord")]);
        assert_eq!(treaties, vec!["Accord"]);
    }
}
