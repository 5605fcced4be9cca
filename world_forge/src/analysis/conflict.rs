//! Conflict detection over relations and narratives.

use serde::{Deserialize, Serialize};

use super::contains_any;
use crate::entities::{Element, ElementId};
use crate::mechanics::ConflictKind;

const HOSTILE_RELATION_KEYWORDS: &[&str] = &["enemy", "rival", "conflict", "war", "hate"];
const STRUGGLE_NARRATIVE_KEYWORDS: &[&str] = &["battle", "fight", "struggle", "conflict"];

/// A single adversarial relation or narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub kind: ConflictKind,
    /// The source element and everything it involves.
    pub involved: Vec<ElementId>,
    pub name: String,
    pub description: String,
}

impl ConflictRecord {
    fn from_element(kind: ConflictKind, element: &Element) -> Self {
        let mut involved = Vec::with_capacity(element.involved.len() + 1);
        involved.push(element.id);
        involved.extend(element.involved.iter().copied());

        Self {
            kind,
            involved,
            name: element.name.clone(),
            description: element.description.clone(),
        }
    }

    /// Lowercased text used to pick resource flavors. Direct conflicts
    /// contribute only their description; narratives add their name.
    pub fn text(&self) -> String {
        match self.kind {
            ConflictKind::Direct => self.description.to_lowercase(),
            ConflictKind::Narrative => format!("{} {}", self.name, self.description).to_lowercase(),
        }
    }
}

/// Flags adversarial relations and narratives.
pub struct ConflictDetector;

impl ConflictDetector {
    /// Find every conflict. Relations come first, then narratives, each in
    /// extraction order; matches are never merged.
    pub fn find(relations: &[Element], narratives: &[Element]) -> Vec<ConflictRecord> {
        let direct = relations
            .iter()
            .filter(|r| contains_any(&r.description_text(), HOSTILE_RELATION_KEYWORDS))
            .map(|r| ConflictRecord::from_element(ConflictKind::Direct, r));

        let narrative = narratives
            .iter()
            .filter(|n| contains_any(&n.description_text(), STRUGGLE_NARRATIVE_KEYWORDS))
            .map(|n| ConflictRecord::from_element(ConflictKind::Narrative, n));

        direct.chain(narrative).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ElementKind;

    fn relation(description: &str) -> Element {
        Element::new(ElementKind::Relation, "Bond").with_description(description)
    }

    fn narrative(description: &str) -> Element {
        Element::new(ElementKind::Narrative, "Tale").with_description(description)
    }

    #[test]
    fn test_direct_conflict() {
        let a = ElementId::new();
        let b = ElementId::new();
        let relations = vec![relation("Sworn ENEMY of the house").with_involved([a, b])];

        let conflicts = ConflictDetector::find(&relations, &[]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Direct);
        assert_eq!(conflicts[0].involved[1..], [a, b]);
    }

    #[test]
    fn test_narrative_conflict() {
        let narratives = vec![narrative("The battle of the ford"), narrative("A wedding")];

        let conflicts = ConflictDetector::find(&[], &narratives);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Narrative);
        assert_eq!(conflicts[0].involved, vec![narratives[0].id]);
    }

    #[test]
    fn test_no_deduplication() {
        let relations = vec![relation("rivals"), relation("rivals")];
        let narratives = vec![narrative("a conflict"), narrative("a conflict")];

        assert_eq!(ConflictDetector::find(&relations, &narratives).len(), 4);
    }

    #[test]
    fn test_friendly_relations_ignored() {
        let relations = vec![relation("old friends"), relation("a trade pact")];
        assert!(ConflictDetector::find(&relations, &[]).is_empty());
    }

    #[test]
    fn test_text_skips_relation_name() {
        let relations = vec![Element::new(ElementKind::Relation, "Scarlet Feud").with_description("old rivals")];
        let narratives = vec![Element::new(ElementKind::Narrative, "Blood Moon").with_description("a battle")];

        let conflicts = ConflictDetector::find(&relations, &narratives);
        assert_eq!(conflicts[0].text(), "old rivals");
        assert_eq!(conflicts[1].text(), "blood moon a battle");
    }

    #[test]
    fn test_nameless_relation_conflict() {
        let relations = vec![Element::new(ElementKind::Relation, "").with_description("sworn enemies")];
        assert_eq!(ConflictDetector::find(&relations, &[]).len(), 1);
    }

    #[test]
    fn test_narrative_keywords_differ_from_relation_keywords() {
        // "war" marks a hostile relation but not a struggling narrative
        let conflicts = ConflictDetector::find(&[relation("war")], &[narrative("war")]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Direct);
    }
}
