//! End-to-end: raw world document to assembled world configuration.

use serde_json::json;
use world_forge::{
    ConflictKind, Perspective, ResourceType, SourceDocument, WitnessSize, WorldConfigAssembler,
};

fn document(value: serde_json::Value) -> SourceDocument {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_desert_world_end_to_end() {
    let doc = document(json!({
        "name": "The Glass Waste",
        "elements": [
            { "element_type": "character", "name": "Sultana Ireth", "description": "queen of the oasis", "reputation": 90 },
            { "element_type": "character", "name": "Dov", "description": "a water servant", "reputation": 12 },
            { "element_type": "character", "name": "Sefa", "description": "a water servant", "reputation": 12 },
            { "element_type": "location", "name": "The Well", "description": "the last well in the desert" },
            { "element_type": "object", "name": "Dune Rumor", "description": "a tale told at night" },
            { "element_type": "relation", "name": "Well Accord", "description": "an accord over water" },
            { "element_type": "relation", "name": "Clan Feud", "description": "a war of hate and secret scars" },
            { "element_type": "narrative", "name": "The Storm", "description": "a struggle against the sand" },
            { "element_type": "dragon", "name": "Ignored" }
        ]
    }));

    let forged = WorldConfigAssembler::with_defaults().forge_document(&doc);
    let world = &forged.config;

    assert_eq!(world.world_name, "The Glass Waste");

    // Both servants tie on reputation; the first extracted wins
    assert_eq!(world.witness.name, "Dov");
    assert_eq!(world.witness.size, WitnessSize::Mite);
    assert_eq!(world.witness.perspective, Perspective::InsideWalls);

    assert_eq!(world.degradation.stages[0], "moisture");
    assert_eq!(world.treaties, vec!["Well Accord"]);
    assert_eq!(world.resources.ephemeral, "secrets");
    assert_eq!(world.resources.physical, "scars");
    assert_eq!(world.resources.binding, "promises");
    assert_eq!(world.key_objects[0].resource, ResourceType::Ephemeral);
    assert_eq!(world.hidden_truth, "This world is already ending");

    let kinds: Vec<_> = forged.analysis.conflicts.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ConflictKind::Direct, ConflictKind::Narrative]);
}

#[test]
fn test_zero_character_source_falls_back() {
    let doc = document(json!({
        "elements": [
            { "element_type": "location", "name": "Empty Road" }
        ]
    }));

    let world = WorldConfigAssembler::with_defaults()
        .forge_document(&doc)
        .config;

    assert_eq!(world.witness.name, "The Chronicler");
    assert!(world.key_characters.is_empty());
    assert_eq!(world.witness.starting_location, "Empty Road");
}

#[test]
fn test_crowded_world_truth() {
    let elements: Vec<_> = (0..51)
        .map(|i| json!({ "element_type": "character", "name": format!("Face {i}"), "reputation": 50 }))
        .collect();
    let doc = document(json!({ "name": "Masquerade", "elements": elements }));

    let world = WorldConfigAssembler::with_defaults()
        .forge_document(&doc)
        .config;

    assert_eq!(world.hidden_truth, "Not everyone here is real");
    assert_eq!(world.key_characters.len(), 10);
    assert_eq!(world.witness.name, "The Chronicler");
}

#[test]
fn test_nameless_relations_reach_the_world() {
    let doc = document(json!({
        "name": "Two Clans",
        "elements": [
            { "element_type": "relation", "description": "an uneasy truce between clans" }
        ],
        "relations": [
            { "description": "sworn enemies" }
        ]
    }));

    let forged = WorldConfigAssembler::with_defaults().forge_document(&doc);

    assert_eq!(forged.config.treaties, vec!["Unknown Treaty"]);
    assert_eq!(forged.analysis.conflicts.len(), 1);
    assert_eq!(forged.analysis.conflicts[0].kind, ConflictKind::Direct);
}
