//! Per-session decay of the world's places, people, agreements and things.

use serde::{Deserialize, Serialize};
use world_forge::{ClassifiedItem, ElementId, KeyCharacter, KeyLocation, LocationScale, ResourceType};

/// Color fades at this fraction of the integrity loss.
const COLOR_DECAY_FACTOR: f64 = 0.5;

/// Clarity fades at this fraction of the integrity loss.
const CLARITY_DECAY_FACTOR: f64 = 0.3;

/// How much of a location is still there, for one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub id: ElementId,
    pub name: String,
    pub scale: LocationScale,
    pub integrity: f64,
    pub color_saturation: f64,
    pub clarity: f64,
}

impl LocationState {
    pub fn new(location: &KeyLocation) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            scale: location.scale,
            integrity: 1.0,
            color_saturation: 1.0,
            clarity: 1.0,
        }
    }

    /// Decay by `amount`. Every field is floored at 0.
    pub fn degrade(&mut self, amount: f64) {
        let amount = amount.max(0.0);
        self.integrity = (self.integrity - amount).max(0.0);
        self.color_saturation = (self.color_saturation - amount * COLOR_DECAY_FACTOR).max(0.0);
        self.clarity = (self.clarity - amount * CLARITY_DECAY_FACTOR).max(0.0);
    }

    pub fn is_ruined(&self) -> bool {
        self.integrity <= 0.0
    }
}

/// How much a character still remembers, for one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub id: ElementId,
    pub name: String,
    pub memory_intact: f64,
}

impl CharacterState {
    pub fn new(character: &KeyCharacter) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            memory_intact: 1.0,
        }
    }

    pub fn forget(&mut self, amount: f64) {
        self.memory_intact = (self.memory_intact - amount.max(0.0)).max(0.0);
    }
}

/// How much hold an agreement still has, for one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatyState {
    pub name: String,
    pub strength: f64,
    pub is_broken: bool,
}

impl TreatyState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strength: 1.0,
            is_broken: false,
        }
    }

    /// Agreements lose their power. Returns true if this call broke it.
    pub fn weaken(&mut self, amount: f64) -> bool {
        if self.is_broken {
            return false;
        }
        self.strength = (self.strength - amount.max(0.0)).max(0.0);
        if self.strength <= 0.0 {
            self.is_broken = true;
        }
        self.is_broken
    }
}

/// What is left of a key object, for one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub id: ElementId,
    pub name: String,
    pub resource: ResourceType,
    /// 1 is perfect, 0 is destroyed.
    pub condition: f64,
}

impl ObjectState {
    pub fn new(item: &ClassifiedItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            resource: item.resource,
            condition: 1.0,
        }
    }

    pub fn decay(&mut self, amount: f64) {
        self.condition = (self.condition - amount.max(0.0)).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.condition <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> KeyLocation {
        KeyLocation {
            id: ElementId::new(),
            name: "Market Square".to_string(),
            description: "A small square".to_string(),
            scale: LocationScale::Small,
        }
    }

    #[test]
    fn test_location_degrade() {
        let mut location = LocationState::new(&square());
        location.degrade(0.01);

        assert!((location.integrity - 0.99).abs() < 1e-9);
        assert!((location.color_saturation - 0.995).abs() < 1e-9);
        assert!((location.clarity - 0.997).abs() < 1e-9);
    }

    #[test]
    fn test_location_floored() {
        let mut location = LocationState::new(&square());
        location.degrade(5.0);

        assert_eq!(location.integrity, 0.0);
        assert_eq!(location.color_saturation, 0.0);
        assert!(location.is_ruined());

        location.degrade(-1.0);
        assert_eq!(location.integrity, 0.0);
    }

    #[test]
    fn test_character_forget() {
        let character = KeyCharacter {
            id: ElementId::new(),
            name: "Mira".to_string(),
            description: String::new(),
            traits: Vec::new(),
            power: 5,
            reputation: 50,
        };
        let mut state = CharacterState::new(&character);
        state.forget(0.02);
        assert!((state.memory_intact - 0.98).abs() < 1e-9);

        state.forget(3.0);
        assert_eq!(state.memory_intact, 0.0);
    }

    #[test]
    fn test_treaty_weaken_until_broken() {
        let mut treaty = TreatyState::new("River Pact");
        assert!(!treaty.weaken(0.03));
        assert!((treaty.strength - 0.97).abs() < 1e-9);

        assert!(treaty.weaken(1.0));
        assert_eq!(treaty.strength, 0.0);
        assert!(treaty.is_broken);

        // Breaking is reported once.
        assert!(!treaty.weaken(0.03));
    }

    #[test]
    fn test_object_decay() {
        let item = ClassifiedItem {
            id: ElementId::new(),
            name: "Ledger".to_string(),
            resource: ResourceType::Binding,
        };
        let mut object = ObjectState::new(&item);
        object.decay(0.02);
        assert!((object.condition - 0.98).abs() < 1e-9);
        assert!(!object.is_destroyed());

        object.decay(2.0);
        assert!(object.is_destroyed());
    }
}
