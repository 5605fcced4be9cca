//! Discoveries: the moments that change a world, and the marks they leave
//! on the witness's map.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use world_forge::ElementId;

use super::SessionRuntime;
use crate::error::{Result, SessionError};
use crate::knowledge::{KnowledgeId, KnowledgeItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryId(pub Uuid);

impl DiscoveryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DiscoveryId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryKind {
    Truth,
    Death,
    Betrayal,
    TreatyBroken,
    LocationLost,
}

/// What a discovery does to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapImpact {
    Tear,
    Burn,
    Blood,
    #[default]
    None,
}

/// Where and when the map was marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMark {
    pub discovery_id: DiscoveryId,
    pub location_id: Option<ElementId>,
    pub night: u32,
}

/// A significant discovery that changes the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub id: DiscoveryId,
    pub kind: DiscoveryKind,
    pub description: String,
    /// How it changed the world.
    pub world_impact: String,
    pub map_impact: MapImpact,

    /// Set when the discovery is recorded.
    pub location_id: Option<ElementId>,
    pub night_discovered: u32,
}

impl Discovery {
    pub fn new(kind: DiscoveryKind, description: impl Into<String>) -> Self {
        Self {
            id: DiscoveryId::new(),
            kind,
            description: description.into(),
            world_impact: String::new(),
            map_impact: MapImpact::None,
            location_id: None,
            night_discovered: 1,
        }
    }

    pub fn with_world_impact(mut self, impact: impl Into<String>) -> Self {
        self.world_impact = impact.into();
        self
    }

    pub fn with_map_impact(mut self, impact: MapImpact) -> Self {
        self.map_impact = impact;
        self
    }
}

impl SessionRuntime {
    /// Record a discovery at the current location and night, marking the
    /// map if it leaves a mark.
    pub fn record_discovery(&mut self, mut discovery: Discovery) -> Result<&Discovery> {
        self.ensure_active()?;

        let state = &mut self.state;
        discovery.night_discovered = state.night_count;
        discovery.location_id = state.current_location_id;

        let mark = MapMark {
            discovery_id: discovery.id,
            location_id: discovery.location_id,
            night: discovery.night_discovered,
        };
        match discovery.map_impact {
            MapImpact::Tear => state.map_tears.push(mark),
            MapImpact::Burn => state.map_burns.push(mark),
            MapImpact::Blood => state.map_blood.push(mark),
            MapImpact::None => {}
        }

        info!(
            session = %state.id,
            kind = ?discovery.kind,
            map = ?discovery.map_impact,
            night = discovery.night_discovered,
            "Discovery recorded"
        );

        let index = state.discoveries.len();
        state.discoveries.push(discovery);
        Ok(&self.state.discoveries[index])
    }

    /// Mark a piece of knowledge as passed on. Sharing does not lighten it.
    pub fn share_knowledge(&mut self, knowledge_id: KnowledgeId) -> Result<&KnowledgeItem> {
        self.ensure_active()?;

        let item = self
            .state
            .knowledge_items
            .iter_mut()
            .find(|k| k.id == knowledge_id)
            .ok_or(SessionError::KnowledgeNotFound(knowledge_id))?;
        item.has_been_shared = true;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use world_forge::{KeyLocation, LocationScale, PartitionedSource, WorldConfigAssembler};

    fn session() -> SessionRuntime {
        let mut world = WorldConfigAssembler::with_defaults().assemble(&PartitionedSource::new());
        world.key_locations.push(KeyLocation {
            id: ElementId::new(),
            name: "Bell Tower".to_string(),
            description: String::new(),
            scale: LocationScale::Large,
        });
        SessionRuntime::start(Arc::new(world), "Pip")
    }

    #[test]
    fn test_record_discovery_marks_map() {
        let mut session = session();
        session.advance_night().unwrap();
        let tower = session.state().current_location_id;

        let discovery = session
            .record_discovery(
                Discovery::new(DiscoveryKind::Death, "The bell ringer is gone")
                    .with_world_impact("No one rings the hours")
                    .with_map_impact(MapImpact::Blood),
            )
            .unwrap();
        assert_eq!(discovery.night_discovered, 2);
        assert_eq!(discovery.location_id, tower);
        let id = discovery.id;

        let state = session.state();
        assert_eq!(state.map_blood.len(), 1);
        assert_eq!(state.map_blood[0].discovery_id, id);
        assert_eq!(state.map_blood[0].night, 2);
        assert!(state.map_tears.is_empty());
        assert!(state.map_burns.is_empty());
    }

    #[test]
    fn test_discovery_without_mark() {
        let mut session = session();
        session
            .record_discovery(Discovery::new(DiscoveryKind::Truth, "It was always night"))
            .unwrap();

        let state = session.state();
        assert_eq!(state.discoveries.len(), 1);
        assert!(state.map_tears.is_empty() && state.map_burns.is_empty() && state.map_blood.is_empty());
    }

    #[test]
    fn test_share_knowledge() {
        let mut session = session();
        let first = session.state().knowledge_items[0].id;
        let weight = session.state().total_weight;

        assert!(session.share_knowledge(first).unwrap().has_been_shared);
        assert_eq!(session.state().total_weight, weight);

        let missing = KnowledgeId::new();
        assert!(matches!(
            session.share_knowledge(missing),
            Err(SessionError::KnowledgeNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_ended_session_records_nothing() {
        let mut session = session();
        session.end().unwrap();
        assert!(matches!(
            session.record_discovery(Discovery::new(DiscoveryKind::Betrayal, "too late")),
            Err(SessionError::SessionEnded(_))
        ));
    }
}
