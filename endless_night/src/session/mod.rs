//! Session - one witness's journey through an endless night.
//!
//! A [`SessionRuntime`] owns its [`SessionState`] exclusively and shares
//! only the immutable [`WorldConfig`]. Mutations go through `&mut self`, so
//! a session has a single writer by construction, while any number of
//! sessions may run against the same world.

mod chronicle;
mod conversation;
mod discovery;
mod places;

pub use chronicle::*;
pub use discovery::*;
pub use places::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use world_forge::{DegradationPattern, ElementId, WorldConfig, WorldId};

use crate::config::NightConfig;
use crate::decay::degrade_text;
use crate::dialogue::Conversation;
use crate::error::{Result, SessionError};
use crate::knowledge::KnowledgeItem;

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Active,
    Ended,
}

/// `1 / (1 + total_weight * k)`. Negative weight counts as none.
pub fn movement_speed(total_weight: f64, weight_coefficient: f64) -> f64 {
    1.0 / (1.0 + total_weight.max(0.0) * weight_coefficient)
}

/// The complete state of one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: SessionId,
    pub world_id: WorldId,
    pub witness_name: String,
    pub lifecycle: Lifecycle,

    pub night_count: u32,
    pub total_weight: f64,
    pub movement_speed: f64,

    /// 0 is pristine, 1 is ruins.
    pub world_entropy: f64,
    pub text_degradation: f64,
    pub color_loss: f64,

    /// This session's copy of the world's pattern; its stage only moves
    /// forward.
    pub degradation: DegradationPattern,

    pub current_location_id: Option<ElementId>,

    /// In the order they were gathered.
    pub knowledge_items: Vec<KnowledgeItem>,

    pub locations: Vec<LocationState>,
    pub characters: Vec<CharacterState>,
    pub treaties: Vec<TreatyState>,
    pub objects: Vec<ObjectState>,
    pub conversations: Vec<Conversation>,

    pub discoveries: Vec<Discovery>,
    pub map_tears: Vec<MapMark>,
    pub map_burns: Vec<MapMark>,
    pub map_blood: Vec<MapMark>,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn location(&self, id: ElementId) -> Option<&LocationState> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn location_mut(&mut self, id: ElementId) -> Option<&mut LocationState> {
        self.locations.iter_mut().find(|l| l.id == id)
    }

    pub fn character(&self, id: ElementId) -> Option<&CharacterState> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: ElementId) -> Option<&mut CharacterState> {
        self.characters.iter_mut().find(|c| c.id == id)
    }
}

/// The per-playthrough state machine.
#[derive(Debug, Clone)]
pub struct SessionRuntime {
    world: Arc<WorldConfig>,
    config: NightConfig,
    state: SessionState,
}

impl SessionRuntime {
    /// Start a session with default night configuration.
    pub fn start(world: Arc<WorldConfig>, witness_name: impl Into<String>) -> Self {
        Self::start_with_config(world, witness_name, NightConfig::default())
    }

    /// Start a session: night one, nothing decayed, nothing carried but a
    /// single weightless whisper.
    pub fn start_with_config(
        world: Arc<WorldConfig>,
        witness_name: impl Into<String>,
        config: NightConfig,
    ) -> Self {
        let current_location_id = world.key_locations.first().map(|l| l.id);

        let mut first_whisper = KnowledgeItem::whisper(config.first_whisper.clone())
            .with_base_weight(0.0)
            .with_source("the night");
        first_whisper.discovered_at = current_location_id;

        let state = SessionState {
            id: SessionId::new(),
            world_id: world.id,
            witness_name: witness_name.into(),
            lifecycle: Lifecycle::Active,
            night_count: 1,
            total_weight: 0.0,
            movement_speed: 1.0,
            world_entropy: 0.0,
            text_degradation: 0.0,
            color_loss: 0.0,
            degradation: world.degradation.clone(),
            current_location_id,
            knowledge_items: vec![first_whisper],
            locations: world.key_locations.iter().map(LocationState::new).collect(),
            characters: world.key_characters.iter().map(CharacterState::new).collect(),
            treaties: world.treaties.iter().map(TreatyState::new).collect(),
            objects: world.key_objects.iter().map(ObjectState::new).collect(),
            conversations: Vec::new(),
            discoveries: Vec::new(),
            map_tears: Vec::new(),
            map_burns: Vec::new(),
            map_blood: Vec::new(),
        };

        info!(
            session = %state.id,
            world = %world.world_name,
            witness = %state.witness_name,
            "Session started"
        );

        Self { world, config, state }
    }

    /// Pick a saved session back up against its world.
    pub fn resume(world: Arc<WorldConfig>, state: SessionState, config: NightConfig) -> Result<Self> {
        if state.world_id != world.id {
            return Err(SessionError::WorldNotFound(state.world_id));
        }
        Ok(Self { world, config, state })
    }

    pub fn id(&self) -> SessionId {
        self.state.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn world(&self) -> &Arc<WorldConfig> {
        &self.world
    }

    pub fn config(&self) -> &NightConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(SessionError::SessionEnded(self.state.id))
        }
    }

    /// The night continues, everything degrades.
    pub fn advance_night(&mut self) -> Result<&SessionState> {
        self.ensure_active()?;

        let state = &mut self.state;
        state.night_count += 1;
        state.world_entropy = (state.world_entropy + self.config.entropy_per_night.max(0.0)).min(1.0);
        state.text_degradation =
            (state.text_degradation + self.config.text_decay_per_night.max(0.0)).min(1.0);
        state.color_loss = (state.color_loss + self.config.color_loss_per_night.max(0.0)).min(1.0);

        if let Some(location_id) = state.current_location_id {
            let amount = self.config.location_decay;
            if let Some(location) = state.location_mut(location_id) {
                location.degrade(amount);
            }
        }

        for treaty in &mut state.treaties {
            if treaty.weaken(self.config.treaty_decay) {
                info!(session = %state.id, treaty = %treaty.name, "Treaty broken");
            }
        }
        for object in &mut state.objects {
            object.decay(self.config.object_decay);
        }

        let stage = DegradationPattern::stage_for_entropy(state.world_entropy);
        if state.degradation.advance_to(stage) {
            info!(
                session = %state.id,
                night = state.night_count,
                stage = state.degradation.current_stage(),
                "Degradation stage reached"
            );
        }

        debug!(
            session = %state.id,
            night = state.night_count,
            entropy = state.world_entropy,
            text = state.text_degradation,
            color = state.color_loss,
            "Night advanced"
        );

        Ok(&self.state)
    }

    /// Knowledge has physical weight.
    pub fn add_knowledge(&mut self, mut item: KnowledgeItem) -> Result<&SessionState> {
        self.ensure_active()?;

        let weight = item.refresh_weight().max(0.0);
        item.total_weight = weight;
        item.night_discovered = self.state.night_count;
        item.discovered_at = self.state.current_location_id;

        let state = &mut self.state;
        state.total_weight += weight;
        state.movement_speed = movement_speed(state.total_weight, self.config.weight_coefficient);

        debug!(
            session = %state.id,
            kind = ?item.knowledge_type,
            weight,
            total_weight = state.total_weight,
            speed = state.movement_speed,
            "Knowledge added"
        );

        state.knowledge_items.push(item);
        Ok(&self.state)
    }

    /// Degrade `message` at an explicit level. Does not touch the session.
    pub fn degrade_text<R: Rng + ?Sized>(&self, message: &str, level: f64, rng: &mut R) -> String {
        degrade_text(message, level, rng)
    }

    /// Degrade `message` at the session's current text degradation.
    pub fn degrade_at_current<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        degrade_text(message, self.state.text_degradation, rng)
    }

    /// Move the witness to another key location.
    pub fn move_to(&mut self, location_id: ElementId) -> Result<&SessionState> {
        self.ensure_active()?;
        if self.state.location(location_id).is_none() {
            return Err(SessionError::LocationNotFound(location_id));
        }

        self.state.current_location_id = Some(location_id);
        debug!(session = %self.state.id, location = %location_id, "Witness moved");
        Ok(&self.state)
    }

    pub fn location(&self, location_id: ElementId) -> Result<&LocationState> {
        self.state
            .location(location_id)
            .ok_or(SessionError::LocationNotFound(location_id))
    }

    pub fn current_location(&self) -> Option<&LocationState> {
        self.state
            .current_location_id
            .and_then(|id| self.state.location(id))
    }

    pub fn character(&self, character_id: ElementId) -> Result<&CharacterState> {
        self.state
            .character(character_id)
            .ok_or(SessionError::CharacterNotFound(character_id))
    }

    /// Name of the active degradation stage.
    pub fn current_stage(&self) -> &str {
        self.state.degradation.current_stage()
    }

    /// End the journey. Reads keep working; mutations fail from now on.
    pub fn end(&mut self) -> Result<&SessionState> {
        self.ensure_active()?;
        self.state.lifecycle = Lifecycle::Ended;
        for conversation in &mut self.state.conversations {
            conversation.is_active = false;
        }

        info!(
            session = %self.state.id,
            nights = self.state.night_count,
            weight = self.state.total_weight,
            "Session ended"
        );
        Ok(&self.state)
    }

    /// Compile everything the witness carried into a chronicle.
    pub fn chronicle(&self) -> Chronicle {
        let state = &self.state;
        Chronicle {
            name: format!("Chronicle of {}", state.witness_name),
            description: format!("Witnessed through {} endless nights", state.night_count),
            entries: state
                .knowledge_items
                .iter()
                .map(|k| format!("Night {}: {}", k.night_discovered, k.content))
                .collect(),
            witness: state.witness_name.clone(),
            nights: state.night_count,
            weight_carried: state.total_weight,
            world_entropy: state.world_entropy,
        }
    }
}
