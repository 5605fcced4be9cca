//! Session registry - every running playthrough, keyed by id.
//!
//! The registry owns each [`SessionRuntime`] and hands out `&mut` access
//! one call at a time, so mutations of a session are serialized by the
//! borrow checker. Worlds are shared between sessions as `Arc`s.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use world_forge::{WorldConfig, WorldId};

use crate::config::NightConfig;
use crate::error::{Result, SessionError};
use crate::knowledge::KnowledgeItem;
use crate::session::{SessionId, SessionRuntime, SessionState};
use crate::store::{InMemoryWorldStore, SessionStore, WorldStore};

pub struct SessionRegistry<W: WorldStore = InMemoryWorldStore> {
    worlds: W,
    sessions: HashMap<SessionId, SessionRuntime>,
    config: NightConfig,
}

impl SessionRegistry<InMemoryWorldStore> {
    pub fn new() -> Self {
        Self::with_store(InMemoryWorldStore::new(), NightConfig::default())
    }
}

impl Default for SessionRegistry<InMemoryWorldStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WorldStore> SessionRegistry<W> {
    pub fn with_store(worlds: W, config: NightConfig) -> Self {
        Self {
            worlds,
            sessions: HashMap::new(),
            config,
        }
    }

    pub fn register_world(&mut self, world: WorldConfig) -> WorldId {
        let world = self.worlds.insert(world);
        info!(world = %world.id, name = %world.world_name, "World registered");
        world.id
    }

    pub fn world(&self, id: WorldId) -> Result<Arc<WorldConfig>> {
        self.worlds.get(id).ok_or(SessionError::WorldNotFound(id))
    }

    pub fn times_witnessed(&self, id: WorldId) -> Result<u32> {
        self.worlds
            .times_witnessed(id)
            .ok_or(SessionError::WorldNotFound(id))
    }

    /// Start a new playthrough of a registered world.
    pub fn start_session(&mut self, world_id: WorldId, witness_name: impl Into<String>) -> Result<SessionId> {
        let world = self.world(world_id)?;
        let session = SessionRuntime::start_with_config(world, witness_name, self.config.clone());
        let id = session.id();

        self.worlds.record_witnessed(world_id);
        self.sessions.insert(id, session);
        Ok(id)
    }

    pub fn session(&self, id: SessionId) -> Result<&SessionRuntime> {
        self.sessions.get(&id).ok_or(SessionError::SessionNotFound(id))
    }

    pub fn session_mut(&mut self, id: SessionId) -> Result<&mut SessionRuntime> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionError::SessionNotFound(id))
    }

    pub fn state(&self, id: SessionId) -> Result<&SessionState> {
        self.session(id).map(SessionRuntime::state)
    }

    pub fn advance_night(&mut self, id: SessionId) -> Result<&SessionState> {
        self.session_mut(id)?.advance_night()
    }

    pub fn add_knowledge(&mut self, id: SessionId, item: KnowledgeItem) -> Result<&SessionState> {
        self.session_mut(id)?.add_knowledge(item)
    }

    pub fn end_session(&mut self, id: SessionId) -> Result<&SessionState> {
        self.session_mut(id)?.end()
    }

    /// Drop a session from the registry, returning its final state.
    pub fn remove_session(&mut self, id: SessionId) -> Result<SessionState> {
        self.sessions
            .remove(&id)
            .map(|s| s.snapshot())
            .ok_or(SessionError::SessionNotFound(id))
    }

    pub fn save_session<S: SessionStore + ?Sized>(&self, id: SessionId, store: &mut S) -> Result<()> {
        store.save(self.state(id)?)
    }

    /// Load a saved session back into the registry. A session that is
    /// still loaded is never replaced by an older snapshot.
    pub fn restore_session<S: SessionStore + ?Sized>(&mut self, id: SessionId, store: &S) -> Result<SessionId> {
        if self.sessions.contains_key(&id) {
            return Err(SessionError::SessionActive(id));
        }
        let state = store.load(id)?.ok_or(SessionError::SessionNotFound(id))?;
        let world = self.world(state.world_id)?;
        let session = SessionRuntime::resume(world, state, self.config.clone())?;
        self.sessions.insert(id, session);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
