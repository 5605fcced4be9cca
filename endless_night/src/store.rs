//! Persistence seam. Worlds and sessions are stored by id; the in-memory
//! stores here keep everything in maps.

use std::collections::HashMap;
use std::sync::Arc;
use world_forge::{WorldConfig, WorldId};

use crate::error::Result;
use crate::session::{SessionId, SessionState};

/// Where assembled worlds live.
pub trait WorldStore {
    fn insert(&mut self, world: WorldConfig) -> Arc<WorldConfig>;

    fn get(&self, id: WorldId) -> Option<Arc<WorldConfig>>;

    /// Count one more playthrough of a world. Returns false if it is unknown.
    fn record_witnessed(&mut self, id: WorldId) -> bool;

    fn times_witnessed(&self, id: WorldId) -> Option<u32>;
}

/// Where session snapshots are kept between runs.
pub trait SessionStore {
    fn save(&mut self, state: &SessionState) -> Result<()>;

    fn load(&self, id: SessionId) -> Result<Option<SessionState>>;
}

#[derive(Debug, Clone)]
struct StoredWorld {
    config: Arc<WorldConfig>,
    times_witnessed: u32,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryWorldStore {
    worlds: HashMap<WorldId, StoredWorld>,
}

impl InMemoryWorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}

impl WorldStore for InMemoryWorldStore {
    fn insert(&mut self, world: WorldConfig) -> Arc<WorldConfig> {
        let config = Arc::new(world);
        self.worlds.insert(
            config.id,
            StoredWorld {
                config: config.clone(),
                times_witnessed: 0,
            },
        );
        config
    }

    fn get(&self, id: WorldId) -> Option<Arc<WorldConfig>> {
        self.worlds.get(&id).map(|w| w.config.clone())
    }

    fn record_witnessed(&mut self, id: WorldId) -> bool {
        match self.worlds.get_mut(&id) {
            Some(world) => {
                world.times_witnessed += 1;
                true
            }
            None => false,
        }
    }

    fn times_witnessed(&self, id: WorldId) -> Option<u32> {
        self.worlds.get(&id).map(|w| w.times_witnessed)
    }
}

/// Keeps sessions as serialized JSON, the way an external store would.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<SessionId, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&mut self, state: &SessionState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.sessions.insert(state.id, json);
        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<SessionState>> {
        self.sessions
            .get(&id)
            .map(|json| serde_json::from_str(json))
            .transpose()
            .map_err(Into::into)
    }
}
