//! # Endless Night
//!
//! The per-playthrough simulation. A session is started against an immutable
//! [`world_forge::WorldConfig`] and then evolves on its own: every night the
//! world and its text decay a little more, and every piece of knowledge the
//! witness gathers adds weight that slows them down.
//!
//! ## Core Components
//!
//! - **session**: the session state machine and its per-location decay
//! - **knowledge**: weighted knowledge items
//! - **decay**: banded text degradation
//! - **dialogue**: conversations and prompt context for a text generator
//! - **registry** / **store**: sessions keyed by id and the persistence seam

pub mod config;
pub mod decay;
pub mod dialogue;
pub mod error;
pub mod knowledge;
pub mod registry;
pub mod session;
pub mod store;

pub use config::NightConfig;
pub use decay::*;
pub use dialogue::*;
pub use error::SessionError;
pub use knowledge::*;
pub use registry::*;
pub use session::*;
pub use store::*;
