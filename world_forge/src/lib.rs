//! # World Forge
//!
//! Turns narrative source material into a witness-able world. This crate owns
//! the extracted element model, the keyword classifiers, and the assembly of a
//! single immutable [`WorldConfig`]. It holds no per-playthrough state.
//!
//! ## Pipeline
//!
//! - **source**: parses a world document and partitions its elements by type
//! - **analysis**: power, conflict, resource, witness, degradation, treaty and
//!   hidden-truth classifiers
//! - **world_config**: combines the analysis into a [`WorldConfig`]

pub mod analysis;
pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod source;
pub mod world_config;

pub use analysis::*;
pub use config::ForgeConfig;
pub use entities::*;
pub use error::ForgeError;
pub use mechanics::*;
pub use source::*;
pub use world_config::*;
