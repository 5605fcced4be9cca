//! Analysis - the keyword classifiers that read a partitioned source.
//!
//! Every classifier is a pure function over immutable input and every rule
//! table ends in a default, so no classification step can fail:
//! - **power**: agency score and power structure of characters
//! - **conflict**: hostile relations and struggling narratives
//! - **resources**: resource class of items and per-world flavor labels
//! - **witness**: the low-power avatar the player embodies
//! - **degradation**: the five-stage entropy curve
//! - **treaty** / **truth**: implicit agreements and the hidden truth

mod conflict;
mod degradation;
mod keyword;
mod power;
mod resources;
mod treaty;
mod truth;
mod witness;

pub use conflict::*;
pub use degradation::*;
pub use keyword::*;
pub use power::*;
pub use resources::*;
pub use treaty::*;
pub use truth::*;
pub use witness::*;
