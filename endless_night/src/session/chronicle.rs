//! The chronicle: what a witness carried, night by night.

use serde::{Deserialize, Serialize};
use world_forge::{Element, ElementKind};

/// A finished account of a playthrough, ready to be written back into a
/// world as a narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chronicle {
    pub name: String,
    pub description: String,
    /// One line per knowledge item: `Night N: content`.
    pub entries: Vec<String>,
    pub witness: String,
    pub nights: u32,
    pub weight_carried: f64,
    pub world_entropy: f64,
}

impl Chronicle {
    pub fn text(&self) -> String {
        self.entries.join("\n")
    }

    /// Render as a narrative element.
    pub fn to_narrative(&self) -> Element {
        Element::new(ElementKind::Narrative, self.name.clone())
            .with_description(self.text())
            .with_attribute("witness", self.witness.clone().into())
            .with_attribute("nights", self.nights.into())
            .with_attribute("weight_carried", self.weight_carried.into())
            .with_attribute("world_entropy", self.world_entropy.into())
    }
}
