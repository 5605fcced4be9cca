//! Knowledge - information the witness carries, and what it weighs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use world_forge::{ElementId, ResourceType};

/// Terrible truths weigh double.
pub const TERRIBLE_MULTIPLIER: f64 = 2.0;

/// Knowledge about the witness themself weighs double.
pub const SELF_MULTIPLIER: f64 = 2.0;

/// Lies are lighter but still a burden.
pub const LIE_MULTIPLIER: f64 = 0.5;

/// Unique identifier for knowledge items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeId(pub Uuid);

impl KnowledgeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KnowledgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for KnowledgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The form a piece of knowledge takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeType {
    Whisper,
    Mark,
    Oath,
}

impl KnowledgeType {
    /// The resource class this kind of knowledge belongs to.
    pub fn resource_type(self) -> ResourceType {
        match self {
            KnowledgeType::Whisper => ResourceType::Ephemeral,
            KnowledgeType::Mark => ResourceType::Physical,
            KnowledgeType::Oath => ResourceType::Binding,
        }
    }

    pub fn from_resource(resource: ResourceType) -> Self {
        match resource {
            ResourceType::Ephemeral => KnowledgeType::Whisper,
            ResourceType::Physical => KnowledgeType::Mark,
            ResourceType::Binding => KnowledgeType::Oath,
        }
    }
}

/// A piece of information with weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: KnowledgeId,
    pub knowledge_type: KnowledgeType,
    pub content: String,

    /// Who or what provided it.
    pub source: Option<String>,

    pub base_weight: f64,
    pub is_truth: bool,
    pub is_terrible: bool,
    pub involves_self: bool,

    /// Derived from the fields above; kept in sync by every builder.
    pub total_weight: f64,

    /// Set when the item is added to a session.
    pub night_discovered: u32,
    pub discovered_at: Option<ElementId>,

    /// Passed on to someone else. Sharing does not lighten the load.
    #[serde(default)]
    pub has_been_shared: bool,
}

impl KnowledgeItem {
    /// Create a true, ordinary item with a base weight of 1.
    pub fn new(knowledge_type: KnowledgeType, content: impl Into<String>) -> Self {
        let mut item = Self {
            id: KnowledgeId::new(),
            knowledge_type,
            content: content.into(),
            source: None,
            base_weight: 1.0,
            is_truth: true,
            is_terrible: false,
            involves_self: false,
            total_weight: 0.0,
            night_discovered: 1,
            discovered_at: None,
            has_been_shared: false,
        };
        item.refresh_weight();
        item
    }

    pub fn whisper(content: impl Into<String>) -> Self {
        Self::new(KnowledgeType::Whisper, content)
    }

    pub fn mark(content: impl Into<String>) -> Self {
        Self::new(KnowledgeType::Mark, content)
    }

    pub fn oath(content: impl Into<String>) -> Self {
        Self::new(KnowledgeType::Oath, content)
    }

    /// Set the base weight. Negative or non-finite weights become 0.
    pub fn with_base_weight(mut self, weight: f64) -> Self {
        self.base_weight = sanitize_weight(weight);
        self.refresh_weight();
        self
    }

    pub fn terrible(mut self) -> Self {
        self.is_terrible = true;
        self.refresh_weight();
        self
    }

    pub fn involving_self(mut self) -> Self {
        self.involves_self = true;
        self.refresh_weight();
        self
    }

    pub fn as_lie(mut self) -> Self {
        self.is_truth = false;
        self.refresh_weight();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The true weight of this knowledge.
    ///
    /// Multipliers compose without a cap and in no particular order. A
    /// negative or non-finite base weight counts as 0.
    pub fn calculate_weight(&self) -> f64 {
        let mut weight = sanitize_weight(self.base_weight);
        if self.is_terrible {
            weight *= TERRIBLE_MULTIPLIER;
        }
        if self.involves_self {
            weight *= SELF_MULTIPLIER;
        }
        if !self.is_truth {
            weight *= LIE_MULTIPLIER;
        }
        weight
    }

    /// Recompute `total_weight` from the flags.
    pub fn refresh_weight(&mut self) -> f64 {
        self.total_weight = self.calculate_weight();
        self.total_weight
    }

    pub fn resource_type(&self) -> ResourceType {
        self.knowledge_type.resource_type()
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}
