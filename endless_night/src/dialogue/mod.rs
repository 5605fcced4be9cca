//! Dialogue - conversations with the world's characters, and the prompt
//! context handed to whatever produces their replies.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use world_forge::{ElementId, KeyCharacter};

/// Unique identifier for conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who said it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Witness,
    Character,
    Narrator,
}

/// A single line of a conversation, as said and as it survived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub speaker: Speaker,
    pub original_content: String,
    pub degraded_content: String,
    pub degradation_level: f64,
}

/// A dialogue with a character in the degrading world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub character_id: ElementId,
    pub location_id: Option<ElementId>,
    pub night_occurred: u32,

    /// How clear the text appears.
    pub text_clarity: f64,

    /// How coherent the character's replies are.
    pub response_coherence: f64,

    /// How often the character tells the truth.
    pub truth_tendency: f64,

    pub is_active: bool,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(character_id: ElementId, night_occurred: u32) -> Self {
        Self {
            id: ConversationId::new(),
            character_id,
            location_id: None,
            night_occurred,
            text_clarity: 1.0,
            response_coherence: 1.0,
            truth_tendency: 0.5,
            is_active: true,
            messages: Vec::new(),
        }
    }

    pub fn at_location(mut self, location_id: Option<ElementId>) -> Self {
        self.location_id = location_id;
        self
    }

    pub fn with_clarity(mut self, text_clarity: f64, response_coherence: f64) -> Self {
        self.text_clarity = text_clarity;
        self.response_coherence = response_coherence;
        self
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// One round of a conversation: what the witness said and what came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub said: Message,
    pub reply: Message,
}

/// Failure reported by a [`TextGenerator`].
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GenerationError(pub String);

/// Produces in-character replies from an assembled prompt.
pub trait TextGenerator {
    fn generate(&mut self, prompt: &str) -> Result<String, GenerationError>;
}

/// Everything a text generator needs to speak as a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueContext {
    pub character_name: String,
    pub personality: String,
    pub nights: u32,
    pub memory_percent: u32,
    pub entropy_percent: u32,
    pub clarity_percent: u32,
    pub truthfulness_percent: u32,

    /// The most recent knowledge the witness carries, oldest first.
    pub known: Vec<String>,

    /// The witness's latest words, if any.
    pub witness_says: Option<String>,
}

impl DialogueContext {
    /// Build the context for a conversation with `character`.
    pub fn assemble(
        character: &KeyCharacter,
        memory_intact: f64,
        world_entropy: f64,
        conversation: &Conversation,
        known: Vec<String>,
    ) -> Self {
        Self {
            character_name: character.name.clone(),
            personality: personality(character),
            nights: conversation.night_occurred,
            memory_percent: percent(memory_intact),
            entropy_percent: percent(world_entropy),
            clarity_percent: percent(conversation.response_coherence),
            truthfulness_percent: percent(conversation.truth_tendency),
            known,
            witness_says: None,
        }
    }

    pub fn with_witness_line(mut self, line: impl Into<String>) -> Self {
        self.witness_says = Some(line.into());
        self
    }

    /// Format the context as a prompt string.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are {} in a world that has been through {} endless nights.\n\n",
            self.character_name, self.nights
        ));
        prompt.push_str(&format!("Your memories are {}% intact.\n", self.memory_percent));
        prompt.push_str(&format!("The world is {}% degraded.\n\n", self.entropy_percent));

        if !self.personality.is_empty() {
            prompt.push_str(&self.personality);
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!("Speech clarity: {}%\n", self.clarity_percent));
        prompt.push_str(&format!("Truthfulness: {}%\n\n", self.truthfulness_percent));

        if !self.known.is_empty() {
            prompt.push_str("## The witness carries\n");
            for item in &self.known {
                prompt.push_str(&format!("- {}\n", item));
            }
            prompt.push('\n');
        }

        prompt.push_str("Remember: You exist in a degrading world. Act accordingly.\n");
        prompt.push_str("Sometimes you forget. Sometimes you pretend to forget.\n");

        if let Some(line) = &self.witness_says {
            prompt.push_str(&format!("\nThe witness says: \"{}\"\n", line));
        }

        prompt
    }
}

fn personality(character: &KeyCharacter) -> String {
    let mut text = character.description.trim().to_string();
    if !character.traits.is_empty() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("You are {}.", character.traits.join(", ")));
    }
    text
}

fn percent(value: f64) -> u32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baker() -> KeyCharacter {
        KeyCharacter {
            id: ElementId::new(),
            name: "Old Baker".to_string(),
            description: "Bakes bread no one eats.".to_string(),
            traits: vec!["tired".to_string(), "kind".to_string()],
            power: 4,
            reputation: 20,
        }
    }

    #[test]
    fn test_conversation_defaults() {
        let conversation = Conversation::new(ElementId::new(), 3);
        assert!(conversation.is_active);
        assert_eq!(conversation.truth_tendency, 0.5);
        assert!(conversation.last_message().is_none());
    }

    #[test]
    fn test_prompt_contents() {
        let character = baker();
        let conversation = Conversation::new(character.id, 12).with_clarity(0.8, 0.9);
        let context = DialogueContext::assemble(
            &character,
            0.96,
            0.11,
            &conversation,
            vec!["The well is dry".to_string()],
        )
        .with_witness_line("Who are you?");

        let prompt = context.to_prompt_string();
        assert!(prompt.starts_with("You are Old Baker in a world that has been through 12 endless nights."));
        assert!(prompt.contains("Your memories are 96% intact."));
        assert!(prompt.contains("The world is 11% degraded."));
        assert!(prompt.contains("You are tired, kind."));
        assert!(prompt.contains("Speech clarity: 90%"));
        assert!(prompt.contains("Truthfulness: 50%"));
        assert!(prompt.contains("- The well is dry"));
        assert!(prompt.contains("The witness says: \"Who are you?\""));
    }

    #[test]
    fn test_prompt_skips_empty_sections() {
        let mut character = baker();
        character.description.clear();
        character.traits.clear();
        let conversation = Conversation::new(character.id, 1);
        let prompt =
            DialogueContext::assemble(&character, 1.0, 0.0, &conversation, Vec::new()).to_prompt_string();

        assert!(!prompt.contains("## The witness carries"));
        assert!(!prompt.contains("The witness says"));
    }
}
