//! Conversations held during a session.

use rand::Rng;
use tracing::debug;
use world_forge::ElementId;

use super::SessionRuntime;
use crate::decay::degrade_text;
use crate::dialogue::{Conversation, ConversationId, DialogueContext, Exchange, Message, Speaker, TextGenerator};
use crate::error::{Result, SessionError};

impl SessionRuntime {
    /// Begin talking to a character. Clarity follows the text decay and
    /// coherence follows what the character still remembers.
    pub fn start_conversation(&mut self, character_id: ElementId) -> Result<ConversationId> {
        self.ensure_active()?;
        let memory = self.character(character_id)?.memory_intact;

        let floor = self.config.min_clarity;
        let conversation = Conversation::new(character_id, self.state.night_count)
            .at_location(self.state.current_location_id)
            .with_clarity(
                (1.0 - self.state.text_degradation).max(floor),
                memory.max(floor),
            );
        let id = conversation.id;

        debug!(
            session = %self.state.id,
            conversation = %id,
            character = %character_id,
            clarity = conversation.text_clarity,
            coherence = conversation.response_coherence,
            "Conversation started"
        );

        self.state.conversations.push(conversation);
        Ok(id)
    }

    pub fn conversation(&self, conversation_id: ConversationId) -> Result<&Conversation> {
        self.state
            .conversations
            .iter()
            .find(|c| c.id == conversation_id)
            .ok_or(SessionError::ConversationNotFound(conversation_id))
    }

    fn conversation_mut(&mut self, conversation_id: ConversationId) -> Result<&mut Conversation> {
        self.state
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or(SessionError::ConversationNotFound(conversation_id))
    }

    /// Prompt context for a character in an open conversation.
    pub fn dialogue_context(&self, conversation_id: ConversationId) -> Result<DialogueContext> {
        let conversation = self.conversation(conversation_id)?;
        let character = self
            .world
            .character(conversation.character_id)
            .ok_or(SessionError::CharacterNotFound(conversation.character_id))?;
        let memory = self.character(conversation.character_id)?.memory_intact;

        let limit = self.config.dialogue_knowledge_limit;
        let items = &self.state.knowledge_items;
        let known = items[items.len().saturating_sub(limit)..]
            .iter()
            .map(|k| k.content.clone())
            .collect();

        Ok(DialogueContext::assemble(
            character,
            memory,
            self.state.world_entropy,
            conversation,
            known,
        ))
    }

    /// Say something and hear the reply, as degraded as the night has made
    /// it. The witness's own words decay too.
    pub fn converse<G, R>(
        &mut self,
        conversation_id: ConversationId,
        content: &str,
        generator: &mut G,
        rng: &mut R,
    ) -> Result<Exchange>
    where
        G: TextGenerator + ?Sized,
        R: Rng + ?Sized,
    {
        self.ensure_active()?;
        if !self.conversation(conversation_id)?.is_active {
            return Err(SessionError::ConversationEnded(conversation_id));
        }

        let prompt = self
            .dialogue_context(conversation_id)?
            .with_witness_line(content)
            .to_prompt_string();
        let reply = generator.generate(&prompt)?;

        let level = self.state.text_degradation;
        let said = Message {
            speaker: Speaker::Witness,
            original_content: content.to_string(),
            degraded_content: degrade_text(content, level, rng),
            degradation_level: level,
        };
        let reply = Message {
            speaker: Speaker::Character,
            degraded_content: degrade_text(&reply, level, rng),
            original_content: reply,
            degradation_level: level,
        };

        let conversation = self.conversation_mut(conversation_id)?;
        conversation.messages.push(said.clone());
        conversation.messages.push(reply.clone());

        Ok(Exchange { said, reply })
    }

    /// Close a conversation. The character forgets a little of it.
    pub fn end_conversation(&mut self, conversation_id: ConversationId) -> Result<&Conversation> {
        self.ensure_active()?;
        let loss = self.config.conversation_memory_loss;

        let conversation = self.conversation_mut(conversation_id)?;
        if !conversation.is_active {
            return Err(SessionError::ConversationEnded(conversation_id));
        }
        conversation.is_active = false;
        let character_id = conversation.character_id;

        if let Some(character) = self.state.character_mut(character_id) {
            character.forget(loss);
        }

        debug!(session = %self.state.id, conversation = %conversation_id, "Conversation ended");
        self.conversation(conversation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::GenerationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use world_forge::{KeyCharacter, PartitionedSource, WorldConfigAssembler};

    struct Echo {
        prompts: Vec<String>,
    }

    impl TextGenerator for Echo {
        fn generate(&mut self, prompt: &str) -> std::result::Result<String, GenerationError> {
            self.prompts.push(prompt.to_string());
            Ok("The bread is cold tonight".to_string())
        }
    }

    struct Silent;

    impl TextGenerator for Silent {
        fn generate(&mut self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            Err(GenerationError("no voice left".to_string()))
        }
    }

    fn session() -> (SessionRuntime, ElementId) {
        let mut world = WorldConfigAssembler::with_defaults().assemble(&PartitionedSource::new());
        let baker = KeyCharacter {
            id: ElementId::new(),
            name: "Old Baker".to_string(),
            description: "Bakes bread no one eats.".to_string(),
            traits: Vec::new(),
            power: 4,
            reputation: 20,
        };
        let id = baker.id;
        world.key_characters.push(baker);
        (SessionRuntime::start(Arc::new(world), "Pip"), id)
    }

    #[test]
    fn test_start_conversation() {
        let (mut session, baker) = session();
        let id = session.start_conversation(baker).unwrap();
        let conversation = session.conversation(id).unwrap();

        assert_eq!(conversation.night_occurred, 1);
        assert_eq!(conversation.text_clarity, 1.0);
        assert_eq!(conversation.response_coherence, 1.0);
        assert!(conversation.is_active);
    }

    #[test]
    fn test_unknown_character() {
        let (mut session, _) = session();
        let missing = ElementId::new();
        assert!(matches!(
            session.start_conversation(missing),
            Err(SessionError::CharacterNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_clarity_floor() {
        let (mut session, baker) = session();
        for _ in 0..60 {
            session.advance_night().unwrap();
        }
        let id = session.start_conversation(baker).unwrap();
        assert!((session.conversation(id).unwrap().text_clarity - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_converse() {
        let (mut session, baker) = session();
        let id = session.start_conversation(baker).unwrap();
        let mut generator = Echo { prompts: Vec::new() };
        let mut rng = StdRng::seed_from_u64(3);

        let exchange = session
            .converse(id, "Who are you?", &mut generator, &mut rng)
            .unwrap();

        assert_eq!(exchange.reply.original_content, "The bread is cold tonight");
        assert_eq!(exchange.reply.degraded_content, "The bread is cold tonight");
        assert_eq!(exchange.said.speaker, Speaker::Witness);
        assert!(generator.prompts[0].contains("You are Old Baker"));
        assert!(generator.prompts[0].contains("The night has no intention of ending"));
        assert_eq!(session.conversation(id).unwrap().messages.len(), 2);
    }

    #[test]
    fn test_converse_degrades_reply() {
        let (mut session, baker) = session();
        for _ in 0..40 {
            session.advance_night().unwrap();
        }
        let id = session.start_conversation(baker).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let exchange = session
            .converse(id, "Who are you?", &mut Echo { prompts: Vec::new() }, &mut rng)
            .unwrap();

        assert_eq!(exchange.reply.degraded_content.chars().count(), 25 / 3);
    }

    #[test]
    fn test_generation_failure() {
        let (mut session, baker) = session();
        let id = session.start_conversation(baker).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let result = session.converse(id, "Hello?", &mut Silent, &mut rng);
        assert!(matches!(result, Err(SessionError::Generation(_))));
        assert!(session.conversation(id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_end_conversation() {
        let (mut session, baker) = session();
        let id = session.start_conversation(baker).unwrap();
        session.end_conversation(id).unwrap();

        assert!((session.character(baker).unwrap().memory_intact - 0.98).abs() < 1e-9);
        assert!(matches!(session.end_conversation(id), Err(SessionError::ConversationEnded(_))));

        let mut rng = StdRng::seed_from_u64(3);
        let result = session.converse(id, "Wait", &mut Echo { prompts: Vec::new() }, &mut rng);
        assert!(matches!(result, Err(SessionError::ConversationEnded(_))));

        let again = session.start_conversation(baker).unwrap();
        assert!((session.conversation(again).unwrap().response_coherence - 0.98).abs() < 1e-9);
    }
}
