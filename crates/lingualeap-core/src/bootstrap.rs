//! Session bootstrap: seeds a new conversation.
//!
//! 1. Ask the model for a short sample dialogue (structured JSON)
//! 2. Validate its shape, falling back to a canned opening on any failure
//! 3. Parse each line for display
//! 4. Create the session context from the raw, unparsed lines

use lingualeap_types::{
    LingoError, Result,
    message::{ChatMessage, DialogueLine},
};
use serde_json::Value;
use crate::parser::parse_message_text;
use crate::ports::{GenerativePort, JsonRequest, SessionContext, SessionSetup};
use crate::prompts;

/// Where the seed dialogue came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Generated,
    Fallback,
}

/// Output of a bootstrap: display messages plus a fresh session.
#[derive(Debug, Clone)]
pub struct Seed {
    /// Parsed lines, ready for the transcript
    pub messages: Vec<ChatMessage>,
    /// The same lines in raw form, as given to the session history
    pub dialogue: Vec<DialogueLine>,
    pub session: SessionContext,
    pub source: SeedSource,
}

/// Produce the seed transcript and session context for a topic/difficulty.
///
/// Never fails: generation errors and malformed responses are logged and
/// replaced by the canned opening.
pub async fn bootstrap(topic: &str, difficulty: &str, llm: &dyn GenerativePort) -> Seed {
    let (dialogue, source) = match generate_seed(topic, difficulty, llm).await {
        Ok(lines) => (lines, SeedSource::Generated),
        Err(e) => {
            log::warn!("Seed dialogue unavailable ({}), using fallback", e);
            (prompts::fallback_seed(topic), SeedSource::Fallback)
        }
    };

    let messages = dialogue
        .iter()
        .map(|line| {
            let parsed = parse_message_text(&line.text);
            ChatMessage::settled(line.sender, parsed.text, parsed.translation)
        })
        .collect();

    let session = SessionContext::new(SessionSetup {
        system_instruction: prompts::system_instruction(topic, difficulty),
        history: dialogue.clone(),
    });

    log::info!(
        "Bootstrapped conversation on {:?} ({} seed lines, {:?})",
        topic,
        dialogue.len(),
        source
    );

    Seed {
        messages,
        dialogue,
        session,
        source,
    }
}

async fn generate_seed(
    topic: &str,
    difficulty: &str,
    llm: &dyn GenerativePort,
) -> Result<Vec<DialogueLine>> {
    let req = JsonRequest {
        prompt: prompts::seed_prompt(topic, difficulty),
        response_schema: prompts::seed_schema(),
    };
    let raw = llm.generate_json(req).await?;
    parse_seed_dialogue(&raw)
}

/// Validate a structured seed response.
///
/// The payload must be a non-empty JSON array whose elements all carry a
/// `sender` of `"user"` or `"ai"` and a string `text`. `[]` satisfies the
/// schema but is still rejected, so the learner gets the canned opening
/// instead of a blank chat.
pub fn parse_seed_dialogue(raw: &str) -> Result<Vec<DialogueLine>> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| LingoError::MalformedSeed(format!("invalid JSON: {}", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| LingoError::MalformedSeed("expected a JSON array".to_string()))?;

    if items.is_empty() {
        return Err(LingoError::MalformedSeed("dialogue is empty".to_string()));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<DialogueLine>(item.clone())
                .map_err(|e| LingoError::MalformedSeed(format!("message {}: {}", i, e)))
        })
        .collect()
}
