use serde::{Deserialize, Serialize};
use crate::message::ChatMessage;

/// Events emitted by a conversation.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConversationEvent {
    /// Seed dialogue generation started
    BootstrapStart { topic: String, difficulty: String },

    /// Seed dialogue is in place; `fallback` is true when the canned seed was used
    BootstrapComplete { fallback: bool },

    /// The transcript was mutated. Carries a full snapshot.
    TranscriptChanged { messages: Vec<ChatMessage> },

    /// A user message was accepted and a reply is being streamed
    TurnStart { turn_id: u64 },

    /// The reply finished (successfully or with an error notice)
    TurnEnd { turn_id: u64 },

    /// An error occurred
    Error { message: String },
}
