//! Port traits at the hexagonal architecture boundary.
//!
//! These traits are defined here in `lingualeap-core` (pure Rust).
//! Implementations live in `lingualeap-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use lingualeap_types::{
    Result,
    message::{DialogueLine, Sender},
};

// ─── Generative Language Port ────────────────────────────────

/// One-shot request whose output is constrained to a JSON schema
#[derive(Debug, Clone)]
pub struct JsonRequest {
    pub prompt: String,
    /// Response schema in the provider's schema dialect
    pub response_schema: Value,
}

/// Streaming event from a chat reply
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyEvent {
    /// A partial piece of reply text
    Delta(String),
    /// Stream finished
    Done,
    /// Error during streaming
    Error(String),
}

/// Configuration a chat session is created with
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub system_instruction: String,
    /// Prior conversation in the raw two-part format
    pub history: Vec<DialogueLine>,
}

/// Conversational state sent with every streamed reply.
///
/// The remote service keeps no server-side chat state, so the session is
/// the system instruction plus the raw history accumulated so far. One
/// value exists per conversation; starting a new conversation builds a
/// new one.
#[derive(Debug, Clone)]
pub struct SessionContext {
    system_instruction: String,
    history: Vec<DialogueLine>,
}

impl SessionContext {
    pub fn new(setup: SessionSetup) -> Self {
        Self {
            system_instruction: setup.system_instruction,
            history: setup.history,
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[DialogueLine] {
        &self.history
    }

    /// Append a completed user/reply exchange to the history.
    pub(crate) fn record_exchange(&mut self, user_text: &str, raw_reply: &str) {
        self.history.push(DialogueLine::new(Sender::User, user_text));
        self.history.push(DialogueLine::new(Sender::Assistant, raw_reply));
    }
}

#[async_trait(?Send)]
pub trait GenerativePort {
    /// One-shot structured generation. Returns the raw JSON text.
    async fn generate_json(&self, req: JsonRequest) -> Result<String>;

    /// Send `user_text` in the given session and stream the reply.
    ///
    /// The stream is finite and single-pass. Dropping it stops consumption;
    /// the underlying request is not guaranteed to be aborted.
    fn stream_reply(
        &self,
        session: &SessionContext,
        user_text: &str,
    ) -> Pin<Box<dyn Stream<Item = ReplyEvent>>>;
}

// ─── Speech Port ─────────────────────────────────────────────

pub trait SpeechPort {
    /// Read `text` aloud, interrupting anything currently being spoken
    fn speak(&self, text: &str) -> Result<()>;

    /// Whether the platform offers speech synthesis at all
    fn is_available(&self) -> bool;
}
