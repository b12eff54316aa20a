//! Transcript and the stream reconciler that mutates it.
//!
//! The transcript is append-only from the outside. The assembler is its
//! single writer: it remembers which entry is the open reply (by index)
//! together with the raw text folded into it so far, and only that entry
//! is ever changed after being appended.

use lingualeap_types::{
    LingoError, Result,
    event::ConversationEvent,
    message::{ChatMessage, MessageStatus},
};
use crate::event_bus::EventBus;
use crate::parser::parse_message_text;

/// Text shown in place of a reply whose stream failed
pub const ERROR_NOTICE: &str = "An error occurred. Please try again.";

/// Ordered conversation messages, earliest first
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }
}

/// The reply currently receiving fragments
#[derive(Debug)]
struct OpenReply {
    index: usize,
    raw: String,
}

/// Owns the transcript and applies one turn's mutations to it.
pub struct TranscriptAssembler {
    transcript: Transcript,
    open: Option<OpenReply>,
    event_bus: EventBus,
}

impl TranscriptAssembler {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            transcript: Transcript::new(),
            open: None,
            event_bus,
        }
    }

    /// Start from already-finalized messages, e.g. a parsed seed dialogue.
    pub fn with_messages(messages: Vec<ChatMessage>, event_bus: EventBus) -> Self {
        let mut assembler = Self::new(event_bus);
        for message in messages {
            assembler.transcript.push(message);
        }
        assembler.notify();
        assembler
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn has_open_turn(&self) -> bool {
        self.open.is_some()
    }

    /// Raw text folded into the open reply so far
    pub fn open_raw(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.raw.as_str())
    }

    /// Append a finalized user message.
    pub fn begin_user_turn(&mut self, text: &str) -> Result<()> {
        if self.open.is_some() {
            return Err(LingoError::TurnInProgress);
        }
        self.transcript.push(ChatMessage::user(text));
        self.notify();
        Ok(())
    }

    /// Append an empty open reply. Rejected while another reply is open.
    pub fn begin_assistant_turn(&mut self) -> Result<()> {
        if self.open.is_some() {
            return Err(LingoError::TurnInProgress);
        }
        let index = self.transcript.push(ChatMessage::open_reply());
        self.open = Some(OpenReply {
            index,
            raw: String::new(),
        });
        self.notify();
        Ok(())
    }

    /// Append a fragment to the open reply. The displayed text becomes the
    /// whole raw buffer; splitting off the translation waits for `finalize`.
    pub fn fold_fragment(&mut self, fragment: &str) -> Result<()> {
        let open = self.open.as_mut().ok_or(LingoError::NoOpenTurn)?;
        open.raw.push_str(fragment);
        let entry = &mut self.transcript.messages[open.index];
        entry.text.clear();
        entry.text.push_str(&open.raw);
        self.notify();
        Ok(())
    }

    /// Parse the open reply's raw buffer and close it.
    ///
    /// Returns the raw text of the closed reply, or `None` when no reply
    /// was open (calling it twice is harmless).
    pub fn finalize(&mut self) -> Option<String> {
        let open = self.open.take()?;
        let parsed = parse_message_text(&open.raw);
        let entry = &mut self.transcript.messages[open.index];
        entry.text = parsed.text;
        entry.translation = parsed.translation;
        entry.status = MessageStatus::Final;
        self.notify();
        Some(open.raw)
    }

    /// Close the open reply with an error notice in place of its partial
    /// text. Returns false when no reply was open.
    pub fn fail(&mut self, notice: &str) -> bool {
        let Some(open) = self.open.take() else {
            return false;
        };
        self.transcript.messages[open.index] = ChatMessage::error_notice(notice);
        self.notify();
        true
    }

    fn notify(&self) {
        self.event_bus.emit(ConversationEvent::TranscriptChanged {
            messages: self.transcript.messages.clone(),
        });
    }
}
