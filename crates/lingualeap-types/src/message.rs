use serde::{Deserialize, Serialize};

/// Who wrote a message. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    /// The conversation partner. Serialized as `"ai"` on the wire.
    #[serde(rename = "ai")]
    Assistant,
}

impl Sender {
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }
}

/// Lifecycle of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Assistant reply still receiving fragments
    Open,
    /// Closed normally; text and translation are settled
    Final,
    /// Closed with an error notice in place of a reply
    Error,
}

/// A single turn in the conversation, as displayed.
///
/// `translation` is only ever populated when the message is closed;
/// while a reply is open, `text` mirrors the raw accumulated buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub translation: Option<String>,
    pub status: MessageStatus,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            translation: None,
            status: MessageStatus::Final,
        }
    }

    /// A closed message with already-split text, e.g. a parsed seed line.
    pub fn settled(sender: Sender, text: impl Into<String>, translation: Option<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            translation,
            status: MessageStatus::Final,
        }
    }

    /// An empty assistant placeholder awaiting streamed fragments.
    pub fn open_reply() -> Self {
        Self {
            sender: Sender::Assistant,
            text: String::new(),
            translation: None,
            status: MessageStatus::Open,
        }
    }

    pub fn error_notice(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            translation: None,
            status: MessageStatus::Error,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == MessageStatus::Open
    }
}

/// A raw conversation line in the combined two-part format
/// (`"English text\n(translation)"`).
///
/// This is the shape of the structured seed response and of the
/// history handed to the remote chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub sender: Sender,
    pub text: String,
}

impl DialogueLine {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}
