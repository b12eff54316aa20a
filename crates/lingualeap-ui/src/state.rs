//! UI-level state that drives rendering.
//! The chat part is a read-only projection of the conversation,
//! updated each frame by draining the EventBus.

use lingualeap_types::config::PracticeConfig;
use lingualeap_types::event::ConversationEvent;
use lingualeap_types::message::ChatMessage;
use lingualeap_types::session::ProgressData;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Chat,
}

/// State visible to UI panels
pub struct UiState {
    pub view: View,
    /// Topic of the active conversation
    pub topic: String,
    /// Difficulty string of the active conversation
    pub difficulty: String,
    /// Latest transcript snapshot
    pub messages: Vec<ChatMessage>,
    /// Seed dialogue is still being generated
    pub bootstrapping: bool,
    /// A reply is being streamed
    pub replying: bool,
    /// The canned seed was used instead of a generated one
    pub used_fallback: bool,
    pub progress: ProgressData,
    /// Dashboard topic field
    pub topic_input: String,
    /// Dashboard difficulty level id
    pub selected_level: u8,
    /// Chat input field
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::with_practice(&PracticeConfig::default())
    }

    pub fn with_practice(practice: &PracticeConfig) -> Self {
        Self {
            view: View::Dashboard,
            topic: String::new(),
            difficulty: String::new(),
            messages: Vec::new(),
            bootstrapping: false,
            replying: false,
            used_fallback: false,
            progress: ProgressData::default(),
            topic_input: String::new(),
            selected_level: practice.default_level,
            input_text: String::new(),
            show_settings: false,
            status_text: "Ready".to_string(),
            last_error: None,
        }
    }

    /// Switch to the chat view for a freshly started conversation.
    pub fn enter_chat(&mut self, topic: &str, difficulty: &str) {
        self.view = View::Chat;
        self.topic = topic.to_string();
        self.difficulty = difficulty.to_string();
        self.messages.clear();
        self.bootstrapping = true;
        self.replying = false;
        self.used_fallback = false;
        self.input_text.clear();
        self.last_error = None;
        self.status_text = "Preparing...".to_string();
    }

    /// Leave the chat view, crediting the finished conversation.
    pub fn end_conversation(&mut self) {
        if self.view != View::Chat {
            return;
        }
        self.progress.record_conversation();
        self.view = View::Dashboard;
        self.messages.clear();
        self.bootstrapping = false;
        self.replying = false;
        self.input_text.clear();
        self.status_text = "Ready".to_string();
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ConversationEvent>) {
        for event in events {
            match event {
                ConversationEvent::BootstrapStart { topic, difficulty } => {
                    self.topic = topic;
                    self.difficulty = difficulty;
                    self.bootstrapping = true;
                    self.status_text = "Preparing...".to_string();
                }
                ConversationEvent::BootstrapComplete { fallback } => {
                    if fallback {
                        log::warn!("Showing the built-in opening for {:?}", self.topic);
                    }
                    self.bootstrapping = false;
                    self.used_fallback = fallback;
                    self.status_text = if fallback {
                        "Offline starter dialogue".to_string()
                    } else {
                        "Ready".to_string()
                    };
                }
                ConversationEvent::TranscriptChanged { messages } => {
                    self.messages = messages;
                }
                ConversationEvent::TurnStart { .. } => {
                    self.replying = true;
                    self.last_error = None;
                    self.status_text = "Replying...".to_string();
                }
                ConversationEvent::TurnEnd { .. } => {
                    self.replying = false;
                    if self.last_error.is_none() {
                        self.status_text = "Ready".to_string();
                    }
                }
                ConversationEvent::Error { message } => {
                    log::error!("Conversation error shown to learner: {}", message);
                    self.status_text = format!("Error: {}", message);
                    self.last_error = Some(message);
                }
            }
        }
    }

    /// Bootstrapping or waiting on a reply; input is disabled meanwhile
    pub fn is_loading(&self) -> bool {
        self.bootstrapping || self.replying
    }

    /// Show the "Preparing your conversation..." indicator
    pub fn is_initializing(&self) -> bool {
        self.bootstrapping && self.messages.is_empty()
    }

    /// Show the typing indicator: a reply is pending but no text has arrived yet
    pub fn is_ai_replying(&self) -> bool {
        if !self.replying {
            return false;
        }
        match self.messages.last() {
            Some(last) => last.sender.is_user() || (last.is_open() && last.text.is_empty()),
            None => false,
        }
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading() && !self.input_text.trim().is_empty()
    }

    /// Take the trimmed chat input for sending, if allowed.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let text = self.input_text.trim().to_string();
        self.input_text.clear();
        Some(text)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
