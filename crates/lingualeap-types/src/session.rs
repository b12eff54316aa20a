use serde::{Deserialize, Serialize};

/// Identity of one practice conversation, from the dashboard to "End".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationInfo {
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    pub started_at: String,
}

impl ConversationInfo {
    pub fn new(topic: impl Into<String>, difficulty: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.into(),
            difficulty: difficulty.into(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Learner progress, kept in memory for the page lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressData {
    pub conversations: u32,
    pub xp: u32,
}

/// XP awarded for each finished conversation
pub const XP_PER_CONVERSATION: u32 = 10;

impl ProgressData {
    pub fn record_conversation(&mut self) {
        self.conversations += 1;
        self.xp += XP_PER_CONVERSATION;
    }
}
