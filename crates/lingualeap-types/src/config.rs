use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub practice: PracticeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    /// Sampling temperature; `None` leaves the provider default
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            api_base: None,
            temperature: None,
        }
    }
}

impl LlmConfig {
    pub fn base_url(&self) -> &str {
        self.api_base
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Topic used when the learner leaves the topic field blank
    pub default_topic: String,
    /// Id of the preselected difficulty level
    pub default_level: u8,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            default_topic: DEFAULT_TOPIC.to_string(),
            default_level: 4,
        }
    }
}

impl PracticeConfig {
    /// Resolve the topic typed by the learner, substituting the default when blank.
    pub fn resolve_topic(&self, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.default_topic.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Resolve a level id to the difficulty string sent to the model.
    /// Unknown ids fall back to the default level.
    pub fn resolve_difficulty(&self, level_id: u8) -> &'static str {
        DifficultyLevel::by_id(level_id)
            .or_else(|| DifficultyLevel::by_id(self.default_level))
            .map(|l| l.value)
            .unwrap_or(FALLBACK_DIFFICULTY)
    }
}

/// A selectable proficiency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyLevel {
    pub id: u8,
    pub label: &'static str,
    pub value: &'static str,
}

impl DifficultyLevel {
    pub fn all() -> &'static [DifficultyLevel] {
        DIFFICULTY_LEVELS
    }

    pub fn by_id(id: u8) -> Option<&'static DifficultyLevel> {
        DIFFICULTY_LEVELS.iter().find(|l| l.id == id)
    }
}

const DIFFICULTY_LEVELS: &[DifficultyLevel] = &[
    DifficultyLevel { id: 1, label: "Beginner", value: "Beginner (A1)" },
    DifficultyLevel { id: 2, label: "Elementary", value: "Elementary (A2)" },
    DifficultyLevel { id: 3, label: "Intermediate", value: "Intermediate (B1)" },
    DifficultyLevel { id: 4, label: "Upper-Intermediate", value: "Upper-Intermediate (B2)" },
    DifficultyLevel { id: 5, label: "Advanced", value: "Advanced (C1)" },
];

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TOPIC: &str = "general greetings";
const FALLBACK_DIFFICULTY: &str = "Upper-Intermediate (B2)";
