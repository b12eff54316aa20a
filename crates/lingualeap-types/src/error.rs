use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LingoError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed seed dialogue: {0}")]
    MalformedSeed(String),

    #[error("A reply is still in progress")]
    TurnInProgress,

    #[error("No reply is in progress")]
    NoOpenTurn,

    #[error("Message is empty")]
    EmptyInput,

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for LingoError {
    fn from(e: serde_json::Error) -> Self {
        LingoError::Serialization(e.to_string())
    }
}
