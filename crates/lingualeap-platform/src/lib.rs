//! Browser adapters for the LinguaLeap core ports.

pub mod llm;
pub mod sse;
pub mod speech;
