//! LinguaLeap UI: egui panels and the state they render.
//!
//! Panels never talk to the conversation runtime directly. They read
//! `UiState` (a projection of `ConversationEvent`s) and hand user
//! intents back to the app as return values.

pub mod panels;
pub mod state;
pub mod theme;
