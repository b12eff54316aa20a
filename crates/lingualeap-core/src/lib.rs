//! LinguaLeap core: pure conversation logic behind port traits.

pub mod ports;
pub mod parser;
pub mod transcript;
pub mod prompts;
pub mod bootstrap;
pub mod conversation;
pub mod event_bus;

#[cfg(test)]
mod tests;
