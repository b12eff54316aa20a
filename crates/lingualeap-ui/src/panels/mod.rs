pub mod chat;
pub mod dashboard;
pub mod header;
pub mod settings;
