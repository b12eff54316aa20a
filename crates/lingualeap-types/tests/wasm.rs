//! WASM-target tests for lingualeap-types.
//!
//! Runs under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use lingualeap_types::message::*;
use lingualeap_types::config::*;
use lingualeap_types::session::*;

#[wasm_bindgen_test]
fn sender_wire_names() {
    assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), r#""ai""#);
    let sender: Sender = serde_json::from_str(r#""user""#).unwrap();
    assert_eq!(sender, Sender::User);
}

#[wasm_bindgen_test]
fn seed_array_deserializes() {
    let json = r#"[
        {"sender": "ai", "text": "Hi!\n(Salam!)"},
        {"sender": "user", "text": "Hello.\n(Salam.)"}
    ]"#;
    let lines: Vec<DialogueLine> = serde_json::from_str(json).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].sender, Sender::User);
}

#[wasm_bindgen_test]
fn open_reply_is_open() {
    assert!(ChatMessage::open_reply().is_open());
    assert!(!ChatMessage::user("x").is_open());
}

// chrono's wasmbind feature and uuid's js feature are what make these work in the browser
#[wasm_bindgen_test]
fn conversation_info_has_id_and_timestamp() {
    let info = ConversationInfo::new("travel", "Beginner (A1)");
    assert_eq!(info.id.len(), 36);
    assert!(info.started_at.contains('T'));
}

#[wasm_bindgen_test]
fn default_practice_config() {
    let practice = PracticeConfig::default();
    assert_eq!(practice.resolve_topic(""), "general greetings");
    assert_eq!(practice.resolve_difficulty(practice.default_level), "Upper-Intermediate (B2)");
}

#[wasm_bindgen_test]
fn progress_accumulates() {
    let mut progress = ProgressData::default();
    progress.record_conversation();
    assert_eq!(progress, ProgressData { conversations: 1, xp: 10 });
}
