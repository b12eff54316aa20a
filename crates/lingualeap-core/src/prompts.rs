//! Prompt text and the structured-output schema for seed dialogues.
//!
//! The schema uses the Gemini schema dialect (upper-case type names).

use lingualeap_types::message::{DialogueLine, Sender};
use serde_json::{json, Value};

/// Name the conversation partner goes by
pub const PARTNER_NAME: &str = "Alex";
/// Language the learner is practising
pub const TARGET_LANGUAGE: &str = "English";
/// Learner's native language, used for the parenthesized translations
pub const NATIVE_LANGUAGE: &str = "Azerbaijani";

/// Prompt for the one-shot sample dialogue that opens a conversation.
pub fn seed_prompt(topic: &str, difficulty: &str) -> String {
    format!(
        r#"Generate a short, 4-5 message example conversation in {target} between two friends.
One friend, named {partner} (the AI), is helping their native {native}-speaking friend practice {target}.
The topic is "{topic}".
The proficiency level of the learner is {difficulty}.
The conversation should be casual, natural, and encouraging, like a normal chat between friends.
The first message should be from {partner}.
For EVERY message (both 'user' and 'ai'), the 'text' field MUST contain the {target} message, followed by a newline, and then the {native} translation in parentheses. Example for any message: "Let's talk about traveling.\n(Gəlin səyahət haqqında danışaq.)"
Provide the output as a JSON array of objects, where each object has a "sender" ('user' or 'ai') and a "text" (the message) field."#,
        target = TARGET_LANGUAGE,
        native = NATIVE_LANGUAGE,
        partner = PARTNER_NAME,
    )
}

/// Response schema for `seed_prompt`: an array of `{sender, text}` objects.
pub fn seed_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "sender": {
                    "type": "STRING",
                    "enum": ["user", "ai"],
                    "description": "Either 'user' or 'ai'"
                },
                "text": {
                    "type": "STRING",
                    "description": "The content of the message."
                }
            },
            "required": ["sender", "text"]
        }
    })
}

/// System instruction for the chat session that continues the seed.
pub fn system_instruction(topic: &str, difficulty: &str) -> String {
    format!(
        r#"You are {partner}, an AI conversation partner.
You are chatting with a friend who is a native {native} speaker and wants to practice their {target}.
The chosen topic is: "{topic}".
Their proficiency level is: {difficulty}.

Your primary goals are:
1. Engage your friend in a casual, natural, and friendly conversation in {target}, like you would with any friend.
2. Keep your language appropriate for their proficiency level.
3. Focus on having a normal, flowing conversation. Do not act like a formal teacher or correct their mistakes. The goal is practice, not a lesson.
4. For EVERY response you provide, you MUST follow this format: first, the {target} sentence, then a newline character '\n', and then the {native} translation in parentheses. For example: "That's a great perspective.\n(Bu əla bir perspektivdir)".
5. A sample conversation has been provided as history. Continue the conversation naturally from where it left off, maintaining the required response format.
6. Do not use markdown in your response."#,
        target = TARGET_LANGUAGE,
        native = NATIVE_LANGUAGE,
        partner = PARTNER_NAME,
    )
}

/// Canned opening used when the sample dialogue cannot be generated.
/// Both lines come from the partner and both mention the topic.
pub fn fallback_seed(topic: &str) -> Vec<DialogueLine> {
    vec![
        DialogueLine::new(
            Sender::Assistant,
            format!(
                "Hello! I see you want to talk about {topic}.\n(Salam! Görürəm ki, {topic} haqqında danışmaq istəyirsiniz.)"
            ),
        ),
        DialogueLine::new(
            Sender::Assistant,
            format!(
                "To get us started, what is one thing you find interesting about {topic}?\n(Başlamaq üçün, {topic} mövzusunda sizə maraqlı gələn bir şey nədir?)"
            ),
        ),
    ]
}
