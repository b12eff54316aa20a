//! Conversation runtime: one practice conversation from start to end.
//!
//! Pairs the session bootstrap with the transcript assembler:
//! 1. `start` seeds the transcript and creates the session context
//! 2. `send_user_message` appends the user's line, opens a reply,
//!    folds streamed fragments into it, then finalizes it
//! 3. A failed stream closes the reply with an error notice
//!
//! The session context lives here and is handed to each streaming call
//! explicitly; nothing else holds it.

use futures::StreamExt;
use lingualeap_types::{
    LingoError, Result,
    event::ConversationEvent,
    message::ChatMessage,
    session::ConversationInfo,
};
use crate::bootstrap::{bootstrap, SeedSource};
use crate::event_bus::EventBus;
use crate::ports::{GenerativePort, ReplyEvent, SessionContext};
use crate::transcript::{Transcript, TranscriptAssembler, ERROR_NOTICE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    Replying,
}

/// How a user turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed,
    /// The stream failed; the reply was replaced by an error notice
    Failed(String),
}

pub struct Conversation {
    pub info: ConversationInfo,
    pub state: ConversationState,
    seed_source: SeedSource,
    assembler: TranscriptAssembler,
    session: SessionContext,
    event_bus: EventBus,
    turn_counter: u64,
}

impl Conversation {
    /// Bootstrap a new conversation. Always succeeds; see `bootstrap`.
    ///
    /// This is async and must be spawned via `wasm_bindgen_futures::spawn_local`.
    pub async fn start(
        topic: &str,
        difficulty: &str,
        llm: &dyn GenerativePort,
        event_bus: EventBus,
    ) -> Self {
        event_bus.emit(ConversationEvent::BootstrapStart {
            topic: topic.to_string(),
            difficulty: difficulty.to_string(),
        });

        let seed = bootstrap(topic, difficulty, llm).await;
        let assembler = TranscriptAssembler::with_messages(seed.messages, event_bus.clone());

        event_bus.emit(ConversationEvent::BootstrapComplete {
            fallback: seed.source == SeedSource::Fallback,
        });

        Self {
            info: ConversationInfo::new(topic, difficulty),
            state: ConversationState::Idle,
            seed_source: seed.source,
            assembler,
            session: seed.session,
            event_bus,
            turn_counter: 0,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.assembler.transcript()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.assembler.transcript().messages()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn seed_source(&self) -> SeedSource {
        self.seed_source
    }

    /// Run one user turn: user line → streamed reply → finalized reply.
    ///
    /// Returns an error only when the message is rejected up front (empty,
    /// or a reply is still open). Stream failures end the turn normally
    /// with `TurnOutcome::Failed`.
    pub async fn send_user_message(
        &mut self,
        text: &str,
        llm: &dyn GenerativePort,
    ) -> Result<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LingoError::EmptyInput);
        }
        if self.assembler.has_open_turn() {
            return Err(LingoError::TurnInProgress);
        }

        self.turn_counter += 1;
        let turn_id = self.turn_counter;
        self.state = ConversationState::Replying;
        self.event_bus.emit(ConversationEvent::TurnStart { turn_id });

        self.assembler.begin_user_turn(text)?;
        self.assembler.begin_assistant_turn()?;

        let mut stream = llm.stream_reply(&self.session, text);
        let mut failure = None;

        // One fragment at a time; each fold completes before the next poll
        while let Some(event) = stream.next().await {
            match event {
                ReplyEvent::Delta(fragment) => {
                    log::debug!("Reply fragment: {} bytes", fragment.len());
                    self.assembler.fold_fragment(&fragment)?;
                }
                ReplyEvent::Done => break,
                ReplyEvent::Error(message) => {
                    failure = Some(message);
                    break;
                }
            }
        }

        let outcome = match failure {
            None => {
                if let Some(raw) = self.assembler.finalize() {
                    self.session.record_exchange(text, &raw);
                }
                TurnOutcome::Completed
            }
            Some(message) => {
                log::error!("Reply stream failed: {}", message);
                self.assembler.fail(ERROR_NOTICE);
                self.event_bus.emit(ConversationEvent::Error {
                    message: message.clone(),
                });
                TurnOutcome::Failed(message)
            }
        };

        self.state = ConversationState::Idle;
        self.event_bus.emit(ConversationEvent::TurnEnd { turn_id });
        Ok(outcome)
    }
}
