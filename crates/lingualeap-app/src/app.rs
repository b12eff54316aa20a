//! Main egui application: composes the panels and drives conversations.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, SidePanel, TopBottomPanel};

use lingualeap_core::conversation::{Conversation, TurnOutcome};
use lingualeap_core::event_bus::EventBus;
use lingualeap_core::ports::{GenerativePort, SpeechPort};
use lingualeap_platform::llm::GeminiProvider;
use lingualeap_platform::speech::WebSpeech;
use lingualeap_types::config::AppConfig;
use lingualeap_ui::panels::chat::{self, ChatAction};
use lingualeap_ui::panels::{dashboard, header, settings};
use lingualeap_ui::state::{UiState, View};
use lingualeap_ui::theme;

/// Filled once the spawned bootstrap finishes
type ConversationSlot = Rc<RefCell<Option<Conversation>>>;

/// The main application state
pub struct LinguaLeapApp {
    ui_state: UiState,
    config: AppConfig,
    /// Bus of the current conversation; replaced on every start and end
    event_bus: EventBus,
    conversation: Option<ConversationSlot>,
    llm: Rc<dyn GenerativePort>,
    speech: Rc<dyn SpeechPort>,
    first_frame: bool,
}

impl LinguaLeapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::default();
        let llm: Rc<dyn GenerativePort> = Rc::new(GeminiProvider::new(config.llm.clone()));
        let speech: Rc<dyn SpeechPort> = Rc::new(WebSpeech::new());
        if !speech.is_available() {
            log::warn!("Speech synthesis unavailable; speaker buttons will do nothing");
        }

        Self {
            ui_state: UiState::with_practice(&config.practice),
            config,
            event_bus: EventBus::new(),
            conversation: None,
            llm,
            speech,
            first_frame: true,
        }
    }

    fn rebuild_llm(&mut self) {
        self.llm = Rc::new(GeminiProvider::new(self.config.llm.clone()));
    }

    /// Resolve the dashboard inputs and bootstrap a conversation (async)
    fn start_conversation(&mut self, ctx: &egui::Context) {
        let topic = self.config.practice.resolve_topic(&self.ui_state.topic_input);
        let difficulty = self
            .config
            .practice
            .resolve_difficulty(self.ui_state.selected_level)
            .to_string();
        log::info!("Starting conversation: topic={}, difficulty={}", topic, difficulty);

        // Fresh bus so nothing from an earlier conversation reaches the UI
        self.event_bus.close();
        self.event_bus = EventBus::new();
        let slot: ConversationSlot = Rc::new(RefCell::new(None));
        self.conversation = Some(slot.clone());
        self.ui_state.enter_chat(&topic, &difficulty);

        let llm = self.llm.clone();
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let conversation = Conversation::start(&topic, &difficulty, llm.as_ref(), event_bus).await;
            *slot.borrow_mut() = Some(conversation);
            ctx.request_repaint();
        });
    }

    /// Dispatch a user message to the current conversation (async)
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let Some(slot) = self.conversation.clone() else {
            log::warn!("No active conversation; message dropped");
            return;
        };
        let llm = self.llm.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let Ok(mut guard) = slot.try_borrow_mut() else {
                log::warn!("A reply is still streaming; message dropped");
                return;
            };
            let Some(conversation) = guard.as_mut() else {
                log::warn!("Conversation is still starting; message dropped");
                return;
            };
            match conversation.send_user_message(&text, llm.as_ref()).await {
                Ok(TurnOutcome::Completed) => log::debug!("Turn completed"),
                Ok(TurnOutcome::Failed(message)) => log::warn!("Turn failed: {}", message),
                Err(e) => log::warn!("Message rejected: {}", e),
            }
            ctx.request_repaint();
        });
    }

    /// Leave the chat. An in-flight task keeps the old slot alive on its
    /// own; closing the bus makes it emit into the void.
    fn end_conversation(&mut self) {
        if let Some(slot) = self.conversation.take() {
            if let Ok(guard) = slot.try_borrow() {
                if let Some(conversation) = guard.as_ref() {
                    log::info!(
                        "Ending conversation {} ({} messages)",
                        conversation.info.id,
                        conversation.messages().len()
                    );
                }
            }
        }
        self.event_bus.close();
        if self.event_bus.dropped() > 0 {
            log::debug!("Discarded {} events from the ended conversation", self.event_bus.dropped());
        }
        self.event_bus = EventBus::new();
        self.ui_state.end_conversation();
    }

    fn speak(&mut self, text: &str) {
        if let Err(e) = self.speech.speak(text) {
            log::warn!("Speech failed: {}", e);
            self.ui_state.status_text = e.to_string();
        }
    }
}

impl eframe::App for LinguaLeapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the current conversation
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_loading() {
            ctx.request_repaint();
        }

        // ── Header ───────────────────────────────────────────
        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            if header::header_panel(ui, &self.ui_state.progress, self.ui_state.show_settings) {
                self.ui_state.show_settings = !self.ui_state.show_settings;
            }
            ui.add_space(8.0);
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    if settings::settings_panel(ui, &mut self.config.llm) {
                        self.rebuild_llm();
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| match self.ui_state.view {
                View::Dashboard => {
                    if dashboard::dashboard_panel(ui, &mut self.ui_state) {
                        self.start_conversation(ctx);
                    }
                }
                View::Chat => match chat::chat_panel(ui, &mut self.ui_state) {
                    ChatAction::None => {}
                    ChatAction::Send(text) => self.dispatch_message(text, ctx),
                    ChatAction::Speak(text) => self.speak(&text),
                    ChatAction::End => self.end_conversation(),
                },
            });
        });
    }
}
