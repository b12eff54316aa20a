//! Chat panel: conversation header, two-part bubbles and the input row.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use lingualeap_core::prompts::{NATIVE_LANGUAGE, TARGET_LANGUAGE};
use lingualeap_types::message::{ChatMessage, MessageStatus};
use crate::state::UiState;
use crate::theme::*;

/// What the learner asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    None,
    /// Send this message
    Send(String),
    /// Read this English text aloud
    Speak(String),
    /// Back or End was pressed
    End,
}

/// Render the chat panel and return the learner's action.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> ChatAction {
    let mut action = ChatAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_max_width(CONTENT_MAX_WIDTH);

            // Header
            ui.horizontal(|ui| {
                if ui.button("←").on_hover_text("Back to dashboard").clicked() {
                    action = ChatAction::End;
                }
                ui.vertical(|ui| {
                    ui.label(RichText::new(&state.topic).color(TEXT_PRIMARY).strong());
                    ui.label(RichText::new(&state.difficulty).color(TEXT_SECONDARY).small());
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new(RichText::new("End").color(ACCENT).strong()).frame(false))
                        .clicked()
                    {
                        action = ChatAction::End;
                    }
                    let status_color = if state.last_error.is_some() {
                        ERROR
                    } else if state.is_loading() {
                        WARNING
                    } else {
                        TEXT_SECONDARY
                    };
                    ui.label(RichText::new(&state.status_text).color(status_color).small());
                });
            });

            ui.separator();

            // Messages area
            let available_height = ui.available_height() - 56.0;
            ScrollArea::vertical()
                .max_height(available_height)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in &state.messages {
                        // The typing indicator stands in for an empty open reply
                        if message.is_open() && message.text.is_empty() {
                            continue;
                        }
                        if let Some(text) = render_bubble(ui, message) {
                            action = ChatAction::Speak(text);
                        }
                        ui.add_space(6.0);
                    }

                    if state.is_initializing() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(24.0);
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(
                                    RichText::new("Preparing your conversation...")
                                        .color(TEXT_SECONDARY),
                                );
                            });
                        });
                    }

                    if state.is_ai_replying() {
                        typing_indicator(ui);
                    }
                });

            ui.add_space(8.0);

            // Input area
            ui.horizontal(|ui| {
                let loading = state.is_loading();
                let response = ui.add_enabled(
                    !loading,
                    egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 70.0),
                );

                let send_btn = ui.add_enabled(
                    state.can_send(),
                    egui::Button::new(RichText::new("Send").color(TEXT_ON_BUBBLE))
                        .fill(if state.can_send() { ACCENT } else { ACCENT_MUTED })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                );

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if enter || send_btn.clicked() {
                    if let Some(text) = state.take_input() {
                        action = ChatAction::Send(text);
                        response.request_focus();
                    }
                }
            });
        });

    action
}

/// Draw one bubble. Returns the English text when its speaker button was clicked.
fn render_bubble(ui: &mut egui::Ui, message: &ChatMessage) -> Option<String> {
    let is_user = message.sender.is_user();
    let fill = match message.status {
        MessageStatus::Error => ERROR,
        _ if is_user => USER_BUBBLE,
        _ => PARTNER_BUBBLE,
    };
    let layout = if is_user {
        Layout::right_to_left(Align::Min)
    } else {
        Layout::left_to_right(Align::Min)
    };
    let mut speak = None;

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH * 0.7);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{}:", TARGET_LANGUAGE))
                                .color(TEXT_ON_BUBBLE_MUTED)
                                .small()
                                .strong(),
                        );
                        if ui
                            .small_button("🔊")
                            .on_hover_text(format!("Read {} aloud", TARGET_LANGUAGE))
                            .clicked()
                        {
                            speak = Some(message.text.clone());
                        }
                    });
                    ui.label(RichText::new(&message.text).color(TEXT_ON_BUBBLE));

                    if let Some(translation) = &message.translation {
                        ui.separator();
                        ui.label(
                            RichText::new(format!("{}:", NATIVE_LANGUAGE))
                                .color(TEXT_ON_BUBBLE_MUTED)
                                .small()
                                .strong(),
                        );
                        ui.label(RichText::new(translation).color(TEXT_ON_BUBBLE));
                    }
                });
            });
    });

    speak
}

fn typing_indicator(ui: &mut egui::Ui) {
    ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
        egui::Frame::default()
            .fill(PARTNER_BUBBLE)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(12.0)
            .show(ui, |ui| {
                let t = ui.input(|i| i.time);
                // Cycle 1..=3 dots
                let dots = (t * 3.0) as usize % 3 + 1;
                ui.label(RichText::new("●".repeat(dots)).color(TEXT_ON_BUBBLE_MUTED));
            });
    });
}
