//! Dashboard: pick a difficulty and topic, then start a conversation.

use egui::{self, RichText, Vec2};
use lingualeap_types::config::DifficultyLevel;
use crate::state::UiState;
use crate::theme::*;

/// Render the dashboard. Returns true when "Start Learning" was pressed.
///
/// The caller resolves the topic and level through `PracticeConfig`.
pub fn dashboard_panel(ui: &mut egui::Ui, state: &mut UiState) -> bool {
    let mut start = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.set_max_width(CONTENT_MAX_WIDTH);
            ui.label(
                RichText::new("Start a New Conversation")
                    .color(ACCENT)
                    .strong()
                    .size(22.0),
            );
            ui.add_space(12.0);

            ui.label(RichText::new("Difficulty Level").color(TEXT_PRIMARY).strong());
            ui.horizontal_wrapped(|ui| {
                for level in DifficultyLevel::all() {
                    ui.radio_value(&mut state.selected_level, level.id, level.label);
                }
            });
            ui.add_space(12.0);

            ui.label(RichText::new("Conversation Topic").color(TEXT_PRIMARY).strong());
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.topic_input)
                    .hint_text("E.g., \"ordering food\", or leave blank for \"general greetings\"")
                    .desired_width(f32::INFINITY),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(12.0);

            let button = ui.add(
                egui::Button::new(RichText::new("Start Learning").color(TEXT_ON_BUBBLE).strong())
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(140.0, 32.0)),
            );
            start = button.clicked() || submitted;
        });

    start
}
