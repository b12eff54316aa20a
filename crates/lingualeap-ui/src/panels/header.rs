//! Header with the app title, tagline and progress cards.

use egui::{self, Align, Layout, RichText};
use lingualeap_types::session::ProgressData;
use crate::theme::*;

pub const TITLE: &str = "LinguaLeap";
pub const TAGLINE: &str = "Master English with AI-powered Azerbaijani dialogues.";

/// Render the header. Returns true when the settings toggle was clicked.
pub fn header_panel(ui: &mut egui::Ui, progress: &ProgressData, settings_open: bool) -> bool {
    let mut toggle_settings = false;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(TITLE).color(TEXT_PRIMARY).strong().size(28.0));
            ui.label(RichText::new(TAGLINE).color(TEXT_SECONDARY));
        });

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.selectable_label(settings_open, "Settings").clicked() {
                toggle_settings = true;
            }
            ui.add_space(8.0);
            progress_card(ui, "XP", progress.xp);
            progress_card(ui, "Conversations", progress.conversations);
        });
    });

    toggle_settings
}

fn progress_card(ui: &mut egui::Ui, label: &str, value: u32) {
    egui::Frame::default()
        .fill(BG_SURFACE)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(label).color(TEXT_SECONDARY).small());
                ui.label(
                    RichText::new(value.to_string())
                        .color(TEXT_PRIMARY)
                        .strong()
                        .size(20.0),
                );
            });
        });
}
