//! Settings panel: Gemini model, API key and endpoint.
//! Values live in memory only and apply to the next request.

use egui::{self, RichText};
use lingualeap_types::config::LlmConfig;
use crate::theme::*;

/// Render the settings panel. Returns true when any field changed.
pub fn settings_panel(ui: &mut egui::Ui, llm: &mut LlmConfig) -> bool {
    let mut changed = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            ui.label(RichText::new("Gemini").color(ACCENT).strong());
            ui.add_space(2.0);

            // API Key (masked)
            ui.label(RichText::new("API Key").color(TEXT_SECONDARY).small());
            let api_key_edit = egui::TextEdit::singleline(&mut llm.api_key)
                .password(true)
                .hint_text("AIza...");
            if ui.add(api_key_edit).changed() {
                changed = true;
            }
            if llm.api_key.trim().is_empty() {
                ui.label(
                    RichText::new("Without a key, conversations start from a built-in dialogue and replies fail.")
                        .color(WARNING)
                        .small(),
                );
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Model").color(TEXT_SECONDARY).small());
            if ui.text_edit_singleline(&mut llm.model).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            // Custom base URL
            ui.label(RichText::new("API Base URL (optional)").color(TEXT_SECONDARY).small());
            let mut base_url = llm.api_base.clone().unwrap_or_default();
            let default_base = LlmConfig::default().base_url().to_string();
            if ui
                .add(egui::TextEdit::singleline(&mut base_url).hint_text(default_base))
                .changed()
            {
                llm.api_base = if base_url.trim().is_empty() {
                    None
                } else {
                    Some(base_url)
                };
                changed = true;
            }

            ui.add_space(4.0);

            // Temperature; unchecked leaves the model default
            let mut custom_temp = llm.temperature.is_some();
            if ui.checkbox(&mut custom_temp, "Custom temperature").changed() {
                llm.temperature = custom_temp.then_some(1.0);
                changed = true;
            }
            if let Some(temp) = llm.temperature.as_mut() {
                if ui.add(egui::Slider::new(temp, 0.0..=2.0)).changed() {
                    changed = true;
                }
            }
        });

    changed
}
