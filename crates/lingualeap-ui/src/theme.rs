//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(241, 245, 249);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_SURFACE: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 41, 59);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_BUBBLE: Color32 = Color32::from_rgb(255, 255, 255);
pub const TEXT_ON_BUBBLE_MUTED: Color32 = Color32::from_rgb(220, 235, 225);
pub const ACCENT: Color32 = Color32::from_rgb(22, 163, 74);
pub const ACCENT_MUTED: Color32 = Color32::from_rgb(134, 239, 172);
pub const USER_BUBBLE: Color32 = Color32::from_rgb(22, 163, 74);
pub const PARTNER_BUBBLE: Color32 = Color32::from_rgb(59, 130, 246);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const WARNING: Color32 = Color32::from_rgb(202, 138, 4);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(8);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(14);
pub const PANEL_PADDING: Vec2 = Vec2::new(16.0, 12.0);
pub const CONTENT_MAX_WIDTH: f32 = 760.0;

/// Apply the light theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_ON_BUBBLE);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 8.0);

    ctx.set_style(style);
}
