//! Theme Styling Functions
//!
//! Frame builders for the host chrome and for bubbles described by a
//! [`BubbleArrangement`].

use eframe::egui::{self, CornerRadius, Stroke};

use super::colors;
use crate::layout::BubbleArrangement;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::MAIN_CHAT_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::BUBBLE_BORDER);
    style.visuals.panel_fill = colors::MAIN_CHAT_BG;

    style.visuals.widgets.noninteractive.bg_fill = colors::INPUT_BG;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_DARK);

    style.visuals.widgets.inactive.bg_fill = colors::INPUT_BG;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_DARK);

    style.visuals.widgets.hovered.bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::SELECTION;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Frame for the scrolling chat area
pub fn chat_area_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::MAIN_CHAT_BG)
        .inner_margin(egui::Margin::same(0))
}

/// Frame for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Frame for the input bar
pub fn input_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::INPUT_BG)
        .stroke(Stroke::new(1.0, colors::INPUT_BAR_BORDER))
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Frame for a bubble.
///
/// Media-only bubbles get no background; their grid is clipped to the
/// corner radius instead.
pub fn bubble_frame(arrangement: &BubbleArrangement) -> egui::Frame {
    let radius = corner_radius(arrangement.corner_radius);
    match arrangement.background {
        Some(background) => egui::Frame::new()
            .fill(colors::color32(background))
            .corner_radius(radius),
        None => egui::Frame::new().corner_radius(radius),
    }
}

pub fn corner_radius(radius: f32) -> CornerRadius {
    CornerRadius::same(radius.round().clamp(0.0, u8::MAX as f32) as u8)
}

/// Frame for the media picker window
pub fn picker_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::MAIN_CHAT_BG)
        .stroke(Stroke::new(2.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: egui::Color32::from_black_alpha(60),
        })
}
