//! Views
//!
//! Panels of the chat screen. Each frame the message list is painted first;
//! taps it collected are then routed through the composer's callbacks into
//! [`ChatState`].

use eframe::egui;

use super::components::{input_bar, media_picker, MessageListView};
use super::state::ChatState;
use super::theme::{colors, styles};
use crate::layout::MessageBubbleComposer;

/// Render the top bar with the conversation partner
pub fn render_top_bar(ctx: &egui::Context, state: &ChatState) {
    egui::TopBottomPanel::top("top_bar")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(&state.friend.name).strong());
                ui.colored_label(colors::TEXT_SECONDARY, format!("{} messages", state.messages.len()));
            });
        });
}

/// Render the input bar, the message list and the picker window
pub fn render_main_panel(
    ctx: &egui::Context,
    state: &mut ChatState,
    list: &mut MessageListView,
    composer: &MessageBubbleComposer,
) {
    egui::TopBottomPanel::bottom("input_bar")
        .frame(egui::Frame::new())
        .show(ctx, |ui| input_bar::render(ui, state));

    let output = egui::CentralPanel::default()
        .frame(styles::chat_area_frame())
        .show(ctx, |ui| list.render(ui, &state.messages, composer))
        .inner;

    for id in &output.status_taps {
        if let Some(message) = state.message(id) {
            composer.tap_status(message);
        }
    }
    for (id, index) in &output.attachment_taps {
        if let Some(message) = state.message(id) {
            composer.tap_attachment(message, *index);
        }
    }
    if state.process_resends() > 0 {
        ctx.request_repaint();
    }

    if let Some(medias) = media_picker::render(ctx, &mut state.picker) {
        state.send_medias(medias);
    }
    render_attachment_viewer(ctx, state);
}

/// Full-screen viewer for a tapped attachment
fn render_attachment_viewer(ctx: &egui::Context, state: &mut ChatState) {
    let Some(attachment) = state.opened_attachment() else {
        return;
    };

    let mut open = true;
    egui::Window::new("Attachment")
        .open(&mut open)
        .frame(styles::picker_frame())
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(colors::TEXT_DARK, attachment.url.as_str());
            ui.colored_label(colors::TEXT_SECONDARY, attachment.thumbnail_url());
        });
    if !open {
        state.close_attachment();
    }
}
