//! Input Bar Component
//!
//! Text field, attachment button and send button under the message list.

use eframe::egui;

use crate::egui_app::state::ChatState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::messaging::MediaPickerMode;

/// Render the input bar
pub fn render(ui: &mut egui::Ui, state: &mut ChatState) {
    styles::input_bar_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());

        let pending = state.pending_medias().len();
        if pending > 0 {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_SECONDARY, format!("📎 {} attached", pending));
                if ui.small_button("✕").clicked() {
                    state.clear_pending_medias();
                }
            });
        }

        ui.horizontal(|ui| {
            if ui.button("📎").clicked() {
                state.picker.present(MediaPickerMode::Photos);
            }

            let response = ui.add(
                egui::TextEdit::singleline(&mut state.input)
                    .hint_text("Type a message...")
                    .desired_width(ui.available_width() - 40.0),
            );

            let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if response.lost_focus() && enter_pressed {
                state.send_input();
                response.request_focus();
            }

            let send_enabled = state.can_send();
            ui.add_enabled_ui(send_enabled, |ui| {
                if ui.button("➤").clicked() {
                    state.send_input();
                }
            });
        });
    });
}
