//! Message List Component
//!
//! Owns the per-message layout sessions and drives one render pass per
//! bubble each frame. Sizes realized while painting go back to each
//! bubble's observation bus; if any bubble still wants a corrective pass
//! another frame is requested.

use eframe::egui;
use uuid::Uuid;

use super::message_bubble;
use crate::egui_app::metrics::EguiMeasurer;
use crate::egui_app::theme::colors;
use crate::layout::{CachedMeasurer, MessageBubbleComposer, MessageListLayout};
use crate::shared::{LayoutConfig, Message};

/// Taps collected while painting, applied by the caller after the frame
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListOutput {
    pub status_taps: Vec<Uuid>,
    pub attachment_taps: Vec<(Uuid, usize)>,
}

pub struct MessageListView {
    layout: MessageListLayout,
    measurer: CachedMeasurer<EguiMeasurer>,
}

impl MessageListView {
    pub fn new(ctx: &egui::Context, config: LayoutConfig) -> Self {
        let capacity = config.cache_capacity();
        Self {
            measurer: CachedMeasurer::new(EguiMeasurer::new(ctx), capacity),
            layout: MessageListLayout::new(config),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    /// Drop cached measurements, e.g. after fonts changed
    pub fn clear_metrics(&self) {
        self.measurer.clear();
    }

    /// Render the message list
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        messages: &[Message],
        composer: &MessageBubbleComposer,
    ) -> ListOutput {
        let mut output = ListOutput::default();
        self.layout.sync(messages);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(8.0);
                if messages.is_empty() {
                    render_empty_state(ui);
                }

                self.layout.set_available_width(ui.available_width());
                for message in messages {
                    self.render_message(ui, message, composer, &mut output);
                }

                ui.add_space(8.0);
            });

        if self.layout.needs_rerender() {
            ui.ctx().request_repaint();
        }
        output
    }

    fn render_message(
        &mut self,
        ui: &mut egui::Ui,
        message: &Message,
        composer: &MessageBubbleComposer,
        output: &mut ListOutput,
    ) {
        let arrangement = match self.layout.render_pass(message, &self.measurer, composer) {
            Ok(arrangement) => arrangement,
            Err(error) => {
                tracing::warn!("Skipping message {}: {}", message.id, error);
                return;
            }
        };

        let bubble = message_bubble::render(ui, &arrangement, self.layout.config());
        if let Some(session) = self.layout.session(&message.id) {
            composer.emit_realized(&session.reporter(), &bubble.realized);
        }

        if bubble.status_tapped {
            output.status_taps.push(message.id);
        }
        if let Some(index) = bubble.attachment_tapped {
            output.attachment_taps.push((message.id, index));
        }
    }
}

/// Render empty state when no messages
fn render_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.colored_label(colors::TEXT_SECONDARY, "No messages yet");
        ui.add_space(8.0);
        ui.colored_label(colors::TEXT_SECONDARY, "Send a message to start the conversation");
    });
}
