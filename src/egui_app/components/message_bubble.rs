//! Message Bubble Component
//!
//! Paints one [`BubbleArrangement`] and returns the sizes egui actually
//! realized for the avatar, status glyph and timestamp, plus any taps.

use std::sync::Arc;

use eframe::egui::{self, Align, Align2, Color32, FontId, Galley, Layout, Pos2, Rect, Sense, Stroke, Vec2};

use crate::egui_app::metrics::EguiMeasurer;
use crate::egui_app::theme::{colors, styles};
use crate::layout::{
    AvatarSlot, BubbleArrangement, ContentBlock, MeasuredSize, RowSlot, Size, SizeTag, StatusSlot,
    TextBlock, TextTimestamp, TimestampView,
};
use crate::shared::config::WaveformColors;
use crate::shared::{Attachment, AttachmentKind, LayoutConfig, Recording};

/// What one painted bubble reports back
#[derive(Debug, Default)]
pub struct BubbleOutput {
    pub realized: Vec<MeasuredSize>,
    pub status_tapped: bool,
    pub attachment_tapped: Option<usize>,
}

impl BubbleOutput {
    fn realize(&mut self, tag: SizeTag, size: Vec2) {
        if self.realized.iter().any(|measured| measured.tag == tag) {
            return;
        }
        self.realized.push(MeasuredSize::new(tag, Size::new(size.x, size.y)));
    }
}

/// Render a message bubble row
pub fn render(ui: &mut egui::Ui, arrangement: &BubbleArrangement, config: &LayoutConfig) -> BubbleOutput {
    let mut output = BubbleOutput::default();
    let fonts = Fonts::new(config);

    ui.add_space(arrangement.top_padding);

    // The spacer becomes the row direction: local rows hug the right edge
    let layout = if arrangement.is_current_user {
        Layout::right_to_left(Align::Max)
    } else {
        Layout::left_to_right(Align::Max)
    };
    let slots: Vec<&RowSlot> = if arrangement.is_current_user {
        arrangement.row.iter().rev().collect()
    } else {
        arrangement.row.iter().collect()
    };

    ui.with_layout(layout, |ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for slot in slots {
            match slot {
                RowSlot::Spacer => {}
                RowSlot::Avatar(avatar) => paint_avatar(ui, avatar, &mut output),
                RowSlot::Status(status) => paint_status(ui, status, &mut output),
                RowSlot::Bubble => {
                    ui.add_space(if arrangement.is_current_user {
                        arrangement.trailing_padding
                    } else {
                        arrangement.leading_padding
                    });
                    paint_bubble(ui, arrangement, &fonts, &mut output);
                    ui.add_space(if arrangement.is_current_user {
                        arrangement.leading_padding
                    } else {
                        arrangement.trailing_padding
                    });
                }
            }
        }
    });

    output
}

struct Fonts {
    body: FontId,
    time: FontId,
}

impl Fonts {
    fn new(config: &LayoutConfig) -> Self {
        let resolve = |font: &crate::layout::FontDescriptor| {
            EguiMeasurer::font_id(font).unwrap_or_else(|error| {
                tracing::warn!("Falling back to default font: {}", error);
                FontId::proportional(font.size.max(1.0))
            })
        };
        Self {
            body: resolve(&config.body_font),
            time: resolve(&config.time_font),
        }
    }
}

fn paint_avatar(ui: &mut egui::Ui, avatar: &AvatarSlot, output: &mut BubbleOutput) {
    let size = Vec2::new(avatar.size + avatar.horizontal_padding * 2.0, avatar.size);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    if avatar.visible {
        ui.painter()
            .circle_filled(rect.center(), avatar.size / 2.0, colors::AVATAR_FILL);
    }
    output.realize(SizeTag::Avatar, rect.size());
}

fn paint_status(ui: &mut egui::Ui, status: &StatusSlot, output: &mut BubbleOutput) {
    let size = Vec2::new(status.size + status.horizontal_padding, status.size);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let glyph_rect = Rect::from_min_size(
        Pos2::new(rect.max.x - status.size, rect.min.y),
        Vec2::splat(status.size),
    );
    ui.painter().text(
        glyph_rect.center(),
        Align2::CENTER_CENTER,
        status.status.glyph(),
        FontId::proportional(status.size * 0.8),
        colors::color32(status.color),
    );
    if response.clicked() {
        output.status_tapped = true;
    }
    output.realize(SizeTag::Status, rect.size());
}

fn paint_bubble(ui: &mut egui::Ui, arrangement: &BubbleArrangement, fonts: &Fonts, output: &mut BubbleOutput) {
    styles::bubble_frame(arrangement).show(ui, |ui| {
        if let Some(width) = arrangement.frame_width {
            ui.set_width(width);
        }
        ui.with_layout(Layout::top_down(Align::Min), |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            for block in &arrangement.content {
                paint_block(ui, block, arrangement, fonts, output);
            }
        });
    });
}

fn paint_block(
    ui: &mut egui::Ui,
    block: &ContentBlock,
    arrangement: &BubbleArrangement,
    fonts: &Fonts,
    output: &mut BubbleOutput,
) {
    match block {
        ContentBlock::AttachmentGrid {
            attachments,
            width,
            timestamp,
        } => {
            let rect = paint_attachment_grid(ui, attachments, *width, arrangement.corner_radius, output);
            if let Some(view) = timestamp {
                let galley = timestamp_galley(ui, view, fonts);
                paint_overlay_timestamp(ui, rect, galley.clone(), view);
                output.realize(SizeTag::Timestamp, galley.size());
            }
        }
        ContentBlock::Text(text) => paint_text_block(ui, text, arrangement, fonts, output),
        ContentBlock::Recording {
            recording,
            colors,
            horizontal_padding,
            top_padding,
            timestamp,
        } => {
            ui.add_space(*top_padding);
            paint_recording(ui, recording, colors, *horizontal_padding, fonts);
            paint_stacked_timestamp(ui, view_padding(*horizontal_padding), timestamp, fonts, output);
        }
        ContentBlock::EmptyShell { timestamp } => {
            let padding = arrangement.corner_radius / 2.0;
            ui.add_space(padding / 2.0);
            paint_stacked_timestamp(ui, view_padding(padding), timestamp, fonts, output);
        }
    }
}

fn view_padding(horizontal: f32) -> egui::Margin {
    egui::Margin::symmetric(horizontal.round() as i8, 4)
}

fn paint_attachment_grid(
    ui: &mut egui::Ui,
    attachments: &[Attachment],
    width: f32,
    corner_radius: f32,
    output: &mut BubbleOutput,
) -> Rect {
    let columns = if attachments.len() > 1 { 2 } else { 1 };
    let tile = width / columns as f32;
    let rows = attachments.len().div_ceil(columns);
    let (grid, _) = ui.allocate_exact_size(Vec2::new(width, tile * rows as f32), Sense::hover());
    let painter = ui.painter_at(grid);

    painter.rect_filled(grid, styles::corner_radius(corner_radius), colors::ATTACHMENT_PLACEHOLDER);
    for (index, attachment) in attachments.iter().enumerate() {
        let origin = grid.min
            + Vec2::new((index % columns) as f32 * tile, (index / columns) as f32 * tile);
        let rect = Rect::from_min_size(origin, Vec2::splat(tile)).shrink(1.0);
        let response = ui.interact(rect, ui.id().with(attachment.id), Sense::click());
        if response.hovered() {
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, colors::BUBBLE_BORDER), egui::StrokeKind::Inside);
        }
        let glyph = match attachment.kind {
            AttachmentKind::Image => "🖼",
            AttachmentKind::Video => "▶",
            AttachmentKind::Other => "📎",
        };
        painter.text(rect.center(), Align2::CENTER_CENTER, glyph, FontId::proportional(24.0), colors::TEXT_LIGHT);
        if response.clicked() {
            output.attachment_tapped = Some(index);
        }
    }
    grid
}

fn paint_text_block(
    ui: &mut egui::Ui,
    text: &TextBlock,
    arrangement: &BubbleArrangement,
    fonts: &Fonts,
    output: &mut BubbleOutput,
) {
    let margin = egui::Margin::symmetric(
        text.horizontal_padding.round() as i8,
        text.vertical_padding.round() as i8,
    );
    egui::Frame::new().inner_margin(margin).show(ui, |ui| {
        let body = ui.painter().layout(
            text.text.clone(),
            fonts.body.clone(),
            colors::color32(arrangement.foreground),
            text.max_width,
        );
        let fill = if text.fill_width {
            arrangement
                .frame_width
                .map_or(0.0, |width| width - text.horizontal_padding * 2.0)
        } else {
            0.0
        };
        let size = Vec2::new(body.size().x.max(fill), body.size().y);

        match &text.timestamp {
            TextTimestamp::Overlay { view, .. } => {
                // The fit test left room on the last line for the time
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                ui.painter().galley(rect.min, body, Color32::PLACEHOLDER);
                let time = timestamp_galley(ui, view, fonts);
                let pos = inline_timestamp_origin(rect, time.size(), view.inset);
                ui.painter().galley(pos, time.clone(), Color32::PLACEHOLDER);
                output.realize(SizeTag::Timestamp, time.size());
            }
            TextTimestamp::Stacked { view, row_spacing } => {
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                ui.painter().galley(rect.min, body, Color32::PLACEHOLDER);
                ui.add_space(*row_spacing);
                let time = timestamp_galley(ui, view, fonts);
                let row_width = rect.width().max(time.size().x);
                let (row, _) = ui.allocate_exact_size(Vec2::new(row_width, time.size().y), Sense::hover());
                ui.painter()
                    .galley(row.right_top() - Vec2::new(time.size().x, 0.0), time.clone(), Color32::PLACEHOLDER);
                output.realize(SizeTag::Timestamp, time.size());
            }
            TextTimestamp::None => {
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                ui.painter().galley(rect.min, body, Color32::PLACEHOLDER);
            }
        }
    });
}

fn paint_recording(ui: &mut egui::Ui, recording: &Recording, palette: &WaveformColors, padding: f32, fonts: &Fonts) {
    const BUTTON: f32 = 36.0;
    const BAR_WIDTH: f32 = 2.0;
    const BAR_GAP: f32 = 2.0;
    const WAVEFORM_HEIGHT: f32 = 24.0;

    let bars = recording.waveform_samples.len().min(40);
    let waveform_width = bars as f32 * (BAR_WIDTH + BAR_GAP);
    let width = padding * 2.0 + BUTTON + 8.0 + waveform_width.max(60.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, BUTTON), Sense::hover());
    let painter = ui.painter();

    let button_center = Pos2::new(rect.min.x + padding + BUTTON / 2.0, rect.center().y);
    painter.circle_filled(button_center, BUTTON / 2.0, colors::color32(palette.button_background));
    painter.text(
        button_center,
        Align2::CENTER_CENTER,
        "▶",
        FontId::proportional(16.0),
        colors::color32(palette.button),
    );

    let mut x = button_center.x + BUTTON / 2.0 + 8.0;
    let stroke = Stroke::new(BAR_WIDTH, colors::color32(palette.waveform));
    for sample in recording.waveform_samples.iter().take(bars) {
        let height = (sample.clamp(0.0, 1.0) * WAVEFORM_HEIGHT).max(2.0);
        painter.line_segment(
            [
                Pos2::new(x, rect.center().y - height / 2.0),
                Pos2::new(x, rect.center().y + height / 2.0),
            ],
            stroke,
        );
        x += BAR_WIDTH + BAR_GAP;
    }

    let total = recording.duration.max(0.0).round() as u64;
    painter.text(
        Pos2::new(rect.max.x - padding, rect.max.y),
        Align2::RIGHT_BOTTOM,
        format!("{}:{:02}", total / 60, total % 60),
        fonts.time.clone(),
        colors::color32(palette.waveform),
    );
}

fn timestamp_galley(ui: &egui::Ui, view: &TimestampView, fonts: &Fonts) -> Arc<Galley> {
    ui.painter()
        .layout_no_wrap(view.text.clone(), fonts.time.clone(), colors::color32(view.color))
}

/// Top-left of a timestamp tucked into the bottom-right corner of `text`
fn inline_timestamp_origin(text: Rect, time: Vec2, inset: f32) -> Pos2 {
    text.right_bottom() - time - Vec2::splat(inset)
}

fn paint_overlay_timestamp(ui: &egui::Ui, media: Rect, galley: Arc<Galley>, view: &TimestampView) {
    let size = galley.size() + Vec2::splat(view.inset * 2.0);
    let backdrop = Rect::from_min_size(media.right_bottom() - size - Vec2::splat(view.inset), size);
    if let Some(background) = view.background {
        ui.painter()
            .rect_filled(backdrop, styles::corner_radius(size.y / 2.0), colors::color32(background));
    }
    ui.painter()
        .galley(backdrop.min + Vec2::splat(view.inset), galley, Color32::PLACEHOLDER);
}

fn paint_stacked_timestamp(
    ui: &mut egui::Ui,
    margin: egui::Margin,
    view: &TimestampView,
    fonts: &Fonts,
    output: &mut BubbleOutput,
) {
    egui::Frame::new().inner_margin(margin).show(ui, |ui| {
        let galley = timestamp_galley(ui, view, fonts);
        let size = galley.size();
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            ui.painter().galley(rect.min, galley, Color32::PLACEHOLDER);
        });
        output.realize(SizeTag::Timestamp, size);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_realized_size_per_tag_wins() {
        let mut output = BubbleOutput::default();
        output.realize(SizeTag::Timestamp, Vec2::new(30.0, 14.0));
        output.realize(SizeTag::Timestamp, Vec2::new(31.0, 14.0));
        output.realize(SizeTag::Avatar, Vec2::new(48.0, 32.0));

        assert_eq!(output.realized.len(), 2);
        assert_eq!(output.realized[0].size, Size::new(30.0, 14.0));
    }

    #[test]
    fn test_inline_timestamp_keeps_its_inset() {
        let text = Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 40.0));
        let origin = inline_timestamp_origin(text, Vec2::new(30.0, 14.0), 4.0);
        assert_eq!(origin, Pos2::new(166.0, 22.0));
    }
}
