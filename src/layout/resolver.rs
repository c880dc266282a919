//! Bubble Layout Resolver
//!
//! Turns message content, the available width and the sibling sizes observed
//! so far into a [`LayoutVerdict`]. The verdict is a pure function of those
//! inputs; sizes that have not been reported yet count as zero and the next
//! pass corrects the provisional answer.

use serde::{Deserialize, Serialize};

use super::metrics::{TextMeasure, TextMeasurer};
use super::observation::{SizeSnapshot, SizeTag};
use crate::debug::validate_invariant;
use crate::shared::config::LayoutConfig;
use crate::shared::error::LayoutError;
use crate::shared::messaging::Message;

/// Where the timestamp goes relative to the content it annotates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPlacement {
    /// Overlaid at the bottom-trailing corner: on the last text line, or on
    /// the media grid when there is no text
    Inline,
    /// On its own row beneath the content
    Stacked,
}

/// How the bubble frame picks its width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BubbleWidthMode {
    /// As wide as the content
    Intrinsic,
    /// Clamped to the media width so text and media line up
    FixedMedia { width: f32 },
}

/// Layout decision for one render pass of one bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutVerdict {
    /// Width available to the text block after paddings and siblings
    pub max_content_width: f32,
    pub timestamp_placement: TimestampPlacement,
    pub bubble_width_mode: BubbleWidthMode,
}

impl LayoutVerdict {
    /// Fixed frame width, if the bubble has one
    pub fn bubble_width(&self) -> Option<f32> {
        match self.bubble_width_mode {
            BubbleWidthMode::Intrinsic => None,
            BubbleWidthMode::FixedMedia { width } => Some(width),
        }
    }

    pub fn is_inline(&self) -> bool {
        self.timestamp_placement == TimestampPlacement::Inline
    }
}

/// Everything a verdict depends on besides the message itself
pub struct LayoutContext<'a> {
    pub config: &'a LayoutConfig,
    pub measurer: &'a dyn TextMeasurer,
    /// Width of the host viewport
    pub available_width: f32,
    pub sizes: SizeSnapshot,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        config: &'a LayoutConfig,
        measurer: &'a dyn TextMeasurer,
        available_width: f32,
        sizes: SizeSnapshot,
    ) -> Self {
        Self {
            config,
            measurer,
            available_width,
            sizes,
        }
    }
}

/// Resolve a layout verdict without a UI runtime
pub fn compute_layout(message: &Message, context: &LayoutContext<'_>) -> Result<LayoutVerdict, LayoutError> {
    BubbleLayoutResolver::new(context.config, context.measurer).resolve(
        message,
        context.available_width,
        &context.sizes,
    )
}

/// Decides inline vs stacked timestamps and the bubble width mode
pub struct BubbleLayoutResolver<'a> {
    config: &'a LayoutConfig,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> BubbleLayoutResolver<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a dyn TextMeasurer) -> Self {
        Self { config, measurer }
    }

    /// Width the body text may wrap at.
    ///
    /// Media bubbles clamp to the media width regardless of the viewport;
    /// otherwise the viewport loses the avatar, status glyph, bubble padding
    /// and text padding.
    pub fn candidate_max_width(
        &self,
        message: &Message,
        available_width: f32,
        sizes: &SizeSnapshot,
    ) -> f32 {
        let text_padding_total = self.config.text_padding_total();
        let width = if message.has_attachments() {
            self.config.media_width - text_padding_total
        } else {
            available_width
                - sizes.size_or_zero(SizeTag::Avatar).width
                - sizes.size_or_zero(SizeTag::Status).width
                - self.config.horizontal_bubble_padding
                - text_padding_total
        };
        width.max(0.0)
    }

    /// Width the timestamp claims on the last line, gap included
    pub fn time_width(&self, sizes: &SizeSnapshot) -> f32 {
        sizes.size_or_zero(SizeTag::Timestamp).width + self.config.inline_gap
    }

    /// Inline iff the last line leaves room for the timestamp.
    ///
    /// The comparison is strict: a timestamp that would end exactly at the
    /// block's edge goes on its own row.
    pub fn fits_inline(measure: &TextMeasure, time_width: f32) -> bool {
        measure.last_line_end_x + time_width < measure.full_width
    }

    pub fn resolve(
        &self,
        message: &Message,
        available_width: f32,
        sizes: &SizeSnapshot,
    ) -> Result<LayoutVerdict, LayoutError> {
        let max_content_width = self.candidate_max_width(message, available_width, sizes);
        let bubble_width_mode = if message.has_attachments() {
            BubbleWidthMode::FixedMedia {
                width: self.config.media_width,
            }
        } else {
            BubbleWidthMode::Intrinsic
        };

        let timestamp_placement = if message.text.is_empty() {
            Self::placement_without_text(message)
        } else {
            let measure = self
                .measurer
                .measure(&message.text, &self.config.body_font, max_content_width)?;
            validate_invariant(
                measure.last_line_end_x <= measure.full_width,
                "last line ends beyond the wrapped width",
            );
            let time_width = self.time_width(sizes);
            crate::debug_log!(
                "Fit test for {}: last_line_end_x={} time_width={} full_width={}",
                message.id,
                measure.last_line_end_x,
                time_width,
                measure.full_width
            );
            if Self::fits_inline(&measure, time_width) {
                TimestampPlacement::Inline
            } else {
                TimestampPlacement::Stacked
            }
        };

        let verdict = LayoutVerdict {
            max_content_width,
            timestamp_placement,
            bubble_width_mode,
        };
        tracing::debug!(
            message_id = %message.id,
            provisional = sizes.is_provisional(),
            "Resolved verdict {:?}",
            verdict
        );
        Ok(verdict)
    }

    /// Without text there is no fit test: a recording always stacks its
    /// timestamp, a media grid carries it as an overlay, and an empty shell
    /// stacks it.
    fn placement_without_text(message: &Message) -> TimestampPlacement {
        if message.recording.is_some() {
            TimestampPlacement::Stacked
        } else if message.has_attachments() {
            TimestampPlacement::Inline
        } else {
            TimestampPlacement::Stacked
        }
    }
}
