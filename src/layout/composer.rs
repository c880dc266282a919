//! Message Bubble Composer
//!
//! Arranges one message into a toolkit-independent [`BubbleArrangement`]
//! following a [`LayoutVerdict`]: the row around the bubble (avatar,
//! spacer, status glyph), the bubble's content column, its background and
//! paddings. A host paints the arrangement and reports the sizes its avatar,
//! status and timestamp realized back through [`MessageBubbleComposer::emit_realized`].

use uuid::Uuid;

use super::grouping::PositionInGroup;
use super::observation::{MeasuredSize, ReportOutcome, SizeReporter};
use super::resolver::{LayoutVerdict, TimestampPlacement};
use crate::shared::config::{ChatTheme, LayoutConfig, Rgba, WaveformColors};
use crate::shared::messaging::{Attachment, DeliveryStatus, DraftMessage, Message, Recording};

/// Avatar column of a remote message
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarSlot {
    pub url: Option<String>,
    pub size: f32,
    pub horizontal_padding: f32,
    /// When false the slot keeps its size but draws nothing
    pub visible: bool,
}

/// Delivery status glyph next to a local message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSlot {
    pub status: DeliveryStatus,
    pub size: f32,
    pub horizontal_padding: f32,
    pub color: Rgba,
}

/// One element of the horizontal row holding the bubble
#[derive(Debug, Clone, PartialEq)]
pub enum RowSlot {
    /// Flexible space pushing the bubble toward its sender's edge
    Spacer,
    Avatar(AvatarSlot),
    Bubble,
    Status(StatusSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimestampView {
    pub text: String,
    pub color: Rgba,
    /// Drawn over other content rather than on its own row
    pub is_overlay: bool,
    /// Backdrop for overlays on media
    pub background: Option<Rgba>,
    /// Inset from the bottom-trailing corner when overlaid
    pub inset: f32,
}

/// Timestamp treatment of the text block
#[derive(Debug, Clone, PartialEq)]
pub enum TextTimestamp {
    /// On the last line, at the block's bottom-trailing corner
    Overlay {
        view: TimestampView,
        /// Media bubbles force the text block to the media width
        frame_width: Option<f32>,
    },
    /// Trailing-aligned row under the text
    Stacked { view: TimestampView, row_spacing: f32 },
    /// A later block carries the bubble's timestamp
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub max_width: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    /// Rows stretch across a fixed media width
    pub fill_width: bool,
    pub timestamp: TextTimestamp,
}

/// Vertical content of the bubble, in display order
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    AttachmentGrid {
        attachments: Vec<Attachment>,
        width: f32,
        timestamp: Option<TimestampView>,
    },
    Text(TextBlock),
    Recording {
        recording: Recording,
        colors: WaveformColors,
        horizontal_padding: f32,
        top_padding: f32,
        timestamp: TimestampView,
    },
    /// Nothing to show but the time
    EmptyShell { timestamp: TimestampView },
}

/// Everything a host needs to paint one bubble
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleArrangement {
    pub message_id: Uuid,
    pub is_current_user: bool,
    pub position: PositionInGroup,
    pub verdict: LayoutVerdict,
    pub top_padding: f32,
    pub row: Vec<RowSlot>,
    pub content: Vec<ContentBlock>,
    pub frame_width: Option<f32>,
    pub background: Option<Rgba>,
    pub foreground: Rgba,
    pub corner_radius: f32,
    pub leading_padding: f32,
    pub trailing_padding: f32,
}

impl BubbleArrangement {
    pub fn avatar_slot(&self) -> Option<&AvatarSlot> {
        self.row.iter().find_map(|slot| match slot {
            RowSlot::Avatar(avatar) => Some(avatar),
            _ => None,
        })
    }

    pub fn status_slot(&self) -> Option<&StatusSlot> {
        self.row.iter().find_map(|slot| match slot {
            RowSlot::Status(status) => Some(status),
            _ => None,
        })
    }

    /// Every timestamp the bubble draws
    pub fn timestamps(&self) -> Vec<&TimestampView> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::AttachmentGrid { timestamp, .. } => timestamp.as_ref(),
                ContentBlock::Text(text) => match &text.timestamp {
                    TextTimestamp::Overlay { view, .. } | TextTimestamp::Stacked { view, .. } => Some(view),
                    TextTimestamp::None => None,
                },
                ContentBlock::Recording { timestamp, .. } => Some(timestamp),
                ContentBlock::EmptyShell { timestamp } => Some(timestamp),
            })
            .collect()
    }

    pub fn text_block(&self) -> Option<&TextBlock> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text(text) => Some(text),
            _ => None,
        })
    }
}

type ResendCallback = Box<dyn Fn(DraftMessage)>;
type AttachmentCallback = Box<dyn Fn(&Attachment)>;

/// Caller-owned reactions to taps inside a bubble
#[derive(Default)]
pub struct BubbleCallbacks {
    on_resend: Option<ResendCallback>,
    on_attachment_tap: Option<AttachmentCallback>,
}

impl BubbleCallbacks {
    /// Invoked with the message's draft when its status glyph is tapped
    pub fn on_resend(mut self, callback: impl Fn(DraftMessage) + 'static) -> Self {
        self.on_resend = Some(Box::new(callback));
        self
    }

    /// Invoked when an attachment in the grid is tapped
    pub fn on_attachment_tap(mut self, callback: impl Fn(&Attachment) + 'static) -> Self {
        self.on_attachment_tap = Some(Box::new(callback));
        self
    }
}

pub struct MessageBubbleComposer {
    config: LayoutConfig,
    theme: ChatTheme,
    callbacks: BubbleCallbacks,
}

impl MessageBubbleComposer {
    pub fn new(config: LayoutConfig, theme: ChatTheme) -> Self {
        Self {
            config,
            theme,
            callbacks: BubbleCallbacks::default(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: BubbleCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn theme(&self) -> &ChatTheme {
        &self.theme
    }

    pub fn compose(
        &self,
        message: &Message,
        position: PositionInGroup,
        verdict: &LayoutVerdict,
    ) -> BubbleArrangement {
        let is_current_user = message.user.is_current_user;
        let foreground = self.theme.bubble_foreground(is_current_user);
        let has_shell = message.has_text() || message.recording.is_some() || message.is_empty();
        let background = has_shell.then(|| self.theme.bubble_background(is_current_user));

        let (leading_padding, trailing_padding) = if is_current_user {
            (self.config.horizontal_bubble_padding, 0.0)
        } else {
            (0.0, self.config.horizontal_bubble_padding)
        };

        BubbleArrangement {
            message_id: message.id,
            is_current_user,
            position,
            verdict: *verdict,
            top_padding: position.top_padding(&self.config),
            row: self.row(message, position),
            content: self.content(message, verdict, foreground),
            frame_width: verdict.bubble_width(),
            background,
            foreground,
            corner_radius: self.config.corner_radius,
            leading_padding,
            trailing_padding,
        }
    }

    fn row(&self, message: &Message, position: PositionInGroup) -> Vec<RowSlot> {
        if message.user.is_current_user {
            let mut row = vec![RowSlot::Spacer, RowSlot::Bubble];
            if let Some(status) = &message.status {
                row.push(RowSlot::Status(StatusSlot {
                    status: status.clone(),
                    size: self.config.status_size,
                    horizontal_padding: self.config.horizontal_status_padding,
                    color: self.theme.status_color(status),
                }));
            }
            row
        } else {
            vec![
                RowSlot::Avatar(AvatarSlot {
                    url: message.user.avatar_url.clone(),
                    size: self.config.avatar_size,
                    horizontal_padding: self.config.horizontal_avatar_padding,
                    visible: position.shows_avatar(),
                }),
                RowSlot::Bubble,
                RowSlot::Spacer,
            ]
        }
    }

    fn content(&self, message: &Message, verdict: &LayoutVerdict, foreground: Rgba) -> Vec<ContentBlock> {
        let mut content = Vec::new();

        if message.has_attachments() {
            let overlay = (!message.has_text() && message.recording.is_none())
                .then(|| self.overlay_timestamp(message));
            content.push(ContentBlock::AttachmentGrid {
                attachments: message.attachments.clone(),
                width: self.config.media_width,
                timestamp: overlay,
            });
        }

        if message.has_text() {
            let timestamp = match verdict.timestamp_placement {
                TimestampPlacement::Inline => TextTimestamp::Overlay {
                    view: TimestampView {
                        text: message.time.clone(),
                        color: foreground,
                        is_overlay: false,
                        background: None,
                        inset: self.config.overlay_padding,
                    },
                    frame_width: verdict.bubble_width(),
                },
                TimestampPlacement::Stacked => TextTimestamp::Stacked {
                    view: self.stacked_timestamp(message, foreground),
                    row_spacing: self.config.stacked_row_spacing,
                },
            };
            content.push(ContentBlock::Text(TextBlock {
                text: message.text.clone(),
                max_width: verdict.max_content_width,
                horizontal_padding: self.config.horizontal_text_padding,
                vertical_padding: self.config.text_vertical_padding,
                fill_width: message.has_attachments(),
                timestamp,
            }));
        }

        if let Some(recording) = &message.recording {
            content.push(ContentBlock::Recording {
                recording: recording.clone(),
                colors: self.theme.waveform_colors(message.user.is_current_user),
                horizontal_padding: self.config.horizontal_text_padding,
                top_padding: self.config.text_vertical_padding,
                timestamp: self.stacked_timestamp(message, foreground),
            });
        }

        if message.is_empty() {
            content.push(ContentBlock::EmptyShell {
                timestamp: self.stacked_timestamp(message, foreground),
            });
        }

        content
    }

    fn overlay_timestamp(&self, message: &Message) -> TimestampView {
        TimestampView {
            text: message.time.clone(),
            color: self.theme.time_overlay_text,
            is_overlay: true,
            background: Some(self.theme.time_overlay_background),
            inset: self.config.overlay_padding,
        }
    }

    fn stacked_timestamp(&self, message: &Message, foreground: Rgba) -> TimestampView {
        TimestampView {
            text: message.time.clone(),
            color: foreground,
            is_overlay: false,
            background: None,
            inset: 0.0,
        }
    }

    /// Push the sizes the host realized onto the bubble's observation scope.
    ///
    /// Returns true when any of them changed enough to need another pass.
    pub fn emit_realized(&self, reporter: &SizeReporter, sizes: &[MeasuredSize]) -> bool {
        let mut changed = false;
        for measured in sizes {
            changed |= reporter.report_measured(*measured) == ReportOutcome::Changed;
        }
        changed
    }

    /// Status glyph tapped: hand the message's draft to the resend callback.
    ///
    /// Only the local user's messages show a status; taps elsewhere are
    /// ignored.
    pub fn tap_status(&self, message: &Message) -> bool {
        if !message.user.is_current_user || message.status.is_none() {
            return false;
        }
        match &self.callbacks.on_resend {
            Some(callback) => {
                tracing::info!("Resending message {}", message.id);
                callback(message.to_draft());
                true
            }
            None => false,
        }
    }

    /// Attachment `index` of the grid tapped
    pub fn tap_attachment(&self, message: &Message, index: usize) -> bool {
        let (Some(attachment), Some(callback)) =
            (message.attachments.get(index), &self.callbacks.on_attachment_tap)
        else {
            return false;
        };
        tracing::debug!("Opening attachment {} of message {}", attachment.id, message.id);
        callback(attachment);
        true
    }
}
