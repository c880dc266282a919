//! Chat Message Data Structure
//!
//! Represents a message as the bubble layout sees it.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::Media;
use super::user::User;

/// Kind of attached media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
    Other,
}

/// An attachment shown in the bubble's media grid.
///
/// Order within a message is significant: the grid lays attachments out in
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub kind: AttachmentKind,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl Attachment {
    pub fn new(kind: AttachmentKind, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            url: url.into(),
            thumbnail: None,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Image, url)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Video, url)
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Thumbnail to display in the grid, the full source when none exists
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }
}

/// A voice recording attached to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Duration in seconds
    pub duration: f64,
    /// Normalized amplitude samples in `0.0..=1.0`
    pub waveform_samples: Vec<f32>,
    pub url: Option<String>,
}

impl Recording {
    pub fn new(duration: f64, waveform_samples: Vec<f32>) -> Self {
        Self {
            duration,
            waveform_samples,
            url: None,
        }
    }
}

/// Delivery state of the local user's messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "draft", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sending,
    Sent,
    Read,
    /// Sending failed; the draft is what a resend would submit
    Error(DraftMessage),
}

impl DeliveryStatus {
    /// Glyph drawn next to the bubble
    pub fn glyph(&self) -> &'static str {
        match self {
            DeliveryStatus::Sending => "◷",
            DeliveryStatus::Sent => "✓",
            DeliveryStatus::Read => "✓✓",
            DeliveryStatus::Error(_) => "!",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DeliveryStatus::Error(_))
    }
}

/// A quoted message this message replies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyReference {
    pub message_id: Uuid,
    pub user: User,
    pub text: String,
}

/// Represents a chat message.
///
/// Messages are built once and not mutated afterwards; resend flows work on
/// the [`DraftMessage`] returned by [`Message::to_draft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub user: User,
    pub status: Option<DeliveryStatus>,
    /// Body text, possibly empty
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub recording: Option<Recording>,
    /// Display-formatted send time
    pub time: String,
    pub reply_to: Option<ReplyReference>,
}

impl Message {
    /// Create a text message stamped with the current local time
    pub fn new(user: User, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            status: None,
            text: text.into(),
            attachments: Vec::new(),
            recording: None,
            time: Local::now().format("%H:%M").to_string(),
            reply_to: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_recording(mut self, recording: Recording) -> Self {
        self.recording = Some(recording);
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Format the display time (HH:MM) from a send timestamp
    pub fn sent_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.time = timestamp.format("%H:%M").to_string();
        self
    }

    pub fn with_reply_to(mut self, reply: ReplyReference) -> Self {
        self.reply_to = Some(reply);
        self
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// No text, no attachments and no recording
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attachments.is_empty() && self.recording.is_none()
    }

    /// Editable projection of this message for resending
    pub fn to_draft(&self) -> DraftMessage {
        DraftMessage {
            id: Some(self.id),
            text: self.text.clone(),
            medias: self.attachments.iter().map(Media::from).collect(),
            recording: self.recording.clone(),
            reply_to: self.reply_to.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Editable message content, produced for resend and by the input bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMessage {
    /// Id of the message being resent, `None` for a fresh draft
    pub id: Option<Uuid>,
    pub text: String,
    pub medias: Vec<Media>,
    pub recording: Option<Recording>,
    pub reply_to: Option<ReplyReference>,
    pub created_at: DateTime<Utc>,
}
