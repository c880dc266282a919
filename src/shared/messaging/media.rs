//! Media picked by the user before it becomes a message attachment

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{Attachment, AttachmentKind};

/// Media share the attachment kinds
pub type MediaKind = AttachmentKind;

/// An item from the media picker's current selection.
///
/// Identity is the `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: Uuid,
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl PartialEq for Media {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Media {}

impl std::hash::Hash for Media {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Media {
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            url: url.into(),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn thumbnail_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }
}

impl From<&Media> for Attachment {
    fn from(media: &Media) -> Self {
        Attachment {
            id: media.id,
            kind: media.kind,
            url: media.url.clone(),
            thumbnail: media.thumbnail.clone(),
        }
    }
}

impl From<&Attachment> for Media {
    fn from(attachment: &Attachment) -> Self {
        Media {
            id: attachment.id,
            kind: attachment.kind,
            url: attachment.url.clone(),
            thumbnail: attachment.thumbnail.clone(),
        }
    }
}

/// Convert a finalized picker selection into attachment entries, preserving order
pub fn attachments_from_selection(selection: &[Media]) -> Vec<Attachment> {
    selection.iter().map(Attachment::from).collect()
}
