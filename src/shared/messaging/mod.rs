//! Messaging Module
//!
//! This module contains the data model the layout engine consumes:
//!
//! - `User` - a participant, flagged when it is the local user
//! - `Message` - an immutable chat message with text, attachments and recording
//! - `DraftMessage` - the editable projection used to resend a message
//! - `Media` - an item selected in the media picker
//! - `MediaPicker` - selection state shared with the picker collaborator
//!
//! # Usage
//!
//! ```rust
//! use xfbubble::shared::messaging::{Message, User};
//!
//! let message = Message::new(User::local("Me"), "On my way");
//! assert!(message.user.is_current_user);
//! ```

pub mod user;
pub mod message;
pub mod media;
pub mod picker;

// Re-export all types
pub use user::User;
pub use message::{
    Attachment, AttachmentKind, DeliveryStatus, DraftMessage, Message, Recording,
    ReplyReference,
};
pub use media::{attachments_from_selection, Media, MediaKind};
pub use picker::{
    MediaPicker, MediaPickerMode, MediaPickerSurface, MediaSelection, SelectionParams,
};
