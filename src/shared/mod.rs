//! Shared Module
//!
//! This module contains the toolkit-independent types used by the layout
//! engine and by any host that renders its output.
//!
//! # Overview
//!
//! Nothing in here knows about a UI runtime. Messages, users, attachments,
//! media-picker selections, layout constants and theme colors are plain data
//! that a host passes into the engine.

/// Messaging data model
pub mod messaging;

/// Shared error types
pub mod error;

/// Layout configuration and chat theme
pub mod config;

/// Re-export commonly used types for convenience
pub use error::LayoutError;
pub use config::{ChatTheme, ConfigError, LayoutConfig, LayoutConfigBuilder, Rgba};
pub use messaging::{
    Attachment, AttachmentKind, DeliveryStatus, DraftMessage, Media, MediaKind, Message,
    Recording, ReplyReference, User,
};
