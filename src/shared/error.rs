//! Shared Error Types
//!
//! Errors surfaced by the layout engine to its caller.
//!
//! # Error Categories
//!
//! - `InvalidFont` - a font descriptor the measurement service cannot use
//! - `Config` - invalid layout configuration
//!
//! A missing sibling measurement is not an error: the resolver substitutes a
//! zero size and the next pass corrects it. Likewise a report into a torn-down
//! observation scope is discarded silently.
//!
//! # Usage
//!
//! ```rust
//! use xfbubble::shared::error::LayoutError;
//!
//! let error = LayoutError::invalid_font("Helvetica", "font size must be positive");
//! assert!(error.to_string().contains("Helvetica"));
//! ```
use thiserror::Error;

use super::config::ConfigError;

/// Errors produced by the layout engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// The font descriptor cannot be used for measurement.
    ///
    /// This is a caller bug, not a transient condition, and is never retried.
    #[error("invalid font '{family}': {reason}")]
    InvalidFont {
        /// Font family named by the descriptor
        family: String,
        /// Why the descriptor was rejected
        reason: String,
    },

    /// Layout configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LayoutError {
    /// Create a new invalid font error
    pub fn invalid_font(family: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFont {
            family: family.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from loading or validating `LayoutConfig`
    /// rather than from a measurement request
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
