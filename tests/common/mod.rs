//! Common test utilities and helpers
//!
//! - Message and user fixtures
//! - A headless layout harness settling bubbles with the glyph-grid measurer

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
