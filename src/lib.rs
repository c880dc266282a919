//! XFBubble - Chat Bubble Layout Engine
//!
//! XFBubble decides how a chat message bubble is laid out when the answer
//! depends on measured content: how the body text wraps, how wide the
//! avatar, delivery-status glyph and timestamp actually rendered, and
//! whether the timestamp fits on the last text line or has to be stacked
//! underneath.
//!
//! # Module Structure
//!
//! - **`shared`** - Toolkit-independent types
//!   - Message, user, attachment and media-picker data model
//!   - Layout configuration and chat theme
//!   - Error types
//!
//! - **`layout`** - The layout engine
//!   - `metrics` - text measurement service and bounded cache
//!   - `observation` - size observation bus with generation-scoped reporters
//!   - `resolver` - inline vs stacked timestamp decision
//!   - `composer` - bubble arrangement keyed by sender and group position
//!   - `grouping` - position-in-group classifier
//!   - `session` - per-bubble two-pass driver and list controller
//!
//! - **`egui_app`** - Reference host built on egui/eframe
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfbubble::layout::{compute_layout, GlyphGridMeasurer, LayoutContext, SizeSnapshot};
//! use xfbubble::shared::{LayoutConfig, Message, User};
//!
//! let config = LayoutConfig::default();
//! let measurer = GlyphGridMeasurer::default();
//! let message = Message::new(User::remote("Stan"), "Hi, buddy!");
//! let context = LayoutContext::new(&config, &measurer, 390.0, SizeSnapshot::default());
//! let verdict = compute_layout(&message, &context).unwrap();
//! println!("{:?}", verdict.timestamp_placement);
//! ```
//!
//! # Thread Safety
//!
//! The engine is single-threaded: every bubble owns its own observation
//! scope and verdict, and the host UI runtime drives re-render passes.

/// Shared types and data structures
pub mod shared;

/// Bubble layout engine
pub mod layout;

/// egui native reference host
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;

/// Debug utilities
pub mod debug;
