//! Theme Module
//!
//! Host colors and frame builders. Bubble colors are not defined here: they
//! arrive on each [`BubbleArrangement`](crate::layout::BubbleArrangement)
//! from the [`ChatTheme`](crate::shared::ChatTheme).
//!
//! # Usage
//!
//! ```rust,ignore
//! use xfbubble::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::bubble_frame(&arrangement).show(ui, |ui| {
//!     // Bubble content
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
