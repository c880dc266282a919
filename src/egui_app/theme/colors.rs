//! Host Color Constants
//!
//! Colors for the chrome around the message list. Bubble colors come from
//! the [`ChatTheme`](crate::shared::ChatTheme) and are converted with
//! [`color32`].

use eframe::egui::Color32;

use crate::shared::Rgba;

/// Main chat background - Off-white
pub const MAIN_CHAT_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Input bar background - Light tan
pub const INPUT_BG: Color32 = Color32::from_rgb(0xE6, 0xD7, 0xC7);

/// Input bar border - Muted tan
pub const INPUT_BAR_BORDER: Color32 = Color32::from_rgb(0xC3, 0xA9, 0x90);

/// Message bubble border - Muted brown
pub const BUBBLE_BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Attachment tile placeholder until a thumbnail loads
pub const ATTACHMENT_PLACEHOLDER: Color32 = Color32::from_rgb(0xB8, 0xA4, 0x90);

/// Avatar circle fill
pub const AVATAR_FILL: Color32 = Color32::from_rgb(0x8B, 0x6B, 0x55);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Button primary background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Hovered widget background
pub const HOVER_ITEM: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Selection highlight
pub const SELECTION: Color32 = Color32::from_rgb(0x4A, 0x2E, 0x22);

/// Convert a theme color for painting
pub fn color32(rgba: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}
