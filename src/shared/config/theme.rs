//! Chat Theme
//!
//! Explicit color configuration handed to the bubble composer. The palette
//! defaults to the warm brown/tan scheme of the reference host.

use serde::{Deserialize, Serialize};

use crate::shared::messaging::DeliveryStatus;

/// Toolkit-independent RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Glyph colors for each delivery status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusColors {
    pub sending: Rgba,
    pub sent: Rgba,
    pub read: Rgba,
    pub error: Rgba,
}

/// Colors for the voice recording control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformColors {
    pub button: Rgba,
    pub button_background: Rgba,
    pub waveform: Rgba,
}

/// Colors consumed by the bubble composer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatTheme {
    /// Bubble background for the local user's messages
    pub my_message: Rgba,
    /// Bubble background for everyone else's messages
    pub friend_message: Rgba,
    /// Text on the local user's bubble
    pub my_message_text: Rgba,
    /// Text on a remote user's bubble
    pub friend_message_text: Rgba,
    /// Contrast color used by the recording button
    pub button_contrast: Rgba,
    /// Timestamp text when overlaid on media
    pub time_overlay_text: Rgba,
    /// Backdrop behind a timestamp overlaid on media
    pub time_overlay_background: Rgba,
    pub status: StatusColors,
}

impl Default for ChatTheme {
    fn default() -> Self {
        Self {
            my_message: Rgba::rgb(0xD8, 0xC0, 0xA8),
            friend_message: Rgba::rgb(0xEA, 0xDB, 0xC8),
            my_message_text: Rgba::rgb(0x2F, 0x1E, 0x1A),
            friend_message_text: Rgba::rgb(0x2F, 0x1E, 0x1A),
            button_contrast: Rgba::WHITE,
            time_overlay_text: Rgba::WHITE,
            time_overlay_background: Rgba::rgba(0x00, 0x00, 0x00, 0x60),
            status: StatusColors {
                sending: Rgba::rgb(0x8B, 0x7B, 0x6B),
                sent: Rgba::rgb(0x8B, 0x7B, 0x6B),
                read: Rgba::rgb(0x5C, 0x3A, 0x2C),
                error: Rgba::rgb(0xE5, 0x73, 0x73),
            },
        }
    }
}

impl ChatTheme {
    pub fn bubble_background(&self, is_current_user: bool) -> Rgba {
        if is_current_user {
            self.my_message
        } else {
            self.friend_message
        }
    }

    pub fn bubble_foreground(&self, is_current_user: bool) -> Rgba {
        if is_current_user {
            self.my_message_text
        } else {
            self.friend_message_text
        }
    }

    /// The button and its background swap between own and remote bubbles
    pub fn waveform_colors(&self, is_current_user: bool) -> WaveformColors {
        if is_current_user {
            WaveformColors {
                button: self.my_message,
                button_background: self.button_contrast,
                waveform: self.my_message_text,
            }
        } else {
            WaveformColors {
                button: self.button_contrast,
                button_background: self.my_message,
                waveform: self.friend_message_text,
            }
        }
    }

    pub fn status_color(&self, status: &DeliveryStatus) -> Rgba {
        match status {
            DeliveryStatus::Sending => self.status.sending,
            DeliveryStatus::Sent => self.status.sent,
            DeliveryStatus::Read => self.status.read,
            DeliveryStatus::Error(_) => self.status.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_colors_swap() {
        let theme = ChatTheme::default();
        let own = theme.waveform_colors(true);
        let remote = theme.waveform_colors(false);
        assert_eq!(own.button, remote.button_background);
        assert_eq!(own.button_background, remote.button);
    }

    #[test]
    fn test_bubble_background_by_sender() {
        let theme = ChatTheme::default();
        assert_eq!(theme.bubble_background(true), theme.my_message);
        assert_eq!(theme.bubble_background(false), theme.friend_message);
    }

    #[test]
    fn test_theme_from_toml() {
        let theme: ChatTheme = toml::from_str(
            r#"
            my_message = { r = 0, g = 122, b = 255, a = 255 }
            "#,
        )
        .unwrap();
        assert_eq!(theme.my_message, Rgba::rgb(0, 122, 255));
        assert_eq!(theme.friend_message, ChatTheme::default().friend_message);
    }
}
