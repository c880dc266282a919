//! egui Text Measurement
//!
//! Backs [`TextMeasurer`] with egui's own text layout so the fit test sees
//! exactly the wrapping that will be painted.

use eframe::egui::{self, Color32, FontFamily, FontId};

use crate::layout::{FontDescriptor, TextMeasure, TextMeasurer};
use crate::shared::LayoutError;

/// Measures text with the fonts loaded into an egui context
#[derive(Clone)]
pub struct EguiMeasurer {
    painter: egui::Painter,
}

impl EguiMeasurer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            painter: ctx.layer_painter(egui::LayerId::background()),
        }
    }

    /// Map a descriptor onto an egui font.
    ///
    /// Only the built-in families are accepted; egui panics on families it
    /// was never given.
    pub fn font_id(font: &FontDescriptor) -> Result<FontId, LayoutError> {
        font.validate()?;
        let family = match font.family.as_str() {
            FontDescriptor::PROPORTIONAL => FontFamily::Proportional,
            FontDescriptor::MONOSPACE => FontFamily::Monospace,
            other => {
                return Err(LayoutError::invalid_font(
                    other,
                    "family is not registered with egui",
                ))
            }
        };
        Ok(FontId::new(font.size, family))
    }
}

impl TextMeasurer for EguiMeasurer {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        max_width: f32,
    ) -> Result<TextMeasure, LayoutError> {
        let font_id = Self::font_id(font)?;
        if text.is_empty() {
            return Ok(TextMeasure::EMPTY);
        }

        let wrap_width = if max_width.is_nan() { 0.0 } else { max_width.max(0.0) };
        let galley = self
            .painter
            .layout(text.to_owned(), font_id, Color32::PLACEHOLDER, wrap_width);

        let full_width = galley.size().x;
        let last_line_end_x = galley
            .rows
            .last()
            .map_or(0.0, |row| row.rect().max.x)
            .min(full_width);
        Ok(TextMeasure {
            full_width,
            last_line_end_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builtin_families_map_to_egui() {
        let font = EguiMeasurer::font_id(&FontDescriptor::body()).unwrap();
        assert_eq!(font.family, FontFamily::Proportional);
        assert_eq!(font.size, 17.0);

        let mono = FontDescriptor::new(FontDescriptor::MONOSPACE, 12.0);
        assert_eq!(EguiMeasurer::font_id(&mono).unwrap().family, FontFamily::Monospace);
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let font = FontDescriptor::new("Comic Sans", 17.0);
        assert_matches!(
            EguiMeasurer::font_id(&font),
            Err(LayoutError::InvalidFont { family, .. }) if family == "Comic Sans"
        );
    }
}
