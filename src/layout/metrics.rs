//! Text Metrics
//!
//! Measures how a string wraps at a given width. The layout engine only needs
//! two numbers from a measurement: the width of the wrapped block and where
//! the last line ends. Shaping internals stay behind [`TextMeasurer`]; a host
//! backs it with its own font engine, and [`GlyphGridMeasurer`] provides a
//! deterministic implementation for headless layout and tests.

use std::cell::RefCell;
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::shared::error::LayoutError;

/// Font used for a measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Family name, resolved by the measurer
    pub family: String,
    /// Point size
    pub size: f32,
}

impl FontDescriptor {
    pub const PROPORTIONAL: &'static str = "proportional";
    pub const MONOSPACE: &'static str = "monospace";

    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Message body text
    pub fn body() -> Self {
        Self::new(Self::PROPORTIONAL, 17.0)
    }

    /// Timestamps and other small print
    pub fn caption() -> Self {
        Self::new(Self::PROPORTIONAL, 12.0)
    }

    /// Reject descriptors no measurer can honor
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.family.trim().is_empty() {
            return Err(LayoutError::invalid_font(&self.family, "font family is empty"));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(LayoutError::invalid_font(
                &self.family,
                format!("font size must be positive, got {}", self.size),
            ));
        }
        Ok(())
    }
}

/// Result of measuring wrapped text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextMeasure {
    /// Width of the wrapped block (its widest line)
    pub full_width: f32,
    /// Offset from the block's leading edge where the final line ends
    pub last_line_end_x: f32,
}

impl TextMeasure {
    pub const EMPTY: TextMeasure = TextMeasure {
        full_width: 0.0,
        last_line_end_x: 0.0,
    };

    /// Space left on the final line
    pub fn trailing_space(&self) -> f32 {
        self.full_width - self.last_line_end_x
    }
}

/// Text measurement service.
///
/// Implementations must be deterministic: the same text, font and width
/// always produce the same measure. `\n` forces a line break in addition to
/// width-driven wraps, and the empty string measures as zero.
pub trait TextMeasurer {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        max_width: f32,
    ) -> Result<TextMeasure, LayoutError>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        max_width: f32,
    ) -> Result<TextMeasure, LayoutError> {
        (**self).measure(text, font, max_width)
    }
}

/// Width constraint sanitized for wrapping
fn wrap_limit(max_width: f32) -> f32 {
    if max_width.is_nan() {
        0.0
    } else {
        max_width.max(0.0)
    }
}

/// Deterministic measurer with a fixed advance per terminal column.
///
/// Each character advances `font.size * advance_ratio` times its display
/// column count, so wide CJK glyphs take two cells and combining marks none.
/// Lines wrap greedily at whitespace; a word wider than the limit is broken
/// between characters.
#[derive(Debug, Clone)]
pub struct GlyphGridMeasurer {
    advance_ratio: f32,
    families: Vec<String>,
}

impl Default for GlyphGridMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl GlyphGridMeasurer {
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            families: vec![
                FontDescriptor::PROPORTIONAL.to_string(),
                FontDescriptor::MONOSPACE.to_string(),
            ],
        }
    }

    /// Accept an additional family name
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.families.push(family.into());
        self
    }

    fn advance(&self, font: &FontDescriptor) -> f32 {
        font.size * self.advance_ratio
    }

    fn char_width(ch: char, advance: f32) -> f32 {
        ch.width().unwrap_or(0) as f32 * advance
    }

    fn run_width(run: &str, advance: f32) -> f32 {
        run.chars().map(|ch| Self::char_width(ch, advance)).sum()
    }

    /// Widths of every visual line, in order
    fn line_widths(&self, text: &str, advance: f32, limit: f32) -> Vec<f32> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            Self::wrap_paragraph(paragraph, advance, limit, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(paragraph: &str, advance: f32, limit: f32, lines: &mut Vec<f32>) {
        let mut line = 0.0_f32;
        let mut has_content = false;
        let mut on_first_line = true;
        let mut gap = 0.0_f32;

        for (is_space, run) in Runs::new(paragraph) {
            let run_width = Self::run_width(run, advance);
            if is_space {
                gap += run_width;
                continue;
            }

            // Whitespace before a word survives mid-line and as the indent of
            // a paragraph's first line; it is dropped at a wrap. The indent
            // never pushes the first word past the limit.
            let lead = if has_content {
                gap
            } else if on_first_line {
                gap.min((limit - run_width).max(0.0))
            } else {
                0.0
            };
            gap = 0.0;
            if has_content && line + lead + run_width > limit {
                lines.push(line);
                line = 0.0;
                has_content = false;
                on_first_line = false;
            } else {
                line += lead;
            }

            if line + run_width <= limit {
                line += run_width;
                has_content = true;
                continue;
            }

            for ch in run.chars() {
                let width = Self::char_width(ch, advance);
                if has_content && line + width > limit {
                    lines.push(line);
                    line = 0.0;
                    on_first_line = false;
                }
                line += width;
                has_content = true;
            }
        }
        lines.push(line);
    }
}

impl TextMeasurer for GlyphGridMeasurer {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        max_width: f32,
    ) -> Result<TextMeasure, LayoutError> {
        font.validate()?;
        if !self.families.iter().any(|family| family == &font.family) {
            return Err(LayoutError::invalid_font(&font.family, "unknown font family"));
        }
        if text.is_empty() {
            return Ok(TextMeasure::EMPTY);
        }

        let lines = self.line_widths(text, self.advance(font), wrap_limit(max_width));
        let full_width = lines.iter().copied().fold(0.0_f32, f32::max);
        let last_line_end_x = lines.last().copied().unwrap_or(0.0);
        Ok(TextMeasure {
            full_width,
            last_line_end_x,
        })
    }
}

/// Alternating whitespace / non-whitespace runs of a paragraph
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = (bool, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() != is_space)
            .map(|(index, _)| index)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((is_space, run))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetricsKey {
    text: String,
    family: String,
    size_bits: u32,
    width_bits: u32,
}

impl MetricsKey {
    fn new(text: &str, font: &FontDescriptor, max_width: f32) -> Self {
        Self {
            text: text.to_string(),
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
            width_bits: max_width.to_bits(),
        }
    }
}

/// Bounded LRU cache in front of another measurer.
///
/// Keyed by (text, font, width). Errors are never cached.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: RefCell<LruCache<MetricsKey, TextMeasure>>,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    pub fn new(inner: M, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Number of cached measurements
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        max_width: f32,
    ) -> Result<TextMeasure, LayoutError> {
        let key = MetricsKey::new(text, font, max_width);
        if let Some(measure) = self.cache.borrow_mut().get(&key) {
            return Ok(*measure);
        }

        let measure = self.inner.measure(text, font, max_width)?;
        self.cache.borrow_mut().put(key, measure);
        Ok(measure)
    }
}
