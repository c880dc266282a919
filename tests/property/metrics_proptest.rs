//! Property-based tests for text measurement

use std::num::NonZeroUsize;

use proptest::prelude::*;
use xfbubble::layout::{CachedMeasurer, FontDescriptor, GlyphGridMeasurer, TextMeasurer};

proptest! {
    #[test]
    fn test_last_line_never_exceeds_block(
        text in "\\PC{0,120}",
        width in 0.0f32..600.0,
    ) {
        let measure = GlyphGridMeasurer::default()
            .measure(&text, &FontDescriptor::body(), width)
            .unwrap();
        prop_assert!(measure.last_line_end_x <= measure.full_width);
        prop_assert!(measure.last_line_end_x >= 0.0);
    }

    #[test]
    fn test_paragraphs_keep_last_line_bound(
        text in "[a-z \\n]{0,80}",
        width in 0.0f32..300.0,
    ) {
        let measure = GlyphGridMeasurer::default()
            .measure(&text, &FontDescriptor::caption(), width)
            .unwrap();
        prop_assert!(measure.last_line_end_x <= measure.full_width);
    }

    #[test]
    fn test_wrapped_width_respects_limit_for_short_words(
        indent in " {0,40}",
        words in prop::collection::vec("[a-z]{1,5}", 0..30),
        width in 60.0f32..400.0,
    ) {
        // Words of at most five columns always fit a 60 unit line at 8.5 per column
        let text = format!("{indent}{}", words.join(" "));
        let measure = GlyphGridMeasurer::default()
            .measure(&text, &FontDescriptor::body(), width)
            .unwrap();
        prop_assert!(measure.full_width <= width);
    }

    #[test]
    fn test_cache_matches_inner_measurer(
        text in "\\PC{0,60}",
        width in 0.0f32..400.0,
    ) {
        let inner = GlyphGridMeasurer::default();
        let cached = CachedMeasurer::new(inner.clone(), NonZeroUsize::new(8).unwrap());
        let font = FontDescriptor::body();

        let direct = inner.measure(&text, &font, width).unwrap();
        prop_assert_eq!(cached.measure(&text, &font, width).unwrap(), direct);
        prop_assert_eq!(cached.measure(&text, &font, width).unwrap(), direct);
    }
}
