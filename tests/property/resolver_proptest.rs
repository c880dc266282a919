//! Property-based tests for the layout resolver

use proptest::prelude::*;
use xfbubble::layout::{
    BubbleLayoutResolver, GlyphGridMeasurer, Size, SizeSnapshot, SizeTag, TimestampPlacement,
};
use xfbubble::shared::{LayoutConfig, Message, User};

fn snapshot() -> impl Strategy<Value = SizeSnapshot> {
    let size = prop::option::of((0.0f32..120.0, 0.0f32..40.0).prop_map(|(w, h)| Size::new(w, h)));
    (size.clone(), size.clone(), size).prop_map(|(avatar, status, timestamp)| {
        let mut snapshot = SizeSnapshot::default();
        for (tag, size) in [
            (SizeTag::Avatar, avatar),
            (SizeTag::Status, status),
            (SizeTag::Timestamp, timestamp),
        ] {
            if let Some(size) = size {
                snapshot = snapshot.with(tag, size);
            }
        }
        snapshot
    })
}

proptest! {
    #[test]
    fn test_empty_message_always_stacks(
        width in -50.0f32..800.0,
        sizes in snapshot(),
        local in any::<bool>(),
    ) {
        let config = LayoutConfig::default();
        let measurer = GlyphGridMeasurer::default();
        let resolver = BubbleLayoutResolver::new(&config, &measurer);
        let message = Message::new(User::new("Sam", local), "");

        let verdict = resolver.resolve(&message, width, &sizes).unwrap();
        prop_assert_eq!(verdict.timestamp_placement, TimestampPlacement::Stacked);
    }

    #[test]
    fn test_resolve_is_idempotent(
        text in "\\PC{0,80}",
        width in 0.0f32..800.0,
        sizes in snapshot(),
    ) {
        let config = LayoutConfig::default();
        let measurer = GlyphGridMeasurer::default();
        let resolver = BubbleLayoutResolver::new(&config, &measurer);
        let message = Message::new(User::remote("Stan"), text);

        let first = resolver.resolve(&message, width, &sizes).unwrap();
        let second = resolver.resolve(&message, width, &sizes).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_width_is_never_negative(
        width in -500.0f32..800.0,
        sizes in snapshot(),
    ) {
        let config = LayoutConfig::default();
        let measurer = GlyphGridMeasurer::default();
        let resolver = BubbleLayoutResolver::new(&config, &measurer);
        let message = Message::new(User::remote("Stan"), "hello there");

        let verdict = resolver.resolve(&message, width, &sizes).unwrap();
        prop_assert!(verdict.max_content_width >= 0.0);
    }

    #[test]
    fn test_inline_implies_trailing_room(
        text in "[a-z ]{1,120}",
        width in 100.0f32..600.0,
        time_width in 0.0f32..80.0,
    ) {
        let config = LayoutConfig::default();
        let measurer = GlyphGridMeasurer::default();
        let resolver = BubbleLayoutResolver::new(&config, &measurer);
        let message = Message::new(User::remote("Stan"), text.clone());
        let sizes = SizeSnapshot::default().with(SizeTag::Timestamp, Size::new(time_width, 14.0));

        let verdict = resolver.resolve(&message, width, &sizes).unwrap();
        if verdict.timestamp_placement == TimestampPlacement::Inline {
            let measure = xfbubble::layout::TextMeasurer::measure(
                &measurer,
                &text,
                &config.body_font,
                verdict.max_content_width,
            )
            .unwrap();
            prop_assert!(measure.last_line_end_x + time_width + config.inline_gap < measure.full_width);
        }
    }
}
