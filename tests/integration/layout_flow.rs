//! Bubble layout through the public API

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use crate::common::*;
use xfbubble::layout::{
    compute_layout, BubbleWidthMode, ContentBlock, FontDescriptor, LayoutContext, PositionInGroup,
    RowSlot, Size, SizeSnapshot, SizeTag, TextMeasure, TextMeasurer, TextTimestamp,
    TimestampPlacement,
};
use xfbubble::shared::{LayoutConfig, LayoutError};

/// Reports the same wrap for every text
struct FixedWrap(TextMeasure);

impl TextMeasurer for FixedWrap {
    fn measure(&self, _text: &str, font: &FontDescriptor, _max_width: f32) -> Result<TextMeasure, LayoutError> {
        font.validate()?;
        Ok(self.0)
    }
}

fn verdict_for(full_width: f32, last_line_end_x: f32) -> TimestampPlacement {
    let config = LayoutConfig::default();
    let measurer = FixedWrap(TextMeasure {
        full_width,
        last_line_end_x,
    });
    let sizes = SizeSnapshot::default().with(SizeTag::Timestamp, Size::new(30.0, 14.0));
    let context = LayoutContext::new(&config, &measurer, VIEWPORT, sizes);
    compute_layout(&text_from(&alice(), "wrapped text"), &context)
        .unwrap()
        .timestamp_placement
}

#[test]
fn test_fit_boundary_scenario() {
    assert_eq!(verdict_for(210.0, 180.0), TimestampPlacement::Stacked);
    assert_eq!(verdict_for(230.0, 180.0), TimestampPlacement::Inline);
}

#[test]
fn test_three_attachments_overlay_grid() {
    let mut harness = Harness::new();
    let message = sent(media_from(&me(), 3));

    let arrangements = harness.settle(std::slice::from_ref(&message));
    let bubble = &arrangements[0];

    assert_eq!(
        bubble.verdict.bubble_width_mode,
        BubbleWidthMode::FixedMedia {
            width: harness.config.media_width
        }
    );
    assert_eq!(bubble.frame_width, Some(204.0));
    assert_eq!(bubble.background, None);
    assert_matches!(
        &bubble.content[..],
        [ContentBlock::AttachmentGrid { attachments, timestamp: Some(view), .. }]
            if attachments.len() == 3 && view.is_overlay
    );
}

#[test]
fn test_group_padding_scenario() {
    let mut harness = Harness::new();
    let user = alice();
    let messages = vec![text_from(&user, "first"), text_from(&user, "second")];

    let arrangements = harness.settle(&messages);
    assert_eq!(arrangements[0].position, PositionInGroup::First);
    assert_eq!(arrangements[0].top_padding, 8.0);
    assert_eq!(arrangements[1].position, PositionInGroup::Last);
    assert_eq!(arrangements[1].top_padding, 4.0);
}

#[test]
fn test_avatar_only_on_last_of_group() {
    let mut harness = Harness::new();
    let user = alice();
    let messages = vec![
        text_from(&user, "one"),
        text_from(&user, "two"),
        text_from(&user, "three"),
    ];

    let arrangements = harness.settle(&messages);
    let visible: Vec<bool> = arrangements
        .iter()
        .map(|bubble| bubble.avatar_slot().map(|avatar| avatar.visible).unwrap_or(false))
        .collect();
    assert_eq!(visible, vec![false, false, true]);
    // Hidden avatars keep their slot so bubbles stay aligned
    assert!(arrangements.iter().all(|bubble| bubble.avatar_slot().is_some()));
}

#[test]
fn test_empty_message_gets_stacked_shell() {
    let mut harness = Harness::new();
    let arrangements = harness.settle(&[empty_from(&me())]);
    let bubble = &arrangements[0];

    assert_eq!(bubble.verdict.timestamp_placement, TimestampPlacement::Stacked);
    assert!(bubble.background.is_some());
    assert_matches!(&bubble.content[..], [ContentBlock::EmptyShell { .. }]);
}

#[test]
fn test_voice_message_stacks_time_under_control() {
    let mut harness = Harness::new();
    let arrangements = harness.settle(&[voice_from(&bob())]);
    let bubble = &arrangements[0];

    assert_eq!(bubble.verdict.timestamp_placement, TimestampPlacement::Stacked);
    assert_matches!(
        &bubble.content[..],
        [ContentBlock::Recording { timestamp, .. }] if !timestamp.is_overlay
    );
}

#[test]
fn test_short_text_stacks_and_long_wrap_goes_inline() {
    let mut harness = Harness::new();
    let user = alice();
    // A single line leaves no trailing space beyond its own width
    let short = text_from(&user, "ok");
    // Seven words then a short tail line
    let long = text_from(&bob(), &format!("{}tail", "word ".repeat(8)));

    let arrangements = harness.settle(&[short, long]);
    assert_eq!(arrangements[0].verdict.timestamp_placement, TimestampPlacement::Stacked);
    assert_eq!(arrangements[1].verdict.timestamp_placement, TimestampPlacement::Inline);
    assert_matches!(
        arrangements[1].text_block().map(|block| &block.timestamp),
        Some(TextTimestamp::Overlay { .. })
    );
}

#[test]
fn test_local_row_order_and_status() {
    let mut harness = Harness::new();
    let arrangements = harness.settle(&[sent(text_from(&me(), "hello"))]);

    assert_matches!(
        arrangements[0].row.as_slice(),
        [RowSlot::Spacer, RowSlot::Bubble, RowSlot::Status(_)]
    );
    let status = harness
        .list
        .session(&arrangements[0].message_id)
        .and_then(|session| session.bus().read(SizeTag::Status));
    assert_eq!(status, Some(Size::new(14.0 + 8.0, 14.0)));
}

#[test]
fn test_every_bubble_settles_within_two_passes() {
    let mut harness = Harness::new();
    let user = alice();
    let messages = vec![
        text_from(&user, "Hi"),
        text_from(&user, &"lorem ipsum ".repeat(20)),
        sent(text_from(&me(), "on my way")),
        media_from(&me(), 2),
        voice_from(&bob()),
        empty_from(&bob()),
    ];

    harness.settle(&messages);
    for message in &messages {
        let session = harness.list.session(&message.id).unwrap();
        assert!(session.passes() <= 2, "{} took {} passes", message.id, session.passes());
    }
    assert!(!harness.list.needs_rerender());
}
