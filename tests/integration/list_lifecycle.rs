//! Session lifecycle across list changes

use pretty_assertions::assert_eq;

use crate::common::*;
use xfbubble::layout::{
    MetricsRealizer, ReportOutcome, Size, SizeObservationBus, SizeRealizer, SizeTag,
};
use xfbubble::shared::{LayoutConfig, Message};

#[test]
fn test_removed_before_second_pass_discards_reports() {
    let mut harness = Harness::new();
    let user = alice();
    let messages = vec![text_from(&user, "going away"), text_from(&user, "staying")];
    harness.list.sync(&messages);

    // First pass only; the host has not reported yet
    let first = harness
        .list
        .render_pass(&messages[0], &harness.measurer, &harness.composer)
        .unwrap();
    let reporter = harness.list.session(&messages[0].id).unwrap().reporter();
    let mut realizer = MetricsRealizer::new(&harness.config, &harness.measurer);
    let sizes = realizer.realize(&first).unwrap();

    let diff = harness.list.sync(&messages[1..]);
    assert_eq!(diff.removed, vec![messages[0].id]);

    assert!(!reporter.is_live());
    assert!(!harness.composer.emit_realized(&reporter, &sizes));
    assert!(harness.list.session(&messages[0].id).is_none());
    assert!(!harness.list.needs_rerender());
}

#[test]
fn test_replaced_id_at_same_index_starts_fresh() {
    let mut harness = Harness::new();
    let user = alice();
    let original = vec![text_from(&user, "draft")];
    harness.settle(&original);
    let old_reporter = harness.list.session(&original[0].id).unwrap().reporter();

    let replacement = vec![text_from(&user, "draft")];
    let diff = harness.list.sync(&replacement);
    assert_eq!(diff.added, vec![replacement[0].id]);
    assert_eq!(diff.removed, vec![original[0].id]);

    let session = harness.list.session(&replacement[0].id).unwrap();
    assert_eq!(session.passes(), 0);
    assert!(session.verdict().is_none());
    assert_eq!(
        old_reporter.report(SizeTag::Timestamp, Size::new(30.0, 14.0)),
        ReportOutcome::Discarded
    );
}

#[test]
fn test_same_size_twice_schedules_one_rerender() {
    let bus = SizeObservationBus::new(LayoutConfig::default().size_epsilon);
    let reporter = bus.reporter();

    assert_eq!(reporter.report(SizeTag::Avatar, Size::new(48.0, 32.0)), ReportOutcome::Changed);
    assert!(bus.take_rerender());
    assert_eq!(reporter.report(SizeTag::Avatar, Size::new(48.0, 32.0)), ReportOutcome::Unchanged);
    assert!(!bus.take_rerender());
    assert_eq!(bus.change_count(), 1);
}

#[test]
fn test_subpixel_jitter_is_absorbed() {
    let bus = SizeObservationBus::new(0.5);
    bus.report(SizeTag::Timestamp, Size::new(30.0, 14.0));
    bus.take_rerender();

    assert_eq!(bus.report(SizeTag::Timestamp, Size::new(30.3, 14.2)), ReportOutcome::Unchanged);
    assert_eq!(bus.read(SizeTag::Timestamp), Some(Size::new(30.0, 14.0)));
    assert_eq!(bus.report(SizeTag::Timestamp, Size::new(31.0, 14.0)), ReportOutcome::Changed);
}

#[test]
fn test_narrower_viewport_reflows() {
    let mut harness = Harness::new();
    let messages: Vec<Message> = vec![text_from(&alice(), &"lorem ipsum dolor ".repeat(6))];

    let wide = harness.settle(&messages);
    assert!(harness.list.set_available_width(240.0));
    let narrow = harness.settle(&messages);

    assert!(narrow[0].verdict.max_content_width < wide[0].verdict.max_content_width);
    assert_eq!(harness.list.session(&messages[0].id).unwrap().passes(), 1);
}

#[test]
fn test_changed_size_after_idle_frames_schedules_rerender() {
    let mut harness = Harness::new();
    let messages = vec![text_from(&alice(), "are we still on for tonight?")];

    assert!(harness.frame(&messages));
    for _ in 0..6 {
        assert!(!harness.frame(&messages));
    }
    let session = harness.list.session(&messages[0].id).unwrap();
    assert_eq!(session.passes(), 0);

    // A sibling re-rendered wider, e.g. a font change
    let outcome = session.reporter().report(SizeTag::Timestamp, Size::new(80.0, 14.0));
    assert_eq!(outcome, ReportOutcome::Changed);
    assert!(harness.list.needs_rerender());

    // The next frames converge back to the realized width
    let mut frames = 0;
    while harness.frame(&messages) {
        frames += 1;
        assert!(frames < harness.config.max_passes, "no convergence after {frames} frames");
    }
    assert!(!harness.list.needs_rerender());
}
