//! Property-based tests for the size observation bus

use proptest::prelude::*;
use xfbubble::layout::{ReportOutcome, Size, SizeObservationBus, SizeTag};

fn tag() -> impl Strategy<Value = SizeTag> {
    prop::sample::select(SizeTag::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_repeat_report_is_unchanged(
        tag in tag(),
        width in 0.0f32..500.0,
        height in 0.0f32..100.0,
    ) {
        let bus = SizeObservationBus::new(0.5);
        let size = Size::new(width, height);

        prop_assert_eq!(bus.report(tag, size), ReportOutcome::Changed);
        prop_assert_eq!(bus.report(tag, size), ReportOutcome::Unchanged);
        prop_assert_eq!(bus.change_count(), 1);
    }

    #[test]
    fn test_stale_generation_never_writes(
        tag in tag(),
        width in 0.0f32..500.0,
        resets in 1usize..4,
    ) {
        let bus = SizeObservationBus::new(0.5);
        let stale = bus.reporter();
        for _ in 0..resets {
            bus.reset();
        }

        prop_assert_eq!(stale.report(tag, Size::new(width, 10.0)), ReportOutcome::Discarded);
        prop_assert_eq!(bus.read(tag), None);
        prop_assert!(!bus.rerender_requested());
    }

    #[test]
    fn test_reports_settle_to_last_material_change(
        widths in prop::collection::vec(0.0f32..200.0, 1..20),
    ) {
        let bus = SizeObservationBus::new(0.5);
        let mut expected: Option<f32> = None;
        for width in widths {
            bus.report(SizeTag::Timestamp, Size::new(width, 14.0));
            let material = expected.map_or(true, |previous| (previous - width).abs() > 0.5);
            if material {
                expected = Some(width);
            }
        }
        prop_assert_eq!(bus.read(SizeTag::Timestamp).map(|size| size.width), expected);
    }
}
