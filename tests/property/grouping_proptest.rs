//! Property-based tests for the group position classifier

use proptest::prelude::*;
use xfbubble::layout::{classify_by, PositionInGroup};

fn senders() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..3, 0..40)
}

fn classify(senders: &[u8]) -> Vec<PositionInGroup> {
    (0..senders.len())
        .map(|index| classify_by(senders, index, |sender| *sender))
        .collect()
}

proptest! {
    #[test]
    fn test_group_starts_match_sender_changes(senders in senders()) {
        let positions = classify(&senders);
        for (index, position) in positions.iter().enumerate() {
            let changed = index == 0 || senders[index - 1] != senders[index];
            prop_assert_eq!(position.starts_group(), changed);
        }
    }

    #[test]
    fn test_avatar_shown_once_per_run(senders in senders()) {
        let positions = classify(&senders);
        let runs = senders.windows(2).filter(|pair| pair[0] != pair[1]).count()
            + usize::from(!senders.is_empty());
        let avatars = positions.iter().filter(|position| position.shows_avatar()).count();
        prop_assert_eq!(avatars, runs);
    }

    #[test]
    fn test_out_of_range_is_single(senders in senders(), extra in 0usize..10) {
        let index = senders.len() + extra;
        prop_assert_eq!(classify_by(&senders, index, |sender| *sender), PositionInGroup::Single);
    }
}

#[test]
fn test_mixed_sender_scenario() {
    use PositionInGroup::*;
    assert_eq!(classify(&[0, 0, 1, 0, 0]), vec![First, Last, Single, First, Last]);
}
