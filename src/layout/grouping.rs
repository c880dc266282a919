//! Position-in-group classifier
//!
//! Consecutive messages from the same sender form a group. A message's
//! position depends only on the senders of its immediate neighbors; an
//! out-of-range neighbor counts as a different sender.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::config::LayoutConfig;
use crate::shared::messaging::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionInGroup {
    First,
    Middle,
    Last,
    Single,
}

impl PositionInGroup {
    /// Only the bottom bubble of a group shows the avatar
    pub fn shows_avatar(self) -> bool {
        matches!(self, PositionInGroup::Single | PositionInGroup::Last)
    }

    pub fn starts_group(self) -> bool {
        matches!(self, PositionInGroup::First | PositionInGroup::Single)
    }

    pub fn top_padding(self, config: &LayoutConfig) -> f32 {
        if self.starts_group() {
            config.group_start_top_padding
        } else {
            config.group_continuation_top_padding
        }
    }

    fn from_neighbors(previous_matches: bool, next_matches: bool) -> Self {
        match (previous_matches, next_matches) {
            (false, false) => PositionInGroup::Single,
            (false, true) => PositionInGroup::First,
            (true, false) => PositionInGroup::Last,
            (true, true) => PositionInGroup::Middle,
        }
    }
}

/// Classify `items[index]` by comparing sender keys with its neighbors
pub fn classify_by<T, K, F>(items: &[T], index: usize, sender: F) -> PositionInGroup
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let Some(current) = items.get(index).map(&sender) else {
        return PositionInGroup::Single;
    };
    let matches = |neighbor: Option<&T>| neighbor.map(&sender).is_some_and(|key| key == current);

    let previous = index.checked_sub(1).and_then(|i| items.get(i));
    let next = index.checked_add(1).and_then(|i| items.get(i));
    PositionInGroup::from_neighbors(matches(previous), matches(next))
}

/// Position of `messages[index]` within its sender run
pub fn classify_position(messages: &[Message], index: usize) -> PositionInGroup {
    classify_by(messages, index, sender_id)
}

/// Positions for a whole message list, index-aligned with `messages`
pub fn classify_all(messages: &[Message]) -> Vec<PositionInGroup> {
    (0..messages.len())
        .map(|index| classify_position(messages, index))
        .collect()
}

fn sender_id(message: &Message) -> Uuid {
    message.user.id
}
