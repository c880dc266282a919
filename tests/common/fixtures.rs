//! Message fixtures
//!
//! Every user constructor returns a new participant; share one value to
//! build a sender group.

use xfbubble::shared::{Attachment, DeliveryStatus, Message, Recording, User};

pub fn alice() -> User {
    User::remote("Alice")
}

pub fn bob() -> User {
    User::remote("Bob")
}

pub fn me() -> User {
    User::local("Me")
}

pub fn text_from(user: &User, text: &str) -> Message {
    Message::new(user.clone(), text).with_time("10:30")
}

pub fn empty_from(user: &User) -> Message {
    Message::new(user.clone(), "").with_time("10:30")
}

pub fn photos(count: usize) -> Vec<Attachment> {
    (0..count)
        .map(|index| Attachment::image(format!("https://example.com/{}.jpg", index)))
        .collect()
}

pub fn media_from(user: &User, count: usize) -> Message {
    empty_from(user).with_attachments(photos(count))
}

pub fn voice_from(user: &User) -> Message {
    empty_from(user).with_recording(Recording::new(7.0, vec![0.2, 0.8, 0.5, 0.9]))
}

pub fn sent(message: Message) -> Message {
    message.with_status(DeliveryStatus::Sent)
}
