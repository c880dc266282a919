//! Chat State
//!
//! Conversation shown by the reference host, the input bar contents and the
//! media picker. Bubble taps arrive through [`BubbleCallbacks`] and are
//! queued here until the frame ends.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use uuid::Uuid;

use super::components::EguiPickerSurface;
use crate::layout::BubbleCallbacks;
use crate::shared::messaging::{attachments_from_selection, MediaPicker, SelectionParams};
use crate::shared::{
    Attachment, DeliveryStatus, DraftMessage, Media, Message, Recording, ReplyReference, User,
};

/// Central state of the chat screen
pub struct ChatState {
    pub me: User,
    pub friend: User,
    pub messages: Vec<Message>,
    pub input: String,
    pub picker: MediaPicker<EguiPickerSurface>,
    pending_medias: Rc<RefCell<Vec<Media>>>,
    resend_queue: Rc<RefCell<Vec<DraftMessage>>>,
    opened_attachment: Rc<RefCell<Option<Attachment>>>,
}

impl ChatState {
    pub fn new(me: User, friend: User, messages: Vec<Message>) -> Self {
        let pending_medias = Rc::new(RefCell::new(Vec::new()));
        let picked = Rc::clone(&pending_medias);
        let picker = MediaPicker::new(EguiPickerSurface::demo())
            .with_params(SelectionParams {
                selection_limit: 10,
                show_fullscreen_preview: true,
            })
            .on_media_picked(move |medias: &[Media]| {
                *picked.borrow_mut() = medias.to_vec();
            });

        Self {
            me,
            friend,
            messages,
            input: String::new(),
            picker,
            pending_medias,
            resend_queue: Rc::new(RefCell::new(Vec::new())),
            opened_attachment: Rc::new(RefCell::new(None)),
        }
    }

    /// A short conversation covering every bubble shape
    pub fn demo() -> Self {
        let me = User::local("Me");
        let friend = User::remote("Stan");
        let messages = demo_messages(&me, &friend);
        Self::new(me, friend, messages)
    }

    /// Callbacks handed to the bubble composer
    pub fn callbacks(&self) -> BubbleCallbacks {
        let resend_queue = Rc::clone(&self.resend_queue);
        let opened = Rc::clone(&self.opened_attachment);
        BubbleCallbacks::default()
            .on_resend(move |draft| resend_queue.borrow_mut().push(draft))
            .on_attachment_tap(move |attachment| *opened.borrow_mut() = Some(attachment.clone()))
    }

    pub fn message(&self, id: &Uuid) -> Option<&Message> {
        self.messages.iter().find(|message| &message.id == id)
    }

    pub fn pending_medias(&self) -> Vec<Media> {
        self.pending_medias.borrow().clone()
    }

    pub fn clear_pending_medias(&mut self) {
        self.pending_medias.borrow_mut().clear();
    }

    pub fn opened_attachment(&self) -> Option<Attachment> {
        self.opened_attachment.borrow().clone()
    }

    pub fn close_attachment(&mut self) {
        self.opened_attachment.borrow_mut().take();
    }

    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() || !self.pending_medias.borrow().is_empty()
    }

    /// Send the input bar contents with any picked media
    pub fn send_input(&mut self) -> Option<Uuid> {
        if !self.can_send() {
            return None;
        }
        let draft = DraftMessage {
            id: None,
            text: self.input.trim().to_string(),
            medias: std::mem::take(&mut *self.pending_medias.borrow_mut()),
            recording: None,
            reply_to: None,
            created_at: Utc::now(),
        };
        self.input.clear();
        Some(self.submit(draft))
    }

    /// Send media confirmed in the picker, captioned with the input text
    pub fn send_medias(&mut self, medias: Vec<Media>) -> Option<Uuid> {
        if medias.is_empty() {
            return None;
        }
        *self.pending_medias.borrow_mut() = medias;
        self.send_input()
    }

    /// Append a message built from `draft`.
    ///
    /// A draft carrying the id of a failed message replaces that message;
    /// the replacement gets a fresh id.
    pub fn submit(&mut self, draft: DraftMessage) -> Uuid {
        if let Some(previous) = draft.id {
            self.messages.retain(|message| message.id != previous);
        }

        let mut message = Message::new(self.me.clone(), draft.text)
            .with_attachments(attachments_from_selection(&draft.medias))
            .with_status(DeliveryStatus::Sent);
        if let Some(recording) = draft.recording {
            message = message.with_recording(recording);
        }
        if let Some(reply) = draft.reply_to {
            message = message.with_reply_to(reply);
        }

        tracing::info!("Sending message {} ({} attachments)", message.id, message.attachments.len());
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// Resend every failed message whose status was tapped this frame.
    /// Taps on delivered messages are dropped.
    pub fn process_resends(&mut self) -> usize {
        let drafts: Vec<DraftMessage> = self.resend_queue.borrow_mut().drain(..).collect();
        let mut count = 0;
        for draft in drafts {
            let failed = draft
                .id
                .and_then(|id| self.message(&id))
                .is_some_and(|message| message.status.as_ref().is_some_and(DeliveryStatus::is_error));
            if failed {
                self.submit(draft);
                count += 1;
            } else {
                tracing::debug!("Ignoring resend for message that did not fail");
            }
        }
        count
    }
}

fn demo_messages(me: &User, friend: &User) -> Vec<Message> {
    let photos = vec![
        Attachment::image("demo://photos/1.jpg").with_thumbnail("demo://photos/1_thumb.jpg"),
        Attachment::image("demo://photos/2.jpg").with_thumbnail("demo://photos/2_thumb.jpg"),
        Attachment::video("demo://videos/beach.mp4"),
    ];
    let failed = Message::new(me.clone(), "This one did not make it through")
        .with_time("09:58");
    let failed_draft = failed.to_draft();

    let greeting = Message::new(friend.clone(), "Hi, buddy!").with_time("09:41");
    vec![
        greeting.clone(),
        Message::new(
            friend.clone(),
            "Are we still on for the weekend? I found a place near the beach that rents bikes",
        )
        .with_time("09:42"),
        Message::new(me.clone(), "Sure! Send me the link").with_time("09:45").with_status(DeliveryStatus::Read),
        Message::new(me.clone(), "")
            .with_time("09:46")
            .with_attachments(photos.clone())
            .with_status(DeliveryStatus::Read),
        Message::new(friend.clone(), "Look at this view")
            .with_time("09:50")
            .with_attachments(photos[..1].to_vec())
            .with_reply_to(ReplyReference {
                message_id: greeting.id,
                user: friend.clone(),
                text: greeting.text.clone(),
            }),
        Message::new(friend.clone(), "")
            .with_time("09:51")
            .with_recording(Recording::new(
                14.0,
                (0..32).map(|i| ((i as f32 * 0.7).sin().abs() * 0.9) + 0.1).collect(),
            )),
        Message::new(me.clone(), "ok").with_time("09:55").with_status(DeliveryStatus::Sent),
        failed.with_status(DeliveryStatus::Error(failed_draft)),
    ]
}
