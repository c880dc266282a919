//! Media picker selection feeding a bubble

use std::cell::RefCell;
use std::rc::Rc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use crate::common::*;
use xfbubble::layout::{BubbleWidthMode, ContentBlock};
use xfbubble::shared::messaging::{
    attachments_from_selection, MediaPicker, MediaPickerMode, MediaPickerSurface, MediaSelection,
    SelectionParams,
};
use xfbubble::shared::{Media, MediaKind, Message};

/// Surface that renders nothing
struct NullSurface;

impl MediaPickerSurface for NullSurface {
    type View = ();

    fn render_album_list(&mut self, _mode: MediaPickerMode, _selection: &MediaSelection) {}

    fn render_camera_view(&mut self, _mode: MediaPickerMode, _selection: &MediaSelection) {}
}

fn library() -> Vec<Media> {
    vec![
        Media::new(MediaKind::Image, "file:///a.jpg").with_thumbnail("file:///a_thumb.jpg"),
        Media::new(MediaKind::Video, "file:///b.mp4"),
        Media::new(MediaKind::Image, "file:///c.jpg"),
    ]
}

#[test]
fn test_selection_becomes_fixed_media_bubble() {
    let mut picker = MediaPicker::new(NullSurface).with_params(SelectionParams {
        selection_limit: 10,
        show_fullscreen_preview: true,
    });
    picker.present(MediaPickerMode::Photos);
    picker.pick(library());

    let attachments = picker.attachments();
    assert_eq!(attachments.len(), 3);
    assert_eq!(attachments[0].thumbnail_url(), "file:///a_thumb.jpg");
    assert_eq!(attachments[1].thumbnail_url(), "file:///b.mp4");

    let message: Message = empty_from(&me()).with_attachments(attachments);
    let mut harness = Harness::new();
    let arrangements = harness.settle(std::slice::from_ref(&message));
    let bubble = &arrangements[0];

    assert_eq!(
        bubble.verdict.bubble_width_mode,
        BubbleWidthMode::FixedMedia { width: 204.0 }
    );
    assert_matches!(&bubble.content[0], ContentBlock::AttachmentGrid { attachments, .. } if attachments.len() == 3);
}

#[test]
fn test_single_pick_without_preview_sends_on_close() {
    let published = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&published);
    let mut picker = MediaPicker::new(NullSurface)
        .with_params(SelectionParams {
            selection_limit: 1,
            show_fullscreen_preview: false,
        })
        .on_media_picked(move |medias: &[Media]| sink.borrow_mut().push(medias.len()));

    picker.present(MediaPickerMode::Photos);
    picker.pick(library());
    assert_eq!(picker.selection().selected.len(), 1);

    let sent = picker.dismiss().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(!picker.is_presented());
    assert_eq!(*published.borrow(), vec![1, 1]);
}

#[test]
fn test_preview_mode_waits_for_confirmation() {
    let mut picker = MediaPicker::new(NullSurface);
    picker.present(MediaPickerMode::Photos);
    picker.set_fullscreen_media(library().into_iter().next());

    assert_eq!(picker.dismiss(), None);
    assert_eq!(attachments_from_selection(&picker.selection().assemble()).len(), 1);
}
