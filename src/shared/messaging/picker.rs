//! Media Picker Collaborator
//!
//! The picker itself belongs to the host. The engine only tracks what the
//! picker reports (the current selection and whether it is visible) and hands
//! the finalized selection to a caller-supplied callback.

use serde::{Deserialize, Serialize};

use super::media::{attachments_from_selection, Media};
use super::message::Attachment;

/// Which picker surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPickerMode {
    #[default]
    Photos,
    Albums,
    Camera,
    CameraSelection,
}

impl MediaPickerMode {
    pub fn is_camera(self) -> bool {
        matches!(self, MediaPickerMode::Camera | MediaPickerMode::CameraSelection)
    }
}

/// Selection limits for the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionParams {
    pub selection_limit: usize,
    pub show_fullscreen_preview: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            selection_limit: 1,
            show_fullscreen_preview: true,
        }
    }
}

impl SelectionParams {
    /// A single pick without preview is sent as soon as the picker closes
    pub fn should_auto_send(&self) -> bool {
        self.selection_limit == 1 && !self.show_fullscreen_preview
    }
}

/// Selection reported by the picker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSelection {
    pub selected: Vec<Media>,
    /// Media currently open in the fullscreen preview
    pub fullscreen: Option<Media>,
}

impl MediaSelection {
    /// The explicit selection wins; otherwise the previewed media alone
    pub fn assemble(&self) -> Vec<Media> {
        if !self.selected.is_empty() {
            self.selected.clone()
        } else if let Some(media) = &self.fullscreen {
            vec![media.clone()]
        } else {
            Vec::new()
        }
    }
}

/// Rendering capabilities a host supplies for the picker
pub trait MediaPickerSurface {
    /// Whatever the host toolkit produces for a rendered surface
    type View;

    fn render_album_list(&mut self, mode: MediaPickerMode, selection: &MediaSelection) -> Self::View;

    fn render_camera_view(&mut self, mode: MediaPickerMode, selection: &MediaSelection) -> Self::View;
}

type MediaPickedCallback = Box<dyn FnMut(&[Media])>;

/// Picker state shared between the host surface and the chat input
pub struct MediaPicker<S: MediaPickerSurface> {
    surface: S,
    mode: MediaPickerMode,
    is_presented: bool,
    params: SelectionParams,
    selection: MediaSelection,
    on_media_picked: Option<MediaPickedCallback>,
}

impl<S: MediaPickerSurface> MediaPicker<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            mode: MediaPickerMode::default(),
            is_presented: false,
            params: SelectionParams::default(),
            selection: MediaSelection::default(),
            on_media_picked: None,
        }
    }

    pub fn with_params(mut self, params: SelectionParams) -> Self {
        self.params = params;
        self
    }

    /// Callback invoked with the assembled selection whenever it changes
    pub fn on_media_picked(mut self, callback: impl FnMut(&[Media]) + 'static) -> Self {
        self.on_media_picked = Some(Box::new(callback));
        self
    }

    pub fn is_presented(&self) -> bool {
        self.is_presented
    }

    pub fn mode(&self) -> MediaPickerMode {
        self.mode
    }

    pub fn params(&self) -> SelectionParams {
        self.params
    }

    pub fn selection(&self) -> &MediaSelection {
        &self.selection
    }

    pub fn present(&mut self, mode: MediaPickerMode) {
        tracing::debug!("Presenting media picker in {:?} mode", mode);
        self.mode = mode;
        self.is_presented = true;
    }

    pub fn set_mode(&mut self, mode: MediaPickerMode) {
        self.mode = mode;
    }

    /// Flip between the photo grid and the album list
    pub fn toggle_albums(&mut self) {
        self.mode = if self.mode == MediaPickerMode::Albums {
            MediaPickerMode::Photos
        } else {
            MediaPickerMode::Albums
        };
    }

    /// Record the picker's selection, clamped to the selection limit
    pub fn pick(&mut self, mut medias: Vec<Media>) -> Vec<Media> {
        if self.params.selection_limit > 0 {
            medias.truncate(self.params.selection_limit);
        }
        self.selection.selected = medias;
        self.publish()
    }

    /// Track the media open in fullscreen preview
    pub fn set_fullscreen_media(&mut self, media: Option<Media>) -> Vec<Media> {
        self.selection.fullscreen = media;
        self.publish()
    }

    /// Clear the selection and close the picker
    pub fn cancel(&mut self) -> Option<Vec<Media>> {
        self.selection.selected.clear();
        self.dismiss()
    }

    /// Close the picker.
    ///
    /// Returns the selection to send right away when the selection params
    /// ask for immediate sending.
    pub fn dismiss(&mut self) -> Option<Vec<Media>> {
        self.is_presented = false;
        if self.params.should_auto_send() {
            let medias = self.publish();
            tracing::debug!("Picker closed, auto-sending {} media", medias.len());
            Some(medias)
        } else {
            None
        }
    }

    /// Attachment entries for the current selection
    pub fn attachments(&self) -> Vec<Attachment> {
        attachments_from_selection(&self.selection.assemble())
    }

    /// Render the active surface, `None` while the picker is hidden
    pub fn render(&mut self) -> Option<S::View> {
        if !self.is_presented {
            return None;
        }
        let view = if self.mode.is_camera() {
            self.surface.render_camera_view(self.mode, &self.selection)
        } else {
            self.surface.render_album_list(self.mode, &self.selection)
        };
        Some(view)
    }

    fn publish(&mut self) -> Vec<Media> {
        let medias = self.selection.assemble();
        if let Some(callback) = self.on_media_picked.as_mut() {
            callback(&medias);
        }
        medias
    }
}
