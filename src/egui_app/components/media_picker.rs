//! Media Picker Component
//!
//! egui surface for the [`MediaPicker`]. The surface only describes what to
//! show; [`render`] draws it in a window and feeds clicks back to the picker.

use eframe::egui;

use crate::egui_app::theme::{colors, styles};
use crate::shared::messaging::{
    MediaPicker, MediaPickerMode, MediaPickerSurface, MediaSelection,
};
use crate::shared::{Media, MediaKind};

/// One selectable library item
#[derive(Debug, Clone, PartialEq)]
pub struct PickerTile {
    pub media: Media,
    pub label: String,
    pub selected: bool,
}

/// What the picker window shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct PickerScreen {
    pub title: &'static str,
    pub tiles: Vec<PickerTile>,
    pub is_camera: bool,
}

/// Picker surface backed by a fixed in-memory library
pub struct EguiPickerSurface {
    library: Vec<Media>,
}

impl EguiPickerSurface {
    pub fn new(library: Vec<Media>) -> Self {
        Self { library }
    }

    /// A few placeholder photos and a clip
    pub fn demo() -> Self {
        let mut library: Vec<Media> = (1..=5)
            .map(|index| {
                Media::new(MediaKind::Image, format!("demo://photos/{}.jpg", index))
                    .with_thumbnail(format!("demo://photos/{}_thumb.jpg", index))
            })
            .collect();
        library.push(Media::new(MediaKind::Video, "demo://videos/beach.mp4"));
        Self::new(library)
    }

    fn tiles(&self, selection: &MediaSelection) -> Vec<PickerTile> {
        self.library
            .iter()
            .enumerate()
            .map(|(index, media)| PickerTile {
                media: media.clone(),
                label: match media.kind {
                    MediaKind::Video => format!("▶ Clip {}", index + 1),
                    _ => format!("🖼 Photo {}", index + 1),
                },
                selected: selection.selected.contains(media),
            })
            .collect()
    }
}

impl MediaPickerSurface for EguiPickerSurface {
    type View = PickerScreen;

    fn render_album_list(&mut self, mode: MediaPickerMode, selection: &MediaSelection) -> PickerScreen {
        PickerScreen {
            title: if mode == MediaPickerMode::Albums { "Albums" } else { "Photos" },
            tiles: self.tiles(selection),
            is_camera: false,
        }
    }

    fn render_camera_view(&mut self, _mode: MediaPickerMode, _selection: &MediaSelection) -> PickerScreen {
        PickerScreen {
            title: "Camera",
            tiles: Vec::new(),
            is_camera: true,
        }
    }
}

enum PickerAction {
    Toggle(Media),
    ToggleAlbums,
    Camera,
    Attach,
    Cancel,
}

/// Draw the picker if it is presented.
///
/// Returns the media to send when the picker closed with a selection.
pub fn render(ctx: &egui::Context, picker: &mut MediaPicker<EguiPickerSurface>) -> Option<Vec<Media>> {
    let screen = picker.render()?;
    let mut action = None;

    egui::Window::new(screen.title)
        .frame(styles::picker_frame())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Albums").clicked() {
                    action = Some(PickerAction::ToggleAlbums);
                }
                if ui.button("📷 Camera").clicked() {
                    action = Some(PickerAction::Camera);
                }
            });
            ui.separator();

            if screen.is_camera {
                ui.colored_label(colors::TEXT_SECONDARY, "No camera available");
            } else {
                egui::Grid::new("media_picker_grid").num_columns(3).show(ui, |ui| {
                    for (index, tile) in screen.tiles.iter().enumerate() {
                        if ui.selectable_label(tile.selected, tile.label.as_str()).clicked() {
                            action = Some(PickerAction::Toggle(tile.media.clone()));
                        }
                        if index % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(PickerAction::Cancel);
                }
                let count = picker.selection().selected.len();
                if ui.add_enabled(count > 0, egui::Button::new(format!("Attach ({})", count))).clicked() {
                    action = Some(PickerAction::Attach);
                }
            });
        });

    match action? {
        PickerAction::Toggle(media) => {
            let mut selected = picker.selection().selected.clone();
            match selected.iter().position(|item| item == &media) {
                Some(index) => {
                    selected.remove(index);
                }
                None => selected.push(media),
            }
            picker.pick(selected);
            None
        }
        PickerAction::ToggleAlbums => {
            picker.toggle_albums();
            None
        }
        PickerAction::Camera => {
            picker.set_mode(MediaPickerMode::Camera);
            None
        }
        PickerAction::Attach => {
            let medias = picker.selection().assemble();
            picker.dismiss();
            Some(medias)
        }
        PickerAction::Cancel => picker.cancel().filter(|medias| !medias.is_empty()),
    }
}
