//! UI Components
//!
//! Reusable pieces of the chat screen.

pub mod input_bar;
pub mod media_picker;
pub mod message_bubble;
pub mod message_list;

pub use media_picker::{EguiPickerSurface, PickerScreen, PickerTile};
pub use message_bubble::BubbleOutput;
pub use message_list::{ListOutput, MessageListView};
