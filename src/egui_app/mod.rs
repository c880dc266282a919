//! egui Reference Host
//!
//! Native desktop host for the layout engine built on egui/eframe. It
//! measures text with egui's fonts, paints each
//! [`BubbleArrangement`](crate::layout::BubbleArrangement) and reports the
//! sizes it realized back to the bubble's observation bus.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── metrics.rs      - egui-backed TextMeasurer
//! ├── state.rs        - Conversation, input and picker state
//! ├── views.rs        - Top bar and chat panels
//! ├── components/     - Bubble, list, input bar, media picker
//! └── theme/          - Host colors and frame builders
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the reference host:
//! // cargo run --bin egui_app
//! ```

pub mod components;
pub mod metrics;
pub mod state;
pub mod theme;
pub mod views;

pub use components::MessageListView;
pub use metrics::EguiMeasurer;
pub use state::ChatState;
