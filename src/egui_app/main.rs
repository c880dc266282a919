/**
 * egui Reference Host - Main Entry Point
 *
 * Runs a demo conversation through the bubble layout engine. Layout
 * constants are read from the file named by XFBUBBLE_LAYOUT_CONFIG or from
 * the user config directory; the built-in defaults are used otherwise.
 */
use eframe::egui;
use tracing_subscriber::EnvFilter;
use xfbubble::egui_app::{theme::styles, views, ChatState, MessageListView};
use xfbubble::layout::MessageBubbleComposer;
use xfbubble::shared::{ChatTheme, LayoutConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xfbubble=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> LayoutConfig {
    match LayoutConfig::discover() {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("Using default layout config: {}", error);
            LayoutConfig::default()
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    init_tracing();
    let config = load_config();
    tracing::info!("Starting reference host (media width {})", config.media_width);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "XFBubble",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(BubbleApp::new(&cc.egui_ctx, config)))
        }),
    )
}

/// Main application state
struct BubbleApp {
    state: ChatState,
    list: MessageListView,
    composer: MessageBubbleComposer,
}

impl BubbleApp {
    fn new(ctx: &egui::Context, config: LayoutConfig) -> Self {
        let state = ChatState::demo();
        let composer = MessageBubbleComposer::new(config.clone(), ChatTheme::default())
            .with_callbacks(state.callbacks());
        Self {
            list: MessageListView::new(ctx, config),
            state,
            composer,
        }
    }
}

impl eframe::App for BubbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        views::render_top_bar(ctx, &self.state);
        views::render_main_panel(ctx, &mut self.state, &mut self.list, &self.composer);
    }
}
