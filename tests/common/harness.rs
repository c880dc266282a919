//! Headless layout harness

use xfbubble::layout::{
    BubbleArrangement, GlyphGridMeasurer, MessageBubbleComposer, MessageListLayout, MetricsRealizer,
    SizeRealizer,
};
use xfbubble::shared::{ChatTheme, LayoutConfig, Message};

/// Viewport width used by the scenarios
pub const VIEWPORT: f32 = 390.0;

/// Engine pieces wired together the way a host would
pub struct Harness {
    pub config: LayoutConfig,
    pub measurer: GlyphGridMeasurer,
    pub composer: MessageBubbleComposer,
    pub list: MessageListLayout,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        let mut list = MessageListLayout::new(config.clone());
        list.set_available_width(VIEWPORT);
        Self {
            measurer: GlyphGridMeasurer::default(),
            composer: MessageBubbleComposer::new(config.clone(), ChatTheme::default()),
            list,
            config,
        }
    }

    /// Settle every message and return the final arrangements
    pub fn settle(&mut self, messages: &[Message]) -> Vec<BubbleArrangement> {
        let mut realizer = MetricsRealizer::new(&self.config, &self.measurer);
        self.list
            .settle_all(messages, &self.measurer, &self.composer, &mut realizer)
            .expect("layout should settle")
    }

    /// One host frame: a single pass per message, then report what was realized.
    /// Returns whether the host would schedule another frame.
    pub fn frame(&mut self, messages: &[Message]) -> bool {
        let mut realizer = MetricsRealizer::new(&self.config, &self.measurer);
        self.list.sync(messages);
        for message in messages {
            let arrangement = self
                .list
                .render_pass(message, &self.measurer, &self.composer)
                .expect("pass should resolve");
            let sizes = realizer.realize(&arrangement).expect("sizes should realize");
            if let Some(session) = self.list.session(&message.id) {
                self.composer.emit_realized(&session.reporter(), &sizes);
            }
        }
        self.list.needs_rerender()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
