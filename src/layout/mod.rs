//! Bubble layout engine
//!
//! The pieces run in this order on every pass:
//!
//! 1. [`classify_all`] assigns each message its position in a sender group.
//! 2. [`BubbleLayoutResolver`] measures the text through a [`TextMeasurer`]
//!    and decides timestamp placement from the sizes on the bubble's
//!    [`SizeObservationBus`].
//! 3. [`MessageBubbleComposer`] turns the verdict into a [`BubbleArrangement`].
//! 4. The host realizes the arrangement and reports sizes back to the bus,
//!    which schedules the corrective pass.
//!
//! [`BubbleSession`] and [`MessageListLayout`] tie the steps together.

pub mod composer;
pub mod grouping;
pub mod metrics;
pub mod observation;
pub mod resolver;
pub mod session;

pub use composer::{
    AvatarSlot, BubbleArrangement, BubbleCallbacks, ContentBlock, MessageBubbleComposer, RowSlot,
    StatusSlot, TextBlock, TextTimestamp, TimestampView,
};
pub use grouping::{classify_all, classify_by, classify_position, PositionInGroup};
pub use metrics::{CachedMeasurer, FontDescriptor, GlyphGridMeasurer, TextMeasure, TextMeasurer};
pub use observation::{
    MeasuredSize, Observation, ReportOutcome, Size, SizeObservationBus, SizeReporter, SizeSnapshot,
    SizeTag,
};
pub use resolver::{
    compute_layout, BubbleLayoutResolver, BubbleWidthMode, LayoutContext, LayoutVerdict,
    TimestampPlacement,
};
pub use session::{
    BubbleSession, ListDiff, MessageListLayout, MetricsRealizer, PassTicket, SizeRealizer,
};
