//! Render passes
//!
//! A [`BubbleSession`] drives one bubble through its passes: the first pass
//! resolves a provisional verdict with whatever sizes are known, the host
//! reports what it realized, and the next pass corrects the verdict. The
//! epsilon rule on the observation bus makes this converge in two passes;
//! `max_passes` caps each such episode regardless. A host that renders
//! every frame runs passes that consume nothing; those close the episode
//! and leave the budget full for the next reported change.
//!
//! [`MessageListLayout`] owns one session per visible message, keyed by id.
//! A message whose id leaves the list takes its session and scope with it.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::composer::{BubbleArrangement, MessageBubbleComposer};
use super::grouping::{classify_all, PositionInGroup};
use super::metrics::TextMeasurer;
use super::observation::{MeasuredSize, Size, SizeObservationBus, SizeReporter, SizeTag};
use super::resolver::{BubbleLayoutResolver, LayoutVerdict};
use crate::shared::config::LayoutConfig;
use crate::shared::error::LayoutError;
use crate::shared::messaging::Message;

/// Line height as a multiple of font size for headless timestamp heights
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Produces the sizes a host realized for an arrangement
pub trait SizeRealizer {
    fn realize(&mut self, arrangement: &BubbleArrangement) -> Result<Vec<MeasuredSize>, LayoutError>;
}

/// Headless realizer deriving sibling sizes from the arrangement and text metrics
pub struct MetricsRealizer<'a> {
    config: &'a LayoutConfig,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> MetricsRealizer<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a dyn TextMeasurer) -> Self {
        Self { config, measurer }
    }
}

impl SizeRealizer for MetricsRealizer<'_> {
    fn realize(&mut self, arrangement: &BubbleArrangement) -> Result<Vec<MeasuredSize>, LayoutError> {
        let mut sizes = Vec::with_capacity(3);

        if let Some(avatar) = arrangement.avatar_slot() {
            // A hidden avatar still occupies its slot
            sizes.push(MeasuredSize::new(
                SizeTag::Avatar,
                Size::new(avatar.size + avatar.horizontal_padding * 2.0, avatar.size),
            ));
        }
        if let Some(status) = arrangement.status_slot() {
            sizes.push(MeasuredSize::new(
                SizeTag::Status,
                Size::new(status.size + status.horizontal_padding, status.size),
            ));
        }
        if let Some(timestamp) = arrangement.timestamps().first() {
            let font = &self.config.time_font;
            let measure = self.measurer.measure(&timestamp.text, font, f32::INFINITY)?;
            sizes.push(MeasuredSize::new(
                SizeTag::Timestamp,
                Size::new(measure.full_width, font.size * LINE_HEIGHT_FACTOR),
            ));
        }
        Ok(sizes)
    }
}

/// Token for a pass in flight; its verdict is only kept if the scope is
/// still the one the pass started in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTicket {
    message_id: Uuid,
    generation: u64,
}

/// Layout state of one bubble
#[derive(Debug)]
pub struct BubbleSession {
    message_id: Uuid,
    bus: SizeObservationBus,
    verdict: Option<LayoutVerdict>,
    passes: u32,
    max_passes: u32,
    reflow_pending: bool,
}

impl BubbleSession {
    pub fn new(message_id: Uuid, config: &LayoutConfig) -> Self {
        Self {
            message_id,
            bus: SizeObservationBus::new(config.size_epsilon),
            verdict: None,
            passes: 0,
            max_passes: config.max_passes,
            reflow_pending: false,
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn bus(&self) -> &SizeObservationBus {
        &self.bus
    }

    pub fn reporter(&self) -> SizeReporter {
        self.bus.reporter()
    }

    /// Verdict of the latest committed pass
    pub fn verdict(&self) -> Option<&LayoutVerdict> {
        self.verdict.as_ref()
    }

    /// Passes in the current convergence episode
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Whether the host should schedule another pass
    pub fn should_rerender(&self) -> bool {
        !self.bus.is_torn_down() && self.bus.rerender_requested() && self.passes < self.max_passes
    }

    /// Point the session at `message`. A different id is a different bubble:
    /// the scope restarts and earlier reporters go stale.
    pub fn bind(&mut self, message: &Message) {
        if message.id == self.message_id {
            return;
        }
        tracing::debug!("Bubble scope {} replaced by {}", self.message_id, message.id);
        self.message_id = message.id;
        self.bus.reset();
        self.verdict = None;
        self.passes = 0;
        self.reflow_pending = false;
    }

    /// Restart the pass budget, e.g. after the viewport width changed.
    /// The next pass counts as the first of a new episode.
    pub fn invalidate(&mut self) {
        self.passes = 0;
        self.reflow_pending = true;
    }

    pub fn begin_pass(&self) -> PassTicket {
        PassTicket {
            message_id: self.message_id,
            generation: self.bus.generation(),
        }
    }

    fn accepts(&self, ticket: &PassTicket) -> bool {
        let live = !self.bus.is_torn_down()
            && ticket.message_id == self.message_id
            && ticket.generation == self.bus.generation();
        if !live {
            tracing::debug!("Dropping verdict for stale scope of {}", ticket.message_id);
        }
        live
    }

    /// Store `verdict` as a counted pass unless the scope moved on since
    /// `ticket` was issued
    pub fn commit(&mut self, ticket: PassTicket, verdict: LayoutVerdict) -> bool {
        if !self.accepts(&ticket) {
            return false;
        }
        self.verdict = Some(verdict);
        self.passes += 1;
        true
    }

    /// Resolve and compose one pass with the sizes observed so far
    pub fn render_pass(
        &mut self,
        message: &Message,
        position: PositionInGroup,
        available_width: f32,
        resolver: &BubbleLayoutResolver<'_>,
        composer: &MessageBubbleComposer,
    ) -> Result<BubbleArrangement, LayoutError> {
        self.bind(message);
        let ticket = self.begin_pass();
        let snapshot = self.bus.snapshot();
        // This pass consumes every change reported so far
        let pending = self.bus.take_rerender();
        let reflow = std::mem::take(&mut self.reflow_pending);
        let counted = pending || reflow || self.verdict.is_none();

        let verdict = resolver.resolve(message, available_width, &snapshot)?;
        if counted {
            self.commit(ticket, verdict);
        } else if self.accepts(&ticket) {
            // Nothing changed since the last pass: the episode is over
            self.verdict = Some(verdict);
            self.passes = 0;
        }
        Ok(composer.compose(message, position, &verdict))
    }

    /// Run passes until the reported sizes stop changing or the pass budget
    /// is spent
    pub fn settle(
        &mut self,
        message: &Message,
        position: PositionInGroup,
        available_width: f32,
        resolver: &BubbleLayoutResolver<'_>,
        composer: &MessageBubbleComposer,
        realizer: &mut dyn SizeRealizer,
    ) -> Result<BubbleArrangement, LayoutError> {
        loop {
            let arrangement =
                self.render_pass(message, position, available_width, resolver, composer)?;
            let sizes = realizer.realize(&arrangement)?;
            composer.emit_realized(&self.reporter(), &sizes);

            if !self.bus.rerender_requested() {
                crate::debug_log!("Bubble {} settled after {} passes", message.id, self.passes);
                return Ok(arrangement);
            }
            if self.passes >= self.max_passes {
                tracing::warn!(
                    "Bubble {} still changing after {} passes, keeping last verdict",
                    message.id,
                    self.passes
                );
                return Ok(arrangement);
            }
        }
    }

    /// End the scope; pending reports and verdicts are dropped
    pub fn tear_down(&mut self) {
        self.bus.tear_down();
        self.verdict = None;
    }
}

/// What changed in the visible list since the last sync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDiff {
    pub added: Vec<Uuid>,
    pub removed: Vec<Uuid>,
}

/// One session per visible message, plus group positions
pub struct MessageListLayout {
    config: LayoutConfig,
    sessions: HashMap<Uuid, BubbleSession>,
    positions: HashMap<Uuid, PositionInGroup>,
    order: Vec<Uuid>,
    available_width: Option<f32>,
}

impl MessageListLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
            positions: HashMap::new(),
            order: Vec::new(),
            available_width: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Message ids in display order
    pub fn order(&self) -> &[Uuid] {
        &self.order
    }

    pub fn session(&self, id: &Uuid) -> Option<&BubbleSession> {
        self.sessions.get(id)
    }

    pub fn session_mut(&mut self, id: &Uuid) -> Option<&mut BubbleSession> {
        self.sessions.get_mut(id)
    }

    pub fn position(&self, id: &Uuid) -> Option<PositionInGroup> {
        self.positions.get(id).copied()
    }

    /// Diff against the host's current list.
    ///
    /// Sessions are keyed by message id, so a slot whose id changed is a
    /// removal plus an addition, never a mutation of the old scope.
    pub fn sync(&mut self, messages: &[Message]) -> ListDiff {
        let current: HashSet<Uuid> = messages.iter().map(|message| message.id).collect();
        let mut diff = ListDiff::default();

        let stale: Vec<Uuid> = self
            .sessions
            .keys()
            .filter(|id| !current.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(mut session) = self.sessions.remove(&id) {
                session.tear_down();
            }
            diff.removed.push(id);
        }

        for message in messages {
            if !self.sessions.contains_key(&message.id) {
                self.sessions
                    .insert(message.id, BubbleSession::new(message.id, &self.config));
                diff.added.push(message.id);
            }
        }

        self.order = messages.iter().map(|message| message.id).collect();
        self.positions = messages
            .iter()
            .zip(classify_all(messages))
            .map(|(message, position)| (message.id, position))
            .collect();

        if !diff.added.is_empty() || !diff.removed.is_empty() {
            tracing::debug!(
                "Message list synced: {} added, {} removed, {} visible",
                diff.added.len(),
                diff.removed.len(),
                self.sessions.len()
            );
        }
        diff
    }

    /// Record the viewport width. A material change restarts every bubble's
    /// pass budget. Returns whether it changed.
    pub fn set_available_width(&mut self, width: f32) -> bool {
        let changed = self
            .available_width
            .map_or(true, |previous| (previous - width).abs() > self.config.size_epsilon);
        if changed {
            self.available_width = Some(width);
            for session in self.sessions.values_mut() {
                session.invalidate();
            }
        }
        changed
    }

    pub fn available_width(&self) -> Option<f32> {
        self.available_width
    }

    /// Whether any bubble wants another pass
    pub fn needs_rerender(&self) -> bool {
        self.sessions.values().any(BubbleSession::should_rerender)
    }

    /// One pass for `message`, creating its session if needed
    pub fn render_pass(
        &mut self,
        message: &Message,
        measurer: &dyn TextMeasurer,
        composer: &MessageBubbleComposer,
    ) -> Result<BubbleArrangement, LayoutError> {
        let width = self.available_width.unwrap_or(0.0);
        let position = self.position(&message.id).unwrap_or(PositionInGroup::Single);
        let resolver = BubbleLayoutResolver::new(&self.config, measurer);
        let session = self
            .sessions
            .entry(message.id)
            .or_insert_with(|| BubbleSession::new(message.id, &self.config));
        session.render_pass(message, position, width, &resolver, composer)
    }

    /// Sync with `messages` and settle every bubble headlessly
    pub fn settle_all(
        &mut self,
        messages: &[Message],
        measurer: &dyn TextMeasurer,
        composer: &MessageBubbleComposer,
        realizer: &mut dyn SizeRealizer,
    ) -> Result<Vec<BubbleArrangement>, LayoutError> {
        self.sync(messages);
        let width = self.available_width.unwrap_or(0.0);
        let resolver = BubbleLayoutResolver::new(&self.config, measurer);

        let mut arrangements = Vec::with_capacity(messages.len());
        for message in messages {
            let position = self.positions.get(&message.id).copied().unwrap_or(PositionInGroup::Single);
            let Some(session) = self.sessions.get_mut(&message.id) else {
                continue;
            };
            arrangements.push(session.settle(message, position, width, &resolver, composer, realizer)?);
        }
        Ok(arrangements)
    }
}
