//! Size Observation Bus
//!
//! Children of a bubble (avatar, status glyph, timestamp) report the size
//! they actually rendered at; the bubble reads those sizes on its next pass.
//! A report only counts as a change when it moves a dimension by more than
//! the configured epsilon, so a verdict that nudges a child by a sub-pixel
//! cannot start a re-render loop.
//!
//! Every bus is one scope with a generation number. Reporters capture the
//! generation they were handed out in; once the scope is reset for a new
//! message identity or torn down, their writes are discarded.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Which sibling produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTag {
    Avatar,
    Status,
    Timestamp,
}

impl SizeTag {
    pub const ALL: [SizeTag; 3] = [SizeTag::Avatar, SizeTag::Status, SizeTag::Timestamp];
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeTag::Avatar => write!(f, "avatar"),
            SizeTag::Status => write!(f, "status"),
            SizeTag::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// Width x height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension differs by more than `epsilon`
    pub fn differs_from(&self, other: &Size, epsilon: f32) -> bool {
        (self.width - other.width).abs() > epsilon || (self.height - other.height).abs() > epsilon
    }
}

/// A size tagged with the sibling that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredSize {
    pub tag: SizeTag,
    pub size: Size,
}

impl MeasuredSize {
    pub const fn new(tag: SizeTag, size: Size) -> Self {
        Self { tag, size }
    }
}

/// Per-tag measurement state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    Unmeasured,
    Measured(Size),
}

impl Observation {
    pub fn size(&self) -> Option<Size> {
        match self {
            Observation::Unmeasured => None,
            Observation::Measured(size) => Some(*size),
        }
    }
}

/// Immutable copy of a scope's measurements at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSnapshot {
    pub avatar: Option<Size>,
    pub status: Option<Size>,
    pub timestamp: Option<Size>,
}

impl SizeSnapshot {
    pub fn read(&self, tag: SizeTag) -> Option<Size> {
        match tag {
            SizeTag::Avatar => self.avatar,
            SizeTag::Status => self.status,
            SizeTag::Timestamp => self.timestamp,
        }
    }

    /// Measured size, or zero while the sibling is still pending
    pub fn size_or_zero(&self, tag: SizeTag) -> Size {
        self.read(tag).unwrap_or(Size::ZERO)
    }

    pub fn with(mut self, tag: SizeTag, size: Size) -> Self {
        match tag {
            SizeTag::Avatar => self.avatar = Some(size),
            SizeTag::Status => self.status = Some(size),
            SizeTag::Timestamp => self.timestamp = Some(size),
        }
        self
    }

    /// Whether any tag still lacks a measurement
    pub fn is_provisional(&self) -> bool {
        SizeTag::ALL.iter().any(|tag| self.read(*tag).is_none())
    }
}

/// What a report did to the scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Within epsilon of the stored value; nothing scheduled
    Unchanged,
    /// Stored, and a re-render of the bubble was scheduled
    Changed,
    /// The scope was reset or torn down since the reporter was issued
    Discarded,
}

type Listener = Box<dyn FnMut(MeasuredSize)>;

struct ScopeState {
    generation: u64,
    torn_down: bool,
    epsilon: f32,
    slots: HashMap<SizeTag, Size>,
    rerender_requested: bool,
    changes: u64,
}

struct Scope {
    state: RefCell<ScopeState>,
    listeners: RefCell<Vec<Listener>>,
}

impl Scope {
    fn report(&self, generation: u64, tag: SizeTag, size: Size) -> ReportOutcome {
        let outcome = {
            let mut state = self.state.borrow_mut();
            if state.torn_down || state.generation != generation {
                tracing::debug!(
                    "Discarding {} report for stale scope (generation {} vs {})",
                    tag,
                    generation,
                    state.generation
                );
                return ReportOutcome::Discarded;
            }

            let epsilon = state.epsilon;
            match state.slots.get(&tag) {
                Some(previous) if !previous.differs_from(&size, epsilon) => ReportOutcome::Unchanged,
                _ => {
                    state.slots.insert(tag, size);
                    state.rerender_requested = true;
                    state.changes += 1;
                    ReportOutcome::Changed
                }
            }
        };

        crate::debug_trace!("Size report {} {:?} -> {:?}", tag, size, outcome);
        if outcome == ReportOutcome::Changed {
            self.notify(MeasuredSize::new(tag, size));
        }
        outcome
    }

    fn notify(&self, measured: MeasuredSize) {
        // A listener reporting back into its own scope would re-enter here.
        match self.listeners.try_borrow_mut() {
            Ok(mut listeners) => {
                for listener in listeners.iter_mut() {
                    listener(measured);
                }
            }
            Err(_) => tracing::warn!("Skipping re-entrant size notification for {}", measured.tag),
        }
    }
}

/// Handle a child uses to report its realized size
#[derive(Clone)]
pub struct SizeReporter {
    scope: Weak<Scope>,
    generation: u64,
}

impl SizeReporter {
    pub fn report(&self, tag: SizeTag, size: Size) -> ReportOutcome {
        match self.scope.upgrade() {
            Some(scope) => scope.report(self.generation, tag, size),
            None => ReportOutcome::Discarded,
        }
    }

    pub fn report_measured(&self, measured: MeasuredSize) -> ReportOutcome {
        self.report(measured.tag, measured.size)
    }

    /// Whether reports from this handle would still be applied
    pub fn is_live(&self) -> bool {
        self.scope.upgrade().is_some_and(|scope| {
            let state = scope.state.borrow();
            !state.torn_down && state.generation == self.generation
        })
    }
}

impl fmt::Debug for SizeReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeReporter")
            .field("generation", &self.generation)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Observation scope for one message bubble
pub struct SizeObservationBus {
    scope: Rc<Scope>,
}

impl SizeObservationBus {
    pub fn new(epsilon: f32) -> Self {
        Self {
            scope: Rc::new(Scope {
                state: RefCell::new(ScopeState {
                    generation: 0,
                    torn_down: false,
                    epsilon,
                    slots: HashMap::new(),
                    rerender_requested: false,
                    changes: 0,
                }),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Reporter bound to the current generation
    pub fn reporter(&self) -> SizeReporter {
        SizeReporter {
            scope: Rc::downgrade(&self.scope),
            generation: self.generation(),
        }
    }

    /// Report into the current generation
    pub fn report(&self, tag: SizeTag, size: Size) -> ReportOutcome {
        let generation = self.generation();
        self.scope.report(generation, tag, size)
    }

    pub fn read(&self, tag: SizeTag) -> Option<Size> {
        self.scope.state.borrow().slots.get(&tag).copied()
    }

    pub fn observation(&self, tag: SizeTag) -> Observation {
        match self.read(tag) {
            Some(size) => Observation::Measured(size),
            None => Observation::Unmeasured,
        }
    }

    pub fn snapshot(&self) -> SizeSnapshot {
        SizeSnapshot {
            avatar: self.read(SizeTag::Avatar),
            status: self.read(SizeTag::Status),
            timestamp: self.read(SizeTag::Timestamp),
        }
    }

    pub fn generation(&self) -> u64 {
        self.scope.state.borrow().generation
    }

    pub fn is_torn_down(&self) -> bool {
        self.scope.state.borrow().torn_down
    }

    /// Number of accepted changes in the current generation
    pub fn change_count(&self) -> u64 {
        self.scope.state.borrow().changes
    }

    pub fn rerender_requested(&self) -> bool {
        self.scope.state.borrow().rerender_requested
    }

    /// Consume the pending re-render request
    pub fn take_rerender(&self) -> bool {
        std::mem::take(&mut self.scope.state.borrow_mut().rerender_requested)
    }

    /// Called with every accepted change
    pub fn subscribe(&self, listener: impl FnMut(MeasuredSize) + 'static) {
        self.scope.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Start a fresh scope for a new message identity.
    ///
    /// Measurements are cleared and reporters from earlier generations go
    /// stale.
    pub fn reset(&self) {
        let mut state = self.scope.state.borrow_mut();
        state.generation += 1;
        state.torn_down = false;
        state.slots.clear();
        state.rerender_requested = false;
        state.changes = 0;
        tracing::trace!("Size scope reset to generation {}", state.generation);
    }

    /// End the scope. Later reports from any reporter are discarded.
    pub fn tear_down(&self) {
        let mut state = self.scope.state.borrow_mut();
        state.torn_down = true;
        state.slots.clear();
        state.rerender_requested = false;
        drop(state);
        self.scope.listeners.borrow_mut().clear();
    }
}

impl fmt::Debug for SizeObservationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeObservationBus")
            .field("generation", &self.generation())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const EPSILON: f32 = 0.5;

    #[test]
    fn test_unmeasured_until_reported() {
        let bus = SizeObservationBus::new(EPSILON);
        assert_eq!(bus.observation(SizeTag::Avatar), Observation::Unmeasured);
        assert!(bus.snapshot().is_provisional());

        bus.report(SizeTag::Avatar, Size::new(48.0, 32.0));
        assert_eq!(
            bus.observation(SizeTag::Avatar),
            Observation::Measured(Size::new(48.0, 32.0))
        );
    }

    #[test]
    fn test_same_size_twice_schedules_one_rerender() {
        let bus = SizeObservationBus::new(EPSILON);
        let size = Size::new(30.0, 14.0);

        assert_eq!(bus.report(SizeTag::Timestamp, size), ReportOutcome::Changed);
        assert_eq!(bus.report(SizeTag::Timestamp, size), ReportOutcome::Unchanged);
        assert!(bus.take_rerender());
        assert!(!bus.take_rerender());
        assert_eq!(bus.change_count(), 1);
    }

    #[test]
    fn test_sub_epsilon_change_is_ignored() {
        let bus = SizeObservationBus::new(EPSILON);
        bus.report(SizeTag::Status, Size::new(14.0, 14.0));
        bus.take_rerender();

        assert_eq!(
            bus.report(SizeTag::Status, Size::new(14.3, 14.0)),
            ReportOutcome::Unchanged
        );
        assert_eq!(bus.read(SizeTag::Status), Some(Size::new(14.0, 14.0)));
        assert!(!bus.rerender_requested());

        assert_eq!(
            bus.report(SizeTag::Status, Size::new(16.0, 14.0)),
            ReportOutcome::Changed
        );
        assert!(bus.rerender_requested());
    }

    #[test]
    fn test_reset_discards_stale_reporters() {
        let bus = SizeObservationBus::new(EPSILON);
        let stale = bus.reporter();
        stale.report(SizeTag::Avatar, Size::new(48.0, 32.0));

        bus.reset();
        assert_eq!(bus.read(SizeTag::Avatar), None);
        assert!(!stale.is_live());
        assert_eq!(
            stale.report(SizeTag::Avatar, Size::new(10.0, 10.0)),
            ReportOutcome::Discarded
        );
        assert_eq!(bus.read(SizeTag::Avatar), None);

        let fresh = bus.reporter();
        assert_eq!(
            fresh.report(SizeTag::Avatar, Size::new(10.0, 10.0)),
            ReportOutcome::Changed
        );
    }

    #[test]
    fn test_tear_down_discards_reports() {
        let bus = SizeObservationBus::new(EPSILON);
        let reporter = bus.reporter();
        bus.tear_down();
        assert_eq!(
            reporter.report(SizeTag::Timestamp, Size::new(30.0, 14.0)),
            ReportOutcome::Discarded
        );
        assert!(!bus.rerender_requested());
    }

    #[test]
    fn test_dropped_bus_discards_reports() {
        let bus = SizeObservationBus::new(EPSILON);
        let reporter = bus.reporter();
        drop(bus);
        assert_eq!(
            reporter.report(SizeTag::Timestamp, Size::new(30.0, 14.0)),
            ReportOutcome::Discarded
        );
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let bus = SizeObservationBus::new(EPSILON);
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.report(SizeTag::Avatar, Size::new(48.0, 32.0));
        bus.report(SizeTag::Avatar, Size::new(48.0, 32.0));
        bus.report(SizeTag::Avatar, Size::new(50.0, 32.0));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_snapshot_defaults_to_zero() {
        let snapshot = SizeSnapshot::default().with(SizeTag::Status, Size::new(14.0, 14.0));
        assert_eq!(snapshot.size_or_zero(SizeTag::Avatar), Size::ZERO);
        assert_eq!(snapshot.size_or_zero(SizeTag::Status).width, 14.0);
    }
}
