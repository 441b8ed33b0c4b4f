//! Section registry and active-section tracking for the single-page layout.
//!
//! The tracker is fed scroll samples by the host page and decides which
//! registered section sits under the reference line. Programmatic navigation
//! hands back a [`NavigationRequest`]; the host performs the smooth scroll and
//! owns the suppression timer, reporting expiry through
//! [`ScrollTracker::end_suppression`].

use indexmap::IndexMap;
use std::{borrow::Cow, fmt, time::Duration};

pub const REFERENCE_LINE_FRACTION: f64 = 1.0 / 3.0;
pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(1_000);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(Cow<'static, str>);

impl SectionId {
    /// Reported when no registered section contains the reference line.
    pub const HEADER: Self = Self::from_static("header");

    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::HEADER
    }
}

impl From<&'static str> for SectionId {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical extent of a section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub bottom: f64,
}

impl Extent {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn contains(&self, line: f64) -> bool {
        self.top <= line && line <= self.bottom
    }
}

/// Geometry query for a registered section handle.
///
/// Returning `None` means the handle cannot be measured right now (for
/// example it was detached from the document); such a section never
/// qualifies as active.
pub trait SectionGeometry {
    fn extent(&self) -> Option<Extent>;
}

impl SectionGeometry for Extent {
    fn extent(&self) -> Option<Extent> {
        Some(*self)
    }
}

impl<T: SectionGeometry> SectionGeometry for Option<T> {
    fn extent(&self) -> Option<Extent> {
        self.as_ref().and_then(SectionGeometry::extent)
    }
}

/// Insertion-ordered mapping from section id to handle. Re-registering an id
/// replaces its handle in place and keeps its original position.
#[derive(Debug)]
pub struct SectionRegistry<H> {
    sections: IndexMap<SectionId, H>,
}

impl<H> Default for SectionRegistry<H> {
    fn default() -> Self {
        Self {
            sections: IndexMap::new(),
        }
    }
}

impl<H> SectionRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: SectionId, handle: H) {
        self.sections.insert(id, handle);
    }

    pub fn unregister(&mut self, id: &SectionId) {
        self.sections.shift_remove(id);
    }

    pub fn get(&self, id: &SectionId) -> Option<&H> {
        self.sections.get(id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.sections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, &H)> {
        self.sections.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollSample {
    pub fn max_scroll(&self) -> f64 {
        let max = self.document_height - self.viewport_height;
        if max.is_finite() {
            max.max(0.0)
        } else {
            0.0
        }
    }

    /// Offset normalized to `[0, 1]`; zero when the document does not scroll.
    pub fn progress(&self) -> f64 {
        let max_scroll = self.max_scroll();
        if max_scroll <= 0.0 {
            return 0.0;
        }

        let progress = self.offset / max_scroll;
        if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        }
    }

    pub fn reference_line(&self, fraction: f64) -> f64 {
        self.offset + self.viewport_height * fraction
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub progress: f64,
    pub active_section: SectionId,
    pub programmatic_scroll_in_flight: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            progress: 0.0,
            active_section: SectionId::HEADER,
            programmatic_scroll_in_flight: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    pub reference_line_fraction: f64,
    /// Must outlast the host's smooth-scroll animation; it is not derived
    /// from the animation itself.
    pub suppression_window: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            reference_line_fraction: REFERENCE_LINE_FRACTION,
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuppressionTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationRequest<H> {
    pub section: SectionId,
    pub handle: H,
    pub ticket: SuppressionTicket,
    pub suppression_window: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub progress_changed: bool,
    pub active_changed: bool,
}

impl ScrollUpdate {
    pub fn is_empty(&self) -> bool {
        !self.progress_changed && !self.active_changed
    }
}

#[derive(Debug)]
pub struct ScrollTracker<H> {
    config: TrackerConfig,
    registry: SectionRegistry<H>,
    state: ScrollState,
    generation: u64,
}

impl<H> Default for ScrollTracker<H> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl<H> ScrollTracker<H> {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            registry: SectionRegistry::new(),
            state: ScrollState::default(),
            generation: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn registry(&self) -> &SectionRegistry<H> {
        &self.registry
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn active_section(&self) -> &SectionId {
        &self.state.active_section
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn is_programmatic_scroll_in_flight(&self) -> bool {
        self.state.programmatic_scroll_in_flight
    }

    /// Takes effect on the next scroll evaluation.
    pub fn register(&mut self, id: SectionId, handle: H) {
        self.registry.register(id, handle);
    }

    /// Leaves the active section untouched until the next evaluation.
    pub fn unregister(&mut self, id: &SectionId) {
        self.registry.unregister(id);
    }

    /// Invalidates any outstanding ticket and reports which section a
    /// programmatic scroll is heading to. Unknown ids are ignored.
    pub fn scroll_to_section(&mut self, id: &SectionId) -> Option<NavigationRequest<H>>
    where
        H: Clone,
    {
        let handle = self.registry.get(id)?.clone();

        self.generation = self.generation.wrapping_add(1);
        self.state.programmatic_scroll_in_flight = true;
        self.state.active_section = id.clone();

        Some(NavigationRequest {
            section: id.clone(),
            handle,
            ticket: SuppressionTicket(self.generation),
            suppression_window: self.config.suppression_window,
        })
    }

    /// Returns `false` for tickets superseded by a later navigation.
    pub fn end_suppression(&mut self, ticket: SuppressionTicket) -> bool {
        if ticket.0 != self.generation || !self.state.programmatic_scroll_in_flight {
            return false;
        }

        self.state.programmatic_scroll_in_flight = false;
        true
    }
}

impl<H: SectionGeometry> ScrollTracker<H> {
    pub fn derive_active(&self, sample: &ScrollSample) -> SectionId {
        let line = sample.reference_line(self.config.reference_line_fraction);

        self.registry
            .iter()
            .find(|(_, handle)| handle.extent().is_some_and(|extent| extent.contains(line)))
            .map(|(id, _)| id.clone())
            .unwrap_or(SectionId::HEADER)
    }

    /// Handles scroll and resize notifications alike. Active-section
    /// derivation is skipped while a programmatic scroll is in flight.
    pub fn on_scroll(&mut self, sample: ScrollSample) -> ScrollUpdate {
        let mut update = ScrollUpdate::default();
        let progress = sample.progress();

        self.state.offset = sample.offset;
        if progress != self.state.progress {
            self.state.progress = progress;
            update.progress_changed = true;
        }

        if self.state.programmatic_scroll_in_flight {
            return update;
        }

        let active = self.derive_active(&sample);
        if active != self.state.active_section {
            self.state.active_section = active;
            update.active_changed = true;
        }

        update
    }
}
