//! Scroll-position tracker.
//!
//! Maps the continuous page scroll offset onto a discrete active section plus
//! a progress fraction within it. The tracker reads layout through a
//! [`ScrollHost`] so the same logic runs against the DOM and against a fake
//! layout in tests.
//!
//! The cursor used to pick a section sits half a viewport below the top of
//! the window, relative to the container's document-space top:
//!
//! ```text
//! cursor = scroll_offset - container_start + viewport_height / 2
//! ```
//!
//! The active index is the first section whose bottom boundary is at or
//! beyond the cursor, clamped to the last section.

use super::constants::CURSOR_VIEWPORT_FRACTION;
use super::dispatch::{Dispatcher, ListenerId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("cannot track scrolling over zero sections")]
    NoSections,
}

/// Vertical extent of an element relative to the viewport top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

/// The element whose document-space top is the origin for the cursor.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Container<E> {
    #[default]
    DocumentRoot,
    Element(E),
}

/// Layout reads the tracker needs from its environment.
pub trait ScrollHost {
    type Element;

    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Viewport-relative bounds of a section.
    fn bounds(&self, element: &Self::Element) -> Bounds;
    /// Viewport-relative top of the container.
    fn container_top(&self, container: &Container<Self::Element>) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    Scroll,
    Resize,
}

/// Bottom boundary of each section, measured from the first section's top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionPositions(Vec<f64>);

impl SectionPositions {
    /// Build from viewport-relative section bounds.
    ///
    /// Boundaries must be non-decreasing for the binary search; a boundary
    /// that goes backwards is raised to its predecessor.
    pub fn from_bounds(bounds: &[Bounds]) -> Self {
        let Some(first) = bounds.first() else {
            return Self::default();
        };
        let start = first.top;
        let mut positions = Vec::with_capacity(bounds.len());
        let mut floor = f64::NEG_INFINITY;
        for (i, b) in bounds.iter().enumerate() {
            let mut pos = b.bottom - start;
            if pos < floor {
                log::warn!(
                    "[scroller] section {} ends above section {} ({:.1} < {:.1}); clamping",
                    i,
                    i - 1,
                    pos,
                    floor
                );
                pos = floor;
            }
            floor = pos;
            positions.push(pos);
        }
        Self(positions)
    }

    pub fn from_offsets(offsets: Vec<f64>) -> Self {
        let bounds: Vec<Bounds> = offsets
            .into_iter()
            .map(|bottom| Bounds { top: 0.0, bottom })
            .collect();
        Self::from_bounds(&bounds)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Find the active section for `cursor` and the progress through it.
///
/// Progress runs from the previous section's bottom (or the first section's
/// top, for index 0) to this section's bottom and is clamped to `[0, 1]`. A
/// section with no height reports `1.0`.
pub fn locate(positions: &SectionPositions, cursor: f64) -> Option<(usize, f64)> {
    let offsets = positions.as_slice();
    let last = offsets.len().checked_sub(1)?;
    let index = offsets.partition_point(|&b| b < cursor).min(last);
    let prev = if index == 0 { 0.0 } else { offsets[index - 1] };
    let span = offsets[index] - prev;
    let progress = if span > 0.0 {
        ((cursor - prev) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some((index, progress))
}

pub struct Scroller<H: ScrollHost> {
    host: H,
    container: Container<H::Element>,
    sections: Vec<H::Element>,
    positions: SectionPositions,
    container_start: f64,
    current: Option<usize>,
    settle_pending: bool,
    active: Dispatcher<usize>,
    progress: Dispatcher<(usize, f64)>,
}

impl<H: ScrollHost> Scroller<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            container: Container::DocumentRoot,
            sections: Vec::new(),
            positions: SectionPositions::default(),
            container_start: 0.0,
            current: None,
            settle_pending: false,
            active: Dispatcher::new(),
            progress: Dispatcher::new(),
        }
    }

    pub fn container(&self) -> &Container<H::Element> {
        &self.container
    }

    /// Takes effect on the next `resize`.
    pub fn set_container(&mut self, container: Container<H::Element>) -> &mut Self {
        self.container = container;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Bind to `sections`, measure them, and schedule one settle pass.
    ///
    /// The settle pass (see [`Scroller::settle`]) produces the initial state
    /// for a page that loads already scrolled, without waiting for a scroll.
    pub fn attach(&mut self, sections: Vec<H::Element>) -> Result<(), ScrollError> {
        if sections.is_empty() {
            return Err(ScrollError::NoSections);
        }
        self.sections = sections;
        self.current = None;
        self.resize();
        self.settle_pending = true;
        log::info!("[scroller] attached to {} sections", self.sections.len());
        Ok(())
    }

    /// Run the one-shot settle scheduled by `attach`. Returns whether it ran.
    pub fn settle(&mut self) -> bool {
        if !std::mem::take(&mut self.settle_pending) {
            return false;
        }
        self.tick();
        true
    }

    pub fn settle_pending(&self) -> bool {
        self.settle_pending
    }

    /// Re-measure every section and the container's document-space top.
    pub fn resize(&mut self) {
        let bounds: Vec<Bounds> = self.sections.iter().map(|s| self.host.bounds(s)).collect();
        self.positions = SectionPositions::from_bounds(&bounds);
        self.container_start =
            self.host.container_top(&self.container) + self.host.scroll_offset();
        log::debug!(
            "[scroller] resized: start={:.1} positions={:?}",
            self.container_start,
            self.positions.as_slice()
        );
    }

    pub fn handle(&mut self, event: ScrollEvent) {
        if event == ScrollEvent::Resize {
            self.resize();
        }
        self.tick();
    }

    pub fn cursor(&self) -> f64 {
        self.host.scroll_offset() - self.container_start
            + self.host.viewport_height() * CURSOR_VIEWPORT_FRACTION
    }

    /// Recompute the active index and progress, notifying subscribers.
    ///
    /// `active` fires only when the index changes and always before
    /// `progress`, which fires on every tick.
    pub fn tick(&mut self) {
        let cursor = self.cursor();
        let Some((index, progress)) = locate(&self.positions, cursor) else {
            return;
        };
        if self.current != Some(index) {
            log::info!("[scroller] active section {} (cursor {:.1})", index, cursor);
            self.current = Some(index);
            self.active.emit(index);
        }
        self.progress.emit((index, progress));
    }

    pub fn on_active(&mut self, listener: impl FnMut(usize) + 'static) -> ListenerId {
        self.active.subscribe(listener)
    }

    pub fn on_progress(&mut self, mut listener: impl FnMut(usize, f64) + 'static) -> ListenerId {
        self.progress
            .subscribe(move |(index, fraction)| listener(index, fraction))
    }

    /// Remove a listener registered with either `on_active` or `on_progress`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.active.unsubscribe(id) || self.progress.unsubscribe(id)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.current
    }

    pub fn section_positions(&self) -> &SectionPositions {
        &self.positions
    }

    pub fn container_start(&self) -> f64 {
        self.container_start
    }
}
