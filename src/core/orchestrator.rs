//! Binds scroller notifications to projection transitions.
//!
//! On every active-section change the three parameters are animated toward
//! that section's target, each under its own lock, and the section emphasis
//! is updated on the same turn. Viewport resizes snap the translation instead
//! of animating it: the current section's relative position is re-resolved
//! and assigned directly, and any in-flight translation is superseded so it
//! cannot drag the globe back toward the old viewport's centre.

use super::config::ViewConfig;
use super::lock::LockKey;
use super::projection::ProjectionState;
use super::targets::TargetTable;
use super::transition::{ParamValue, TransitionEngine};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Visual highlighting of the narrative sections.
pub trait SectionEmphasis {
    fn emphasize(&mut self, active: usize);
}

pub struct Orchestrator {
    targets: TargetTable,
    projection: Rc<RefCell<ProjectionState>>,
    engine: TransitionEngine,
    duration: Duration,
    viewport: DVec2,
    current: Option<usize>,
    last_progress: Option<(usize, f64)>,
    emphasis: Option<Box<dyn SectionEmphasis>>,
    progress_hook: Option<Box<dyn FnMut(usize, f64)>>,
    needs_redraw: bool,
}

impl Orchestrator {
    /// The projection starts out on the first section's target so the
    /// initial paint is meaningful before any section becomes active.
    pub fn new(
        config: &ViewConfig,
        targets: TargetTable,
        projection: Rc<RefCell<ProjectionState>>,
        viewport: DVec2,
    ) -> Self {
        {
            let first = targets.get(0);
            let mut state = projection.borrow_mut();
            state.rotation = first.rotation();
            state.translation = first.translation.resolve(viewport);
            state.scale = first.scale;
        }
        Self {
            targets,
            projection,
            engine: TransitionEngine::new(config.easing),
            duration: config.transition_duration,
            viewport,
            current: None,
            last_progress: None,
            emphasis: None,
            progress_hook: None,
            needs_redraw: true,
        }
    }

    pub fn set_emphasis(&mut self, emphasis: impl SectionEmphasis + 'static) {
        self.emphasis = Some(Box::new(emphasis));
    }

    pub fn set_progress_hook(&mut self, hook: impl FnMut(usize, f64) + 'static) {
        self.progress_hook = Some(Box::new(hook));
    }

    fn animate_to(&mut self, target: ParamValue, duration: Duration) {
        let current = ParamValue::read(&self.projection.borrow(), target.key());
        let projection = self.projection.clone();
        self.engine.animate(current, target, duration, move |value| {
            value.apply_to(&mut projection.borrow_mut());
        });
    }

    pub fn on_active(&mut self, index: usize) {
        let target = *self.targets.get(index);
        self.current = Some(index);
        log::info!(
            "[orchestrator] section {} -> centre ({:.2}, {:.2}) scale {:.0}",
            index,
            target.centre.lon,
            target.centre.lat,
            target.scale
        );
        let duration = self.duration;
        self.animate_to(
            ParamValue::Translation(target.translation.resolve(self.viewport)),
            duration,
        );
        self.animate_to(ParamValue::Rotation(target.rotation()), duration);
        self.animate_to(ParamValue::Scale(target.scale), duration);
        if let Some(emphasis) = self.emphasis.as_mut() {
            emphasis.emphasize(index);
        }
    }

    /// Extension point: recorded and forwarded, no projection change.
    pub fn on_progress(&mut self, index: usize, fraction: f64) {
        self.last_progress = Some((index, fraction));
        if let Some(hook) = self.progress_hook.as_mut() {
            hook(index, fraction);
        }
    }

    pub fn on_resize(&mut self, viewport: DVec2) {
        self.viewport = viewport;
        let index = self.current.unwrap_or(0);
        let translation = self.targets.get(index).translation.resolve(viewport);
        self.projection.borrow_mut().translation = translation;
        // A zero-length transition takes the translation lock, which stops any
        // running translation without starting a visible animation.
        self.animate_to(ParamValue::Translation(translation), Duration::ZERO);
        self.needs_redraw = true;
        log::info!(
            "[resize] viewport {:.0}x{:.0}, translation snapped to ({:.1}, {:.1})",
            viewport.x,
            viewport.y,
            translation.x,
            translation.y
        );
    }

    /// Advance transitions to `now`; returns whether the globe needs a redraw.
    pub fn frame(&mut self, now: Duration) -> bool {
        let applied = self.engine.step(now) > 0;
        applied | std::mem::take(&mut self.needs_redraw)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn last_progress(&self) -> Option<(usize, f64)> {
        self.last_progress
    }

    pub fn projection(&self) -> ProjectionState {
        *self.projection.borrow()
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn targets(&self) -> &TargetTable {
        &self.targets
    }

    pub fn is_animating(&self, key: LockKey) -> bool {
        self.engine.is_running(key)
    }

    pub fn is_idle(&self) -> bool {
        self.engine.is_idle()
    }
}
