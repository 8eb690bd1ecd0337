//! View configuration: transition timing and the default per-section options.
//!
//! Everything here has a sensible default taken from `core::constants`; the
//! web host may override the timing from data attributes on the map element.

use super::constants::{
    DEFAULT_SECTION_CENTRES, DEFAULT_SECTION_POSITION, DEFAULT_SECTION_SCALES,
    TRANSITION_DURATION,
};
use super::projection::GeoPoint;
use super::targets::{ProjectionTarget, Translation};
use super::transition::Easing;
use glam::DVec2;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ViewConfig {
    pub transition_duration: Duration,
    pub easing: Easing,
    /// Options used for section `i`, before any dataset overrides its centre.
    pub section_defaults: Vec<ProjectionTarget>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let section_defaults = DEFAULT_SECTION_CENTRES
            .iter()
            .zip(DEFAULT_SECTION_SCALES)
            .map(|(centre, scale)| ProjectionTarget {
                centre: GeoPoint::new(centre[0], centre[1]),
                translation: Translation::Relative(DVec2::from(DEFAULT_SECTION_POSITION)),
                scale,
            })
            .collect();
        Self {
            transition_duration: TRANSITION_DURATION,
            easing: Easing::default(),
            section_defaults,
        }
    }
}

impl ViewConfig {
    pub fn with_transition_millis(mut self, millis: u64) -> Self {
        self.transition_duration = Duration::from_millis(millis);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
