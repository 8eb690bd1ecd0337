//! Per-section projection targets.

use super::constants::MAX_LATITUDE;
use super::dataset::Crash;
use super::projection::GeoPoint;
use glam::DVec2;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("no projection targets configured")]
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Translation {
    /// Fraction of the viewport width/height.
    Relative(DVec2),
    /// CSS pixels.
    Absolute(DVec2),
}

impl Translation {
    pub fn resolve(self, viewport: DVec2) -> DVec2 {
        match self {
            Translation::Relative(fraction) => fraction * viewport,
            Translation::Absolute(px) => px,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionTarget {
    /// Point to bring to the centre of the globe.
    pub centre: GeoPoint,
    pub translation: Translation,
    pub scale: f64,
}

impl ProjectionTarget {
    #[inline]
    pub fn rotation(&self) -> DVec2 {
        self.centre.centring_rotation()
    }

    /// Fold a centre past a pole onto the same point with `|lat| <= 90`.
    ///
    /// Rotation transitions travel through unit vectors, which always come
    /// back upright; an unfolded centre would land rolled by 180°.
    fn folded(mut self) -> Self {
        if self.centre.lat.abs() > MAX_LATITUDE {
            let folded = GeoPoint::from_unit(self.centre.to_unit());
            log::debug!(
                "[orchestrator] centre ({:.2}, {:.2}) folded to ({:.2}, {:.2})",
                self.centre.lon,
                self.centre.lat,
                folded.lon,
                folded.lat
            );
            self.centre = folded;
        }
        self
    }
}

#[derive(Clone, Debug)]
pub struct TargetTable(Vec<ProjectionTarget>);

impl TargetTable {
    pub fn new(targets: Vec<ProjectionTarget>) -> Result<Self, TargetError> {
        if targets.is_empty() {
            return Err(TargetError::Empty);
        }
        Ok(Self(targets.into_iter().map(ProjectionTarget::folded).collect()))
    }

    /// One target per section: section `i` takes the defaults at `i` (the
    /// last default past the end) and, when crash `i` exists, its location
    /// as the centre.
    pub fn from_dataset(
        defaults: &[ProjectionTarget],
        crashes: &[Crash],
    ) -> Result<Self, TargetError> {
        let last = defaults.last().ok_or(TargetError::Empty)?;
        let count = defaults.len().max(crashes.len());
        let targets = (0..count)
            .map(|i| {
                let mut target = *defaults.get(i).unwrap_or(last);
                if let Some(crash) = crashes.get(i) {
                    target.centre = crash.location();
                }
                target
            })
            .collect();
        Self::new(targets)
    }

    /// Target for `index`; past the end this clamps to the last target.
    pub fn get(&self, index: usize) -> &ProjectionTarget {
        let last = self.0.len() - 1;
        if index > last {
            log::warn!(
                "[orchestrator] no target for section {}; using section {}",
                index,
                last
            );
        }
        &self.0[index.min(last)]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
