//! Time-based interpolation of the three projection parameters.
//!
//! The engine never owns the projection: each transition reports its
//! interpolated value through an `on_frame` callback, once per `step`, until
//! it completes on exactly its target. A transition whose lock token has been
//! superseded is dropped before it can apply another frame.

use super::lock::{AnimationLocks, LockKey, LockToken};
use super::projection::{great_circle, GeoPoint, ProjectionState};
use glam::DVec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    CubicInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "linear" => Some(Easing::Linear),
            "cubic" | "cubic-in-out" => Some(Easing::CubicInOut),
            _ => None,
        }
    }
}

/// A value of one animated parameter; the variant names its lock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// `(λ, φ)` rotation in degrees.
    Rotation(DVec2),
    Translation(DVec2),
    Scale(f64),
}

impl ParamValue {
    pub fn key(&self) -> LockKey {
        match self {
            ParamValue::Rotation(_) => LockKey::Rotation,
            ParamValue::Translation(_) => LockKey::Translation,
            ParamValue::Scale(_) => LockKey::Scale,
        }
    }

    pub fn read(state: &ProjectionState, key: LockKey) -> Self {
        match key {
            LockKey::Rotation => ParamValue::Rotation(state.rotation),
            LockKey::Translation => ParamValue::Translation(state.translation),
            LockKey::Scale => ParamValue::Scale(state.scale),
        }
    }

    /// Write this value into the matching field and leave the others alone.
    pub fn apply_to(self, state: &mut ProjectionState) {
        match self {
            ParamValue::Rotation(r) => state.rotation = r,
            ParamValue::Translation(t) => state.translation = t,
            ParamValue::Scale(s) => state.scale = s,
        }
    }
}

type Interpolator = Box<dyn Fn(f64) -> ParamValue>;

fn interpolator(from: ParamValue, to: ParamValue) -> Interpolator {
    match (from, to) {
        (ParamValue::Rotation(a), ParamValue::Rotation(b)) => {
            // Move the view centre along a great circle instead of lerping angles.
            let path = great_circle(GeoPoint::centred_by(a), GeoPoint::centred_by(b));
            Box::new(move |t| ParamValue::Rotation(path(t).centring_rotation()))
        }
        (ParamValue::Translation(a), ParamValue::Translation(b)) => {
            Box::new(move |t| ParamValue::Translation(a + (b - a) * t))
        }
        (ParamValue::Scale(a), ParamValue::Scale(b)) => {
            Box::new(move |t| ParamValue::Scale(a + (b - a) * t))
        }
        _ => {
            log::error!(
                "[transition] mismatched parameters {:?} -> {:?}; jumping to target",
                from,
                to
            );
            Box::new(move |_| to)
        }
    }
}

struct Running {
    token: LockToken,
    target: ParamValue,
    interpolate: Interpolator,
    duration: Duration,
    easing: Easing,
    started_at: Option<Duration>,
    on_frame: Box<dyn FnMut(ParamValue)>,
}

impl Running {
    /// Apply the frame for `now`; returns `true` once the target was applied.
    fn frame(&mut self, now: Duration) -> bool {
        let started = *self.started_at.get_or_insert(now);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_sub(started).as_secs_f64() / self.duration.as_secs_f64()
        };
        if t >= 1.0 {
            (self.on_frame)(self.target);
            true
        } else {
            (self.on_frame)((self.interpolate)(self.easing.apply(t)));
            false
        }
    }
}

#[derive(Default)]
pub struct TransitionEngine {
    locks: AnimationLocks,
    running: Vec<Running>,
    easing: Easing,
}

impl TransitionEngine {
    pub fn new(easing: Easing) -> Self {
        Self {
            locks: AnimationLocks::new(),
            running: Vec::new(),
            easing,
        }
    }

    /// Start animating `target`'s parameter from `current`.
    ///
    /// Whatever transition previously held the same parameter stops applying
    /// frames immediately; transitions on other parameters are untouched.
    /// The clock starts at the first `step` after this call.
    pub fn animate(
        &mut self,
        current: ParamValue,
        target: ParamValue,
        duration: Duration,
        on_frame: impl FnMut(ParamValue) + 'static,
    ) {
        debug_assert_eq!(current.key(), target.key());
        let token = self.locks.acquire(target.key());
        log::debug!(
            "[transition] {} -> {:?} over {} ms",
            token.key.label(),
            target,
            duration.as_millis()
        );
        self.running.push(Running {
            token,
            target,
            interpolate: interpolator(current, target),
            duration,
            easing: self.easing,
            started_at: None,
            on_frame: Box::new(on_frame),
        });
    }

    /// Advance every live transition to `now` (a monotonic clock offset).
    /// Returns how many frames were applied.
    pub fn step(&mut self, now: Duration) -> usize {
        let locks = &self.locks;
        self.running.retain(|r| {
            let live = locks.is_current(r.token);
            if !live {
                log::debug!("[transition] {} superseded", r.token.key.label());
            }
            live
        });
        let mut applied = 0;
        self.running.retain_mut(|r| {
            applied += 1;
            !r.frame(now)
        });
        applied
    }

    pub fn is_running(&self, key: LockKey) -> bool {
        self.running
            .iter()
            .any(|r| r.token.key == key && self.locks.is_current(r.token))
    }

    pub fn is_idle(&self) -> bool {
        LockKey::ALL.iter().all(|k| !self.is_running(*k))
    }
}
