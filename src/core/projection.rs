//! Orthographic globe projection state and spherical helpers.
//!
//! Conventions follow the usual web-mapping ones: rotation is `(λ, φ)` in
//! degrees, where `λ` spins the globe about the polar axis and `φ` tilts it
//! afterwards. Centering the view on a point means rotating by its negated
//! coordinates. Screen y grows downwards.

use super::constants::GREAT_CIRCLE_EPSILON;
use glam::{DVec2, DVec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Rotation that brings this point to the centre of the globe.
    #[inline]
    pub fn centring_rotation(self) -> DVec2 {
        DVec2::new(-self.lon, -self.lat)
    }

    /// Inverse of [`GeoPoint::centring_rotation`].
    #[inline]
    pub fn centred_by(rotation: DVec2) -> Self {
        Self::new(-rotation.x, -rotation.y)
    }

    pub fn to_unit(self) -> DVec3 {
        let (lon, lat) = (self.lon.to_radians(), self.lat.to_radians());
        DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    pub fn from_unit(v: DVec3) -> Self {
        let v = v.normalize_or_zero();
        Self::new(
            v.y.atan2(v.x).to_degrees(),
            v.z.clamp(-1.0, 1.0).asin().to_degrees(),
        )
    }
}

/// Interpolate along the great circle from `a` to `b`.
///
/// The returned closure maps `t` in `[0, 1]` to a point; `t = 0` and `t = 1`
/// return the endpoints exactly. Coincident or antipodal endpoints have no
/// unique great circle, so those fall back to a component-wise lerp.
pub fn great_circle(a: GeoPoint, b: GeoPoint) -> impl Fn(f64) -> GeoPoint {
    let (va, vb) = (a.to_unit(), b.to_unit());
    let omega = va.dot(vb).clamp(-1.0, 1.0).acos();
    let sin_omega = omega.sin();
    move |t: f64| {
        if t <= 0.0 {
            return a;
        }
        if t >= 1.0 {
            return b;
        }
        if sin_omega.abs() < GREAT_CIRCLE_EPSILON {
            return GeoPoint::new(a.lon + (b.lon - a.lon) * t, a.lat + (b.lat - a.lat) * t);
        }
        let wa = ((1.0 - t) * omega).sin() / sin_omega;
        let wb = (t * omega).sin() / sin_omega;
        GeoPoint::from_unit(va * wa + vb * wb)
    }
}

/// Great-circle distance in degrees.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    a.to_unit().dot(b.to_unit()).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Current values of the three animated projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionState {
    /// `(λ, φ)` in degrees.
    pub rotation: DVec2,
    /// Screen position of the globe centre, in CSS pixels.
    pub translation: DVec2,
    /// Globe radius in CSS pixels.
    pub scale: f64,
}

impl Default for ProjectionState {
    fn default() -> Self {
        Self {
            rotation: DVec2::ZERO,
            translation: DVec2::new(480.0, 250.0),
            scale: 150.0,
        }
    }
}

impl ProjectionState {
    /// Rotate a point into view space. Returns `(λ', φ')` in radians.
    fn rotate(&self, p: GeoPoint) -> (f64, f64) {
        let lambda = (p.lon + self.rotation.x).to_radians();
        let phi = p.lat.to_radians();
        let (sin_dphi, cos_dphi) = self.rotation.y.to_radians().sin_cos();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dphi + x * sin_dphi;
        (y.atan2(x * cos_dphi - z * sin_dphi), k.clamp(-1.0, 1.0).asin())
    }

    /// Project onto the screen; `None` when the point is behind the horizon.
    pub fn project(&self, p: GeoPoint) -> Option<DVec2> {
        let (lambda, phi) = self.rotate(p);
        if phi.cos() * lambda.cos() < 0.0 {
            return None;
        }
        let raw = DVec2::new(phi.cos() * lambda.sin(), phi.sin());
        Some(self.translation + DVec2::new(raw.x, -raw.y) * self.scale)
    }

    /// The geographic point currently shown at the centre of the globe.
    pub fn centre(&self) -> GeoPoint {
        GeoPoint::centred_by(self.rotation)
    }
}
