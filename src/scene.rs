//! Static globe geometry, built once after the data has loaded.

use crate::constants::{
    COUNTRIES_OBJECT, GRATICULE_MAX_LAT, GRATICULE_STEP_DEG, LAND_OBJECT, LINE_SAMPLE_DEG,
};
use crate::core::projection::angular_distance;
use crate::core::topology::Line;
use crate::core::{great_circle, Crash, DatasetError, GeoPoint, Topology};

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub graticule: Vec<Line>,
    pub land: Vec<Line>,
    pub borders: Vec<Line>,
    pub routes: Vec<Line>,
    pub points: Vec<GeoPoint>,
}

impl Scene {
    pub fn build(world: &Topology, crashes: &[Crash]) -> Result<Self, DatasetError> {
        let routes = crashes
            .iter()
            .flat_map(|c| c.flights.iter())
            .map(|f| route_line(f.departure.point(), f.destination.point(), LINE_SAMPLE_DEG))
            .collect();
        Ok(Self {
            graticule: graticule(GRATICULE_STEP_DEG, GRATICULE_MAX_LAT, LINE_SAMPLE_DEG),
            land: world.feature_lines(LAND_OBJECT)?,
            borders: world.interior_mesh(COUNTRIES_OBJECT)?,
            routes,
            points: crashes.iter().map(Crash::location).collect(),
        })
    }
}

/// Meridians every `step` degrees between ±`max_lat`, and parallels every
/// `step` degrees up to ±`max_lat`, sampled every `sample` degrees.
pub fn graticule(step: f64, max_lat: f64, sample: f64) -> Vec<Line> {
    let along = |from: f64, to: f64| {
        let n = ((to - from) / sample).ceil().max(1.0) as usize;
        (0..=n).map(move |i| from + (to - from) * i as f64 / n as f64)
    };
    let mut lines = Vec::new();
    let mut lon = -180.0;
    while lon < 180.0 {
        lines.push(
            along(-max_lat, max_lat)
                .map(|lat| GeoPoint::new(lon, lat))
                .collect(),
        );
        lon += step;
    }
    let mut lat = -max_lat;
    while lat <= max_lat {
        lines.push(
            along(-180.0, 180.0)
                .map(|lon| GeoPoint::new(lon, lat))
                .collect(),
        );
        lat += step;
    }
    lines
}

/// Great-circle route sampled at most every `sample` degrees, endpoints included.
pub fn route_line(from: GeoPoint, to: GeoPoint, sample: f64) -> Line {
    let n = (angular_distance(from, to) / sample).ceil().max(1.0) as usize;
    let path = great_circle(from, to);
    (0..=n).map(|i| path(i as f64 / n as f64)).collect()
}
