//! Just enough TopoJSON to draw land outlines and internal borders.

use super::dataset::DatasetError;
use super::projection::GeoPoint;
use fnv::FnvHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

pub type Line = Vec<GeoPoint>;

#[derive(Clone, Copy, Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    GeometryCollection { geometries: Vec<Geometry> },
    Polygon { arcs: Vec<Vec<i64>> },
    MultiPolygon { arcs: Vec<Vec<Vec<i64>>> },
    LineString { arcs: Vec<i64> },
    MultiLineString { arcs: Vec<Vec<i64>> },
    #[serde(other)]
    Other,
}

impl Geometry {
    fn rings(&self) -> Vec<&[i64]> {
        match self {
            Geometry::Polygon { arcs } => arcs.iter().map(Vec::as_slice).collect(),
            Geometry::MultiPolygon { arcs } => arcs
                .iter()
                .flat_map(|polygon| polygon.iter().map(Vec::as_slice))
                .collect(),
            Geometry::LineString { arcs } => vec![arcs.as_slice()],
            Geometry::MultiLineString { arcs } => arcs.iter().map(Vec::as_slice).collect(),
            Geometry::GeometryCollection { .. } | Geometry::Other => Vec::new(),
        }
    }

    /// Leaf geometries, flattening nested collections.
    fn leaves<'a>(&'a self, out: &mut Vec<&'a Geometry>) {
        match self {
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    g.leaves(out);
                }
            }
            other => out.push(other),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: FnvHashMap<String, Geometry>,
    arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Clone, Debug)]
pub struct Topology {
    objects: FnvHashMap<String, Geometry>,
    arcs: Vec<Line>,
}

impl Topology {
    pub fn parse(json: &str) -> Result<Self, DatasetError> {
        let raw: RawTopology = serde_json::from_str(json)?;
        let arcs = raw
            .arcs
            .iter()
            .map(|arc| decode_arc(arc, raw.transform))
            .collect();
        Ok(Self {
            objects: raw.objects,
            arcs,
        })
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    fn object(&self, name: &str) -> Result<&Geometry, DatasetError> {
        self.objects
            .get(name)
            .ok_or_else(|| DatasetError::MissingObject(name.to_string()))
    }

    /// Stitch a sequence of arc references into one line.
    fn stitch(&self, refs: &[i64]) -> Result<Line, DatasetError> {
        let mut line: Line = Vec::new();
        for &r in refs {
            // negative references walk arc `!r` backwards
            let (index, reversed) = if r < 0 { (!r, true) } else { (r, false) };
            let arc = usize::try_from(index)
                .ok()
                .and_then(|i| self.arcs.get(i))
                .ok_or(DatasetError::ArcOutOfRange {
                    index: r,
                    count: self.arcs.len(),
                })?;
            let skip = usize::from(!line.is_empty());
            if reversed {
                line.extend(arc.iter().rev().skip(skip));
            } else {
                line.extend(arc.iter().skip(skip));
            }
        }
        Ok(line)
    }

    /// Every polygon ring (or line) of the named object.
    pub fn feature_lines(&self, name: &str) -> Result<Vec<Line>, DatasetError> {
        let mut leaves = Vec::new();
        self.object(name)?.leaves(&mut leaves);
        let mut lines = Vec::new();
        for g in leaves {
            for ring in g.rings() {
                lines.push(self.stitch(ring)?);
            }
        }
        Ok(lines)
    }

    /// Arcs shared by two different geometries of the named object, e.g. the
    /// borders between countries without the coastlines.
    pub fn interior_mesh(&self, name: &str) -> Result<Vec<Line>, DatasetError> {
        let mut leaves = Vec::new();
        self.object(name)?.leaves(&mut leaves);
        let mut owners: FnvHashMap<usize, SmallVec<[usize; 2]>> = FnvHashMap::default();
        for (gid, g) in leaves.iter().enumerate() {
            for ring in g.rings() {
                for &r in ring {
                    let index = if r < 0 { !r } else { r };
                    let Ok(index) = usize::try_from(index) else {
                        continue;
                    };
                    let ids = owners.entry(index).or_default();
                    if !ids.contains(&gid) {
                        ids.push(gid);
                    }
                }
            }
        }
        let mut shared: Vec<usize> = owners
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(index, _)| index)
            .collect();
        shared.sort_unstable();
        shared
            .into_iter()
            .map(|index| {
                self.arcs
                    .get(index)
                    .cloned()
                    .ok_or(DatasetError::ArcOutOfRange {
                        index: index as i64,
                        count: self.arcs.len(),
                    })
            })
            .collect()
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<Transform>) -> Line {
    let Some(t) = transform else {
        return arc
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| GeoPoint::new(p[0], p[1]))
            .collect();
    };
    // quantized arcs are delta-encoded
    let (mut x, mut y) = (0.0, 0.0);
    arc.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| {
            x += p[0];
            y += p[1];
            GeoPoint::new(
                x * t.scale[0] + t.translate[0],
                y * t.scale[1] + t.translate[1],
            )
        })
        .collect()
}
