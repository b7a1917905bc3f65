use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

use super::Polygon;

/// Relative tolerance under which an edge counts as axis-aligned.
pub const AXIS_EPSILON: f64 = 1e-9;

/// Orientation and direction of travel of an axis-aligned edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum Orientation {
    Right,
    Left,
    Up,
    Down,
}

impl Orientation {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Right | Orientation::Left)
    }

    pub fn opposite(&self) -> Orientation {
        match self {
            Orientation::Right => Orientation::Left,
            Orientation::Left => Orientation::Right,
            Orientation::Up => Orientation::Down,
            Orientation::Down => Orientation::Up,
        }
    }
}

impl Polygon {
    /// Endpoints of edge `i`.
    pub fn edge(&self, i: usize) -> (R2<f64>, R2<f64>) {
        let n = self.vertices.len();
        (self.vertices[i % n], self.vertices[(i + 1) % n])
    }

    pub fn edge_length(&self, i: usize) -> f64 {
        let (a, b) = self.edge(i);
        a.distance(&b)
    }

    pub fn edge_lengths(&self) -> Vec<f64> {
        (0..self.n()).map(|i| self.edge_length(i)).collect()
    }

    pub fn edge_midpoint(&self, i: usize) -> R2<f64> {
        let (a, b) = self.edge(i);
        a.midpoint(&b)
    }

    pub fn perimeter(&self) -> f64 {
        self.edge_lengths().iter().sum()
    }

    /// Shortest edge; zero means the outline is degenerate.
    pub fn min_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(f64::INFINITY, f64::min)
    }

    /// Unit normal of edge `i` pointing away from the interior.
    ///
    /// Probes a short step either side of the midpoint; when the probe is inconclusive (both
    /// or neither side inside, e.g. at a sliver), falls back to the side facing away from the
    /// centroid.
    pub fn outward_normal(&self, i: usize) -> R2<f64> {
        let (a, b) = self.edge(i);
        let len = a.distance(&b);
        let normal = (b - a).perp().normalize();
        let mid = a.midpoint(&b);
        let probe = len.max(1e-9) * 1e-3;
        let left_inside = self.contains(&(mid + normal * probe));
        let right_inside = self.contains(&(mid - normal * probe));
        match (left_inside, right_inside) {
            (true, false) => -normal,
            (false, true) => normal,
            _ => {
                if (mid - self.centroid()).dot(&normal) >= 0. {
                    normal
                } else {
                    -normal
                }
            }
        }
    }

    /// Direction of travel along edge `i`, if it is axis-aligned.
    pub fn orientation(&self, i: usize) -> Option<Orientation> {
        let (a, b) = self.edge(i);
        let d = b - a;
        let len = d.norm();
        if len == 0. {
            return None;
        }
        if d.y.abs() <= AXIS_EPSILON * len {
            Some(if d.x > 0. { Orientation::Right } else { Orientation::Left })
        } else if d.x.abs() <= AXIS_EPSILON * len {
            Some(if d.y > 0. { Orientation::Up } else { Orientation::Down })
        } else {
            None
        }
    }

    /// Orientation of every edge, or `None` unless all edges are axis-aligned.
    pub fn orientations(&self) -> Option<Vec<Orientation>> {
        (0..self.n()).map(|i| self.orientation(i)).collect()
    }

    pub fn is_rectilinear(&self) -> bool {
        self.orientations().is_some()
    }
}
