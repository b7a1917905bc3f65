use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::r2::R2;

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct BBox {
    pub min: R2<f64>,
    pub max: R2<f64>,
}

impl BBox {
    /// Box of the given size centred on `c`.
    pub fn centered(c: R2<f64>, width: f64, height: f64) -> Self {
        let half = R2::new(width / 2., height / 2.);
        BBox { min: c - half, max: c + half }
    }

    /// Smallest box containing every point; `None` for an empty slice.
    pub fn of(points: &[R2<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BBox { min: *first, max: *first };
        for p in rest {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> R2<f64> {
        self.min.midpoint(&self.max)
    }

    pub fn union(&self, o: &BBox) -> BBox {
        BBox {
            min: R2::new(self.min.x.min(o.min.x), self.min.y.min(o.min.y)),
            max: R2::new(self.max.x.max(o.max.x), self.max.y.max(o.max.y)),
        }
    }

    /// Closed containment, with `eps` slack on every side.
    pub fn contains(&self, p: &R2<f64>, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    pub fn contains_box(&self, o: &BBox, eps: f64) -> bool {
        self.contains(&o.min, eps) && self.contains(&o.max, eps)
    }

    /// Distance between the closest points of two boxes: 0 when they intersect or touch,
    /// the axis gap when they are separated along one axis only, else the Euclidean gap
    /// between the nearest corners.
    pub fn gap(&self, o: &BBox) -> f64 {
        let dx = (o.min.x - self.max.x).max(self.min.x - o.max.x).max(0.);
        let dy = (o.min.y - self.max.y).max(self.min.y - o.max.y).max(0.);
        (dx * dx + dy * dy).sqrt()
    }
}
