mod edges;
mod intersection;

pub use edges::*;
pub use intersection::*;

use std::fmt::Display;

use derive_more::From;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use super::{bbox::BBox, r2::R2};

/// Closed outline; edge `i` joins vertex `i` to vertex `(i + 1) % n`.
#[derive(Debug, Clone, From, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Polygon {
    pub vertices: Vec<R2<f64>>,
}

impl Polygon {
    pub fn new(vertices: Vec<R2<f64>>) -> Self {
        assert!(vertices.len() >= 3, "Polygon must have at least 3 vertices");
        Polygon { vertices }
    }

    pub fn n(&self) -> usize {
        self.vertices.len()
    }

    pub fn bbox(&self) -> BBox {
        BBox::of(&self.vertices).expect("Polygon has at least 3 vertices")
    }

    /// Apply `f` to every vertex.
    pub fn map(&self, f: impl Fn(&R2<f64>) -> R2<f64>) -> Polygon {
        Polygon { vertices: self.vertices.iter().map(f).collect() }
    }

    /// Check if a point is inside the polygon using ray casting algorithm.
    /// Casts a horizontal ray to the right and counts edge crossings.
    pub fn contains(&self, p: &R2<f64>) -> bool {
        let n = self.vertices.len();
        let mut crossings = 0;

        for i in 0..n {
            let v0 = &self.vertices[i];
            let v1 = &self.vertices[(i + 1) % n];

            // Skip if edge is entirely above or below the ray
            let (y_min, y_max) = if v0.y < v1.y { (v0.y, v1.y) } else { (v1.y, v0.y) };
            if p.y < y_min || p.y >= y_max {
                continue;
            }

            // Find x-coordinate where edge crosses y=p.y
            let t = (p.y - v0.y) / (v1.y - v0.y);
            let x_crossing = v0.x + t * (v1.x - v0.x);

            if x_crossing > p.x {
                crossings += 1;
            }
        }

        crossings % 2 == 1
    }

    /// Signed shoelace sum; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.vertices[i].cross(&self.vertices[j]);
        }
        sum / 2.
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Mean of the vertices.
    pub fn center(&self) -> R2<f64> {
        let n = self.vertices.len() as f64;
        let sum = self.vertices.iter().fold(R2::zero(), |acc, v| acc + *v);
        sum / n
    }

    /// Area centroid. Unlike [`Polygon::center`], this isn't pulled towards clusters of
    /// vertices (e.g. the inner corners of a staircase).
    pub fn centroid(&self) -> R2<f64> {
        let a = self.signed_area();
        if a.abs() < 1e-12 {
            return self.center();
        }
        let n = self.vertices.len();
        let mut c = R2::zero();
        for i in 0..n {
            let v0 = self.vertices[i];
            let v1 = self.vertices[(i + 1) % n];
            c = c + (v0 + v1) * v0.cross(&v1);
        }
        c / (6. * a)
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verts: Vec<String> = self
            .vertices
            .iter()
            .map(|v| format!("({:.3}, {:.3})", v.x, v.y))
            .collect();
        write!(f, "Polygon[{}]", verts.join(", "))
    }
}

#[cfg(test)]
mod tests;
