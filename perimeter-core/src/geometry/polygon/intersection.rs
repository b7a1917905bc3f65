use ordered_float::OrderedFloat;

use crate::r2::R2;

use super::Polygon;

/// Check if two line segments properly cross (endpoint contact doesn't count).
pub fn segments_intersect(a0: &R2<f64>, a1: &R2<f64>, b0: &R2<f64>, b1: &R2<f64>) -> bool {
    let d1 = cross_sign(b0, b1, a0);
    let d2 = cross_sign(b0, b1, a1);
    let d3 = cross_sign(a0, a1, b0);
    let d4 = cross_sign(a0, a1, b1);

    // Endpoints strictly on opposite sides of each other's lines
    ((d1 > 0. && d2 < 0.) || (d1 < 0. && d2 > 0.)) && ((d3 > 0. && d4 < 0.) || (d3 < 0. && d4 > 0.))
}

/// Sign of the turn a → b → c (positive: counter-clockwise).
fn cross_sign(a: &R2<f64>, b: &R2<f64>, c: &R2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

impl Polygon {
    /// Check if this polygon self-intersects (any non-adjacent edges cross).
    pub fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false;
        }

        for i in 0..n {
            let (a0, a1) = self.edge(i);
            for j in (i + 2)..n {
                // Edge n-1 is adjacent to edge 0
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b0, b1) = self.edge(j);
                if segments_intersect(&a0, &a1, &b0, &b1) {
                    return true;
                }
            }
        }
        false
    }

    /// How far the ray from `origin` along unit `dir` runs before meeting an edge other than
    /// `skip`; `None` when it escapes.
    pub fn ray_distance(&self, origin: &R2<f64>, dir: &R2<f64>, skip: usize) -> Option<f64> {
        (0..self.n())
            .filter(|&i| i != skip)
            .filter_map(|i| {
                let (a, b) = self.edge(i);
                let e = b - a;
                let denom = dir.cross(&e);
                // Parallel edges never stop the ray
                if denom.abs() < 1e-12 {
                    return None;
                }
                let w = a - *origin;
                let t = w.cross(&e) / denom;
                let u = w.cross(dir) / denom;
                (t > 1e-9 && (0. ..=1.).contains(&u)).then_some(OrderedFloat(t))
            })
            .min()
            .map(OrderedFloat::into_inner)
    }

    /// Whether the segment `p0 → p1` crosses any edge other than `skip`.
    pub fn segment_crosses(&self, p0: &R2<f64>, p1: &R2<f64>, skip: usize) -> bool {
        (0..self.n())
            .filter(|&i| i != skip)
            .any(|i| {
                let (a, b) = self.edge(i);
                segments_intersect(p0, p1, &a, &b)
            })
    }
}
