use std::f64::consts::FRAC_PI_4;

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{bbox::BBox, polygon::Polygon, r2::R2};

use super::{LabelSpec, LabelState};

/// Share of the open run in front of an edge that its outward anchor may use.
pub const OPEN_FRACTION: f64 = 0.5;

/// Where one label may go: the outward anchor first, then whichever ±45° anchors survived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct LabelCandidate {
    pub edge: usize,
    pub text: String,
    pub state: LabelState,
    /// Edge midpoint the leader line starts from
    pub tether: R2<f64>,
    pub anchors: Vec<R2<f64>>,
    pub width: f64,
    pub height: f64,
}

impl LabelCandidate {
    pub fn bbox(&self, k: usize) -> BBox {
        BBox::centered(self.anchors[k], self.width, self.height)
    }
}

/// Candidate anchors for each label on an outline in canvas coordinates.
///
/// Each label gets the point `standoff` along its edge's outward normal, plus the points at
/// ±45° from it. An edge facing another part of the outline (a notch wall) has its standoff cut
/// to [`OPEN_FRACTION`] of the gap, so the outward leader stays clear. A rotated anchor is
/// dropped when it lands inside the outline or its leader line crosses another edge.
pub fn candidates(outline: &Polygon, specs: &[LabelSpec]) -> Vec<LabelCandidate> {
    specs
        .iter()
        .map(|spec| {
            let tether = outline.edge_midpoint(spec.edge);
            let normal = outline.outward_normal(spec.edge);
            let standoff = match outline.ray_distance(&tether, &normal, spec.edge) {
                Some(free) if free * OPEN_FRACTION < spec.standoff => {
                    debug!("edge {}: standoff {:.3} capped to {:.3}", spec.edge, spec.standoff, free * OPEN_FRACTION);
                    free * OPEN_FRACTION
                }
                _ => spec.standoff,
            };
            let mut anchors = vec![tether + normal * standoff];
            for theta in [FRAC_PI_4, -FRAC_PI_4] {
                let anchor = tether + normal.rotate(theta) * standoff;
                if outline.contains(&anchor) || outline.segment_crosses(&tether, &anchor, spec.edge) {
                    continue;
                }
                anchors.push(anchor);
            }
            LabelCandidate {
                edge: spec.edge,
                text: spec.text.clone(),
                state: spec.state,
                tether,
                anchors,
                width: spec.width,
                height: spec.height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn spec(edge: usize) -> LabelSpec {
        LabelSpec { edge, text: "5 cm".to_string(), state: LabelState::Given, width: 4., height: 2., standoff: 2. }
    }

    #[test]
    fn square_gets_three_anchors_per_edge() {
        let square = Polygon::new(vec![R2::new(0., 0.), R2::new(10., 0.), R2::new(10., 10.), R2::new(0., 10.)]);
        let cands = candidates(&square, &[spec(0), spec(1)]);
        assert_eq!(cands.len(), 2);
        for c in &cands {
            assert_eq!(c.anchors.len(), 3);
            assert!(c.anchors.iter().all(|a| !square.contains(a)));
        }
        assert_relative_eq!(cands[0].tether, R2::new(5., 0.), epsilon = 1e-12);
        assert_relative_eq!(cands[0].anchors[0], R2::new(5., -2.), epsilon = 1e-12);
        assert_relative_eq!(cands[1].anchors[0], R2::new(12., 5.), epsilon = 1e-12);
        let s = 2f64.sqrt();
        assert_relative_eq!(cands[0].anchors[1], R2::new(5. + s, -s), epsilon = 1e-12);
        assert_relative_eq!(cands[0].anchors[2], R2::new(5. - s, -s), epsilon = 1e-12);
        assert_relative_eq!(cands[0].bbox(0).width(), 4., epsilon = 1e-12);
    }

    fn ell() -> Polygon {
        // L-shape with a 1×1 bite out of the top-right corner
        Polygon::new(vec![
            R2::new(0., 0.),
            R2::new(10., 0.),
            R2::new(10., 9.),
            R2::new(9., 9.),
            R2::new(9., 10.),
            R2::new(0., 10.),
        ])
    }

    #[test]
    fn inner_corner_anchors_are_dropped() {
        let ell = ell();
        // The base and the right side face open space
        let open = candidates(&ell, &[spec(0), spec(1)]);
        assert_eq!(open[0].anchors.len(), 3);
        assert_eq!(open[1].anchors.len(), 3);

        // The bite's wall: the −45° leader cuts through the bite's floor and the right side
        let wall = candidates(&ell, &[LabelSpec { standoff: 3., ..spec(3) }]);
        let c = &wall[0];
        assert_eq!(c.anchors.len(), 2);
        assert_relative_eq!(c.tether, R2::new(9., 9.5), epsilon = 1e-12);
        assert_relative_eq!(c.anchors[0], R2::new(12., 9.5), epsilon = 1e-12);
        let r = 3. / 2f64.sqrt();
        assert_relative_eq!(c.anchors[1], R2::new(9. + r, 9.5 + r), epsilon = 1e-12);

        // The bite's floor: its −45° leader crosses the wall
        let floor = candidates(&ell, &[spec(2)]);
        assert_eq!(floor[0].anchors.len(), 2);
    }

    #[test]
    fn slot_walls_keep_leaders_clear() {
        // 2-wide slot in the top of a 6×4 rectangle; a standoff of 3 would reach past the far wall
        let slot = Polygon::new(vec![
            R2::new(0., 0.),
            R2::new(6., 0.),
            R2::new(6., 4.),
            R2::new(4., 4.),
            R2::new(4., 2.),
            R2::new(2., 2.),
            R2::new(2., 4.),
            R2::new(0., 4.),
        ]);
        let specs: Vec<LabelSpec> = [3, 5].iter().map(|&edge| LabelSpec { standoff: 3., ..spec(edge) }).collect();
        let cands = candidates(&slot, &specs);
        assert_relative_eq!(cands[0].anchors[0], R2::new(3., 3.), epsilon = 1e-12);
        assert_relative_eq!(cands[1].anchors[0], R2::new(3., 3.), epsilon = 1e-12);
        for c in &cands {
            for a in &c.anchors {
                assert!(!slot.contains(a));
                assert!(!slot.segment_crosses(&c.tether, a, c.edge));
            }
        }
        // Facing open space, the full standoff is used
        let base = candidates(&slot, &[LabelSpec { standoff: 3., ..spec(0) }]);
        assert_relative_eq!(base[0].anchors[0], R2::new(3., -3.), epsilon = 1e-12);
    }
}
