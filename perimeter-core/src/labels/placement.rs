use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

use super::{LabelCandidate, LabelState};

/// Largest label count the exhaustive search is sized for (3^8 = 6561 assignments).
pub const MAX_EXHAUSTIVE_LABELS: usize = 8;

/// Chosen anchor per label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Index into each candidate's `anchors`
    pub choice: Vec<usize>,
    /// Smallest gap between any two placed pills; `None` with fewer than two labels
    pub min_separation: Option<f64>,
    /// Assignments scored
    pub evaluated: usize,
}

/// A label at its final position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct PlacedLabel {
    pub edge: usize,
    pub text: String,
    pub state: LabelState,
    /// Pill centre
    pub anchor: R2<f64>,
    /// Edge midpoint to anchor
    pub leader: (R2<f64>, R2<f64>),
    pub width: f64,
    pub height: f64,
}

/// Smallest rectangle gap between any two pills under `choice`; infinite for fewer than two.
pub fn min_separation(cands: &[LabelCandidate], choice: &[usize]) -> f64 {
    (0..cands.len())
        .tuple_combinations()
        .map(|(i, j)| cands[i].bbox(choice[i]).gap(&cands[j].bbox(choice[j])))
        .fold(f64::INFINITY, f64::min)
}

/// Score every assignment of anchors to labels and keep the first one whose smallest pairwise
/// gap is largest.
pub fn place(cands: &[LabelCandidate]) -> Placement {
    if cands.is_empty() {
        return Placement { choice: vec![], min_separation: None, evaluated: 0 };
    }
    debug_assert!(
        cands.len() <= MAX_EXHAUSTIVE_LABELS,
        "{} labels: exhaustive placement is sized for at most {}",
        cands.len(),
        MAX_EXHAUSTIVE_LABELS,
    );
    let mut best: Option<(OrderedFloat<f64>, Vec<usize>)> = None;
    let mut evaluated = 0;
    for choice in cands.iter().map(|c| 0..c.anchors.len()).multi_cartesian_product() {
        evaluated += 1;
        let score = OrderedFloat(min_separation(cands, &choice));
        if best.as_ref().map_or(true, |(b, _)| score > *b) {
            best = Some((score, choice));
        }
    }
    let (score, choice) = best.expect("every label has its outward anchor");
    debug!("placed {} labels: {} assignments, min separation {:.3}", cands.len(), evaluated, score.0);
    let min_separation = if cands.len() > 1 { Some(score.into_inner()) } else { None };
    Placement { choice, min_separation, evaluated }
}

/// Labels at their chosen anchors.
pub fn resolve(cands: &[LabelCandidate], placement: &Placement) -> Vec<PlacedLabel> {
    cands
        .iter()
        .zip(&placement.choice)
        .map(|(c, &k)| PlacedLabel {
            edge: c.edge,
            text: c.text.clone(),
            state: c.state,
            anchor: c.anchors[k],
            leader: (c.tether, c.anchors[k]),
            width: c.width,
            height: c.height,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        labels::{candidates, LabelSpec},
        polygon::Polygon,
    };
    use test_log::test;

    fn candidate(edge: usize, anchors: &[(f64, f64)]) -> LabelCandidate {
        LabelCandidate {
            edge,
            text: "7 cm".to_string(),
            state: LabelState::Given,
            tether: R2::zero(),
            anchors: anchors.iter().map(|&(x, y)| R2::new(x, y)).collect(),
            width: 2.,
            height: 1.,
        }
    }

    /// Every assignment, by recursion rather than `multi_cartesian_product`.
    fn all_choices(cands: &[LabelCandidate]) -> Vec<Vec<usize>> {
        match cands.split_last() {
            None => vec![vec![]],
            Some((last, rest)) => all_choices(rest)
                .into_iter()
                .flat_map(|prefix| {
                    (0..last.anchors.len()).map(move |k| {
                        let mut choice = prefix.clone();
                        choice.push(k);
                        choice
                    })
                })
                .collect(),
        }
    }

    fn octagon(radius: f64) -> Polygon {
        Polygon::new(
            (0..8)
                .map(|k| R2::new(1., 0.).rotate(TAU * (k as f64 + 0.5) / 8.) * radius + R2::new(100., 100.))
                .collect(),
        )
    }

    fn octagon_specs(standoff: f64) -> Vec<LabelSpec> {
        (0..8)
            .map(|edge| LabelSpec {
                edge,
                text: format!("{} cm", edge + 3),
                state: LabelState::Given,
                width: 28.,
                height: 16.,
                standoff,
            })
            .collect()
    }

    #[test]
    fn empty_placement() {
        let p = place(&[]);
        assert_eq!(p, Placement { choice: vec![], min_separation: None, evaluated: 0 });
        assert!(resolve(&[], &p).is_empty());
    }

    #[test]
    fn single_label_stays_outward() {
        let cands = vec![candidate(0, &[(0., -3.), (2., -2.), (-2., -2.)])];
        let p = place(&cands);
        assert_eq!(p.choice, vec![0]);
        assert_eq!(p.min_separation, None);
        let placed = resolve(&cands, &p);
        assert_eq!(placed[0].anchor, R2::new(0., -3.));
        assert_eq!(placed[0].leader, (R2::zero(), R2::new(0., -3.)));
    }

    #[test]
    fn overlapping_outward_anchors_spread() {
        // Both outward anchors coincide; rotating either apart clears the overlap
        let cands = vec![
            candidate(0, &[(0., 0.), (-5., 0.), (0., 5.)]),
            candidate(1, &[(0., 0.), (5., 0.), (0., -5.)]),
        ];
        assert_eq!(min_separation(&cands, &[0, 0]), 0.);
        let p = place(&cands);
        assert_eq!(p.evaluated, 9);
        // (0,5) vs (0,-5): boxes 1 tall, gap 9
        assert_eq!(p.choice, vec![2, 2]);
        assert_relative_eq!(p.min_separation.unwrap(), 9., epsilon = 1e-12);
    }

    #[test]
    fn ties_keep_the_first_assignment() {
        let cands = vec![candidate(0, &[(0., 0.), (0., 0.)]), candidate(1, &[(10., 0.), (10., 0.)])];
        assert_eq!(place(&cands).choice, vec![0, 0]);
    }

    #[test]
    fn octagon_searches_every_assignment() {
        let outline = octagon(40.);
        let cands = candidates(&outline, &octagon_specs(14.));
        assert!(cands.iter().all(|c| c.anchors.len() == 3));
        let p = place(&cands);
        assert_eq!(p.evaluated, 6561);
        let best = all_choices(&cands)
            .iter()
            .map(|c| min_separation(&cands, c))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(p.min_separation, Some(best));
        if best > 0. {
            assert!(p.min_separation.unwrap() > 0., "an overlap-free assignment exists");
        }
    }

    #[test]
    fn crowded_octagon_avoids_overlap() {
        // Pills wider than the edges they label
        let outline = octagon(30.);
        let cands = candidates(&outline, &octagon_specs(20.));
        let outward = vec![0; 8];
        let p = place(&cands);
        assert!(p.min_separation.unwrap() >= min_separation(&cands, &outward));
        let overlap_free = all_choices(&cands).iter().any(|c| min_separation(&cands, c) > 0.);
        assert_eq!(p.min_separation.unwrap() > 0., overlap_free);
    }

    #[test]
    fn max_min_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..40 {
            let m = rng.gen_range(2..=5);
            let cands: Vec<LabelCandidate> = (0..m)
                .map(|edge| {
                    let k = rng.gen_range(1..=3);
                    let anchors: Vec<(f64, f64)> =
                        (0..k).map(|_| (rng.gen_range(0. ..10.), rng.gen_range(0. ..10.))).collect();
                    candidate(edge, &anchors)
                })
                .collect();
            let p = place(&cands);
            let choices = all_choices(&cands);
            assert_eq!(p.evaluated, choices.len());
            for c in &choices {
                assert!(p.min_separation.unwrap() >= min_separation(&cands, c));
            }
        }
    }
}
