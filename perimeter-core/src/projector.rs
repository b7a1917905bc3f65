//! From a question's outline in centimetres to canvas coordinates with placed labels.
//!
//! One pipeline serves every renderer; callers differ only in the [`Canvas`] they pass.

use log::warn;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    labels::{self, LabelMeta, LabelSpec, PlacedLabel},
    polygon::Polygon,
    question::Question,
    r2::R2,
};

/// Drawing area, in whatever unit the renderer works in (pixels on screen, mm in print).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    /// Kept clear on every side, outside the label margin
    pub padding: f64,
}

impl Canvas {
    pub const SCREEN_FONT: f64 = 14.;
    pub const SCREEN_PADDING: f64 = 8.;
    pub const PRINT_FONT: f64 = 3.5;
    pub const PRINT_PADDING: f64 = 2.;

    /// Interactive canvas, in pixels.
    pub fn screen(width: f64, height: f64) -> Self {
        Canvas { width, height, font_size: Self::SCREEN_FONT, padding: Self::SCREEN_PADDING }
    }

    /// One worksheet cell, in millimetres.
    pub fn print_cell(width_mm: f64, height_mm: f64) -> Self {
        Canvas { width: width_mm, height: height_mm, font_size: Self::PRINT_FONT, padding: Self::PRINT_PADDING }
    }

    pub fn with_font_size(self, font_size: f64) -> Self {
        Canvas { font_size, ..self }
    }
}

/// An outline fitted to a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Projection {
    /// Canvas coordinates, y down
    pub vertices: Polygon,
    /// Canvas units per centimetre
    pub scale: f64,
    /// Space reserved on each side for labels, padding included
    pub margin: R2<f64>,
    pub specs: Vec<LabelSpec>,
}

/// Fit `raw` into `canvas`, reserving room for the labels `meta` describes.
///
/// The outline is normalised to its bounding box (longer side 1) to size label standoffs,
/// then scaled uniformly into the canvas less the label margin, centred, and flipped so y
/// points down.
pub fn project(raw: &Polygon, canvas: &Canvas, meta: &[LabelMeta]) -> Projection {
    let bbox = raw.bbox();
    let (bw, bh) = (bbox.width(), bbox.height());
    let extent = bw.max(bh);
    let normalized = raw.map(|p| (*p - bbox.min) / extent);
    let specs = labels::specs(meta, &normalized, canvas.font_size);

    let reach = specs
        .iter()
        .map(|s| s.reach())
        .fold(R2::zero(), |m, r| R2::new(m.x.max(r.x), m.y.max(r.y)));
    let margin = R2::new(canvas.padding, canvas.padding) + reach;

    let avail = R2::new(canvas.width - 2. * margin.x, canvas.height - 2. * margin.y);
    let mut scale = (avail.x / bw).min(avail.y / bh);
    if !(scale > 0.) {
        warn!(
            "{}×{} canvas leaves no room inside a {:.1}×{:.1} label margin",
            canvas.width, canvas.height, margin.x, margin.y,
        );
        scale = f64::EPSILON;
    }

    let offset = R2::new((canvas.width - bw * scale) / 2., (canvas.height - bh * scale) / 2.);
    let vertices = raw.map(|p| R2::new(offset.x + (p.x - bbox.min.x) * scale, offset.y + (bbox.max.y - p.y) * scale));
    Projection { vertices, scale, margin, specs }
}

/// Everything a renderer draws for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub canvas: Canvas,
    pub vertices: Vec<R2<f64>>,
    /// Tick-mark count per edge; edges sharing a count have equal length
    pub ticks: Vec<Option<usize>>,
    pub labels: Vec<PlacedLabel>,
    pub scale: f64,
    pub min_separation: Option<f64>,
}

/// Project `question` into `canvas` and place its labels. `reveal` shows hidden edges' values.
pub fn diagram(question: &Question, canvas: &Canvas, reveal: bool) -> Diagram {
    let meta = question.label_meta(reveal);
    let projection = project(&question.raw, canvas, &meta);
    let cands = labels::candidates(&projection.vertices, &projection.specs);
    let placement = labels::place(&cands);
    Diagram {
        canvas: *canvas,
        vertices: projection.vertices.vertices,
        ticks: question.ticks(),
        labels: labels::resolve(&cands, &placement),
        scale: projection.scale,
        min_separation: placement.min_separation,
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        bbox::BBox,
        catalogue::by_name,
        generator::{build_question, generate, GenerateOptions, Level},
    };
    use test_log::test;

    fn rectangle() -> Question {
        let def = by_name("rectangle").unwrap();
        build_question(def, &[9, 6], &GenerateOptions::new(Level::Two), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn rectangle_fits_and_flips() {
        let q = rectangle();
        let canvas = Canvas::screen(400., 300.);
        let p = project(&q.raw, &canvas, &q.label_meta(false));
        let reach = p.specs.iter().map(|s| s.reach()).fold(0f64, |m, r| m.max(r.y));
        assert_relative_eq!(p.margin.y, canvas.padding + reach, epsilon = 1e-12);
        let bbox = p.vertices.bbox();
        // Aspect ratio kept
        assert_relative_eq!(bbox.width() / bbox.height(), 1.5, epsilon = 1e-9);
        // Centred
        assert_relative_eq!(bbox.center(), R2::new(200., 150.), epsilon = 1e-9);
        // The bottom edge (y = 0 in cm) is now the lowest on screen
        assert_relative_eq!(p.vertices.vertices[0].y, bbox.max.y, epsilon = 1e-9);
        // Fills the tighter axis exactly
        let fit_x = (bbox.min.x - p.margin.x).abs() < 1e-9;
        let fit_y = (bbox.min.y - p.margin.y).abs() < 1e-9;
        assert!(fit_x || fit_y);
    }

    #[test]
    fn projection_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let q = generate(&GenerateOptions::new(Level::Three).with_mixed_units(true), &mut rng);
            let canvas = Canvas::print_cell(90., 60.);
            let a = diagram(&q, &canvas, false);
            let b = diagram(&q, &canvas, false);
            for (p, r) in a.vertices.iter().zip(&b.vertices) {
                assert_eq!(p.x.to_bits(), r.x.to_bits());
                assert_eq!(p.y.to_bits(), r.y.to_bits());
            }
            assert_eq!(a, b);
        }
    }

    #[test]
    fn pills_stay_inside_canvas() {
        let canvases = [Canvas::screen(480., 360.), Canvas::screen(300., 500.), Canvas::print_cell(93., 62.)];
        for level in Level::ALL {
            let options = GenerateOptions::new(level).with_hidden_edges(1).with_mixed_units(true);
            let mut rng = StdRng::seed_from_u64(level as u64);
            for _ in 0..40 {
                let q = generate(&options, &mut rng);
                for canvas in &canvases {
                    let frame = BBox { min: R2::zero(), max: R2::new(canvas.width, canvas.height) };
                    for reveal in [false, true] {
                        let d = diagram(&q, canvas, reveal);
                        assert_eq!(d.labels.len(), q.labelled.len());
                        for v in &d.vertices {
                            assert!(frame.contains(v, 1e-9), "{}: vertex {} off canvas", q.config_key(), v);
                        }
                        for label in &d.labels {
                            let pill = BBox::centered(label.anchor, label.width, label.height);
                            assert!(frame.contains_box(&pill, 1e-9), "{}: {:?} off canvas", q.config_key(), label);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn screen_and_print_agree_up_to_scale() {
        // Same shape, canvases proportional in size and font: same picture, scaled
        let q = rectangle();
        let screen = Canvas { width: 400., height: 280., font_size: 14., padding: 8. };
        let print = Canvas { width: 100., height: 70., font_size: 3.5, padding: 2. };
        let a = diagram(&q, &screen, false);
        let b = diagram(&q, &print, false);
        for (p, r) in a.vertices.iter().zip(&b.vertices) {
            assert_relative_eq!(*p / 4., *r, epsilon = 1e-9);
        }
        assert_eq!(a.labels.len(), b.labels.len());
        for (p, r) in a.labels.iter().zip(&b.labels) {
            assert_relative_eq!(p.anchor / 4., r.anchor, epsilon = 1e-9);
        }
    }

    #[test]
    fn hidden_labels_reveal() {
        let def = by_name("rectangle").unwrap();
        let options = GenerateOptions::new(Level::Two).with_hidden_edges(1);
        let q = build_question(def, &[9, 6], &options, &mut StdRng::seed_from_u64(4));
        let h = q.hidden()[0];
        let canvas = Canvas::screen(400., 300.);
        let shown = diagram(&q, &canvas, false);
        let revealed = diagram(&q, &canvas, true);
        let text = |d: &Diagram| d.labels.iter().find(|l| l.edge == h).unwrap().text.clone();
        assert_eq!(text(&shown), "?");
        assert_eq!(text(&revealed), q.edges[h].value_text());
        assert_eq!(shown.ticks, vec![Some(1), Some(2), Some(1), Some(2)]);
    }

    fn leaders_clear(q: &Question, d: &Diagram) {
        let outline = Polygon::new(d.vertices.clone());
        for label in &d.labels {
            let (from, to) = label.leader;
            assert!(!outline.segment_crosses(&from, &to, label.edge), "{}: edge {} leader crosses the outline", q.config_key(), label.edge);
            assert!(!outline.contains(&label.anchor), "{}: edge {} pill inside the outline", q.config_key(), label.edge);
        }
    }

    #[test]
    fn narrow_notch_leaders_stay_outside() {
        // 2 cm notch, 7 cm deep: its walls face each other across less than two standoffs
        let def = by_name("notched rectangle").unwrap();
        for level in [Level::Two, Level::Three] {
            let options = GenerateOptions::new(level).with_hidden_edges(1);
            let q = build_question(def, &[15, 12, 4, 2, 7], &options, &mut StdRng::seed_from_u64(0));
            assert_eq!(q.labelled.len(), 8);
            for reveal in [false, true] {
                leaders_clear(&q, &diagram(&q, &Canvas::print_cell(89., 45.), reveal));
            }
        }
    }

    #[test]
    fn leaders_never_cross_the_outline() {
        let canvases = [Canvas::screen(480., 360.), Canvas::print_cell(89., 45.)];
        for level in Level::ALL {
            let options = GenerateOptions::new(level).with_hidden_edges(2).with_mixed_units(true);
            let mut rng = StdRng::seed_from_u64(100 + level as u64);
            for _ in 0..100 {
                let q = generate(&options, &mut rng);
                for canvas in &canvases {
                    leaders_clear(&q, &diagram(&q, canvas, false));
                }
            }
        }
    }
}
