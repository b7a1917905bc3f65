//! Worksheet pages: questions in a grid of fixed-size cells, in millimetres.
//!
//! Every cell's diagram goes through [`projector::diagram`] with a print canvas, the same
//! pipeline the interactive renderer uses.

use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::LayoutError,
    generator::Level,
    projector::{self, Canvas, Diagram},
    question::Question,
    r2::R2,
};

const EPSILON: f64 = 1e-9;

fn default_title() -> String {
    "Perimeter".to_string()
}

/// Page geometry, in millimetres. Defaults to a 2×4 grid on A4 portrait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSpec {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Title line at the top of each page
    pub header_height: f64,
    pub cols: usize,
    pub rows: usize,
    pub gap: f64,
    pub band_height: f64,
    /// Question number, above the diagram
    pub caption_height: f64,
    /// "Perimeter = ___" line, below the diagram
    pub answer_height: f64,
    pub font_size: f64,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec {
            width: 210.,
            height: 297.,
            margin: 12.,
            header_height: 10.,
            cols: 2,
            rows: 4,
            gap: 4.,
            band_height: 8.,
            caption_height: 6.,
            answer_height: 7.,
            font_size: Canvas::PRINT_FONT,
            title: default_title(),
        }
    }
}

impl PageSpec {
    pub fn content_top(&self) -> f64 {
        self.margin + self.header_height
    }

    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2. * self.margin
    }

    pub fn cell_width(&self) -> f64 {
        (self.content_width() - (self.cols as f64 - 1.) * self.gap) / self.cols as f64
    }

    /// Rows share the page evenly; with tier bands, room for one band is set aside first.
    pub fn cell_height(&self, differentiated: bool) -> f64 {
        let mut free = self.content_bottom() - self.content_top() - (self.rows as f64 - 1.) * self.gap;
        if differentiated {
            free -= self.band_height + self.gap;
        }
        free / self.rows as f64
    }

    /// Print canvas for the diagram inside one cell.
    pub fn diagram_canvas(&self, differentiated: bool) -> Canvas {
        Canvas::print_cell(
            self.cell_width(),
            self.cell_height(differentiated) - self.caption_height - self.answer_height,
        )
        .with_font_size(self.font_size)
    }

    pub fn validate(&self, differentiated: bool) -> Result<(), LayoutError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LayoutError::EmptyGrid { rows: self.rows, cols: self.cols });
        }
        let canvas = self.diagram_canvas(differentiated);
        if canvas.width <= 2. * canvas.padding || canvas.height <= 2. * canvas.padding {
            return Err(LayoutError::CellTooSmall { width: canvas.width, height: canvas.height });
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Pass {
    /// Hidden edges show `?`; the answer line is blank
    Questions,
    /// Hidden edges revealed, answer filled in
    Answers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Position in the worksheet's question list
    pub question: usize,
    /// 1-based, as printed
    pub number: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Page position of the diagram canvas's top-left corner
    pub origin: R2<f64>,
    pub diagram: Diagram,
    pub answer: Option<String>,
    pub working: Vec<String>,
}

/// Coloured header over the first row of each tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    #[tsify(type = "1 | 2 | 3")]
    pub level: Level,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub cells: Vec<Cell>,
    pub bands: Vec<Band>,
}

impl Page {
    fn new(number: usize, spec: &PageSpec) -> Self {
        Page { number, width: spec.width, height: spec.height, title: spec.title.clone(), cells: vec![], bands: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.bands.is_empty()
    }
}

/// One grid row: questions by index, and the tier whose band heads it, if any.
struct Row {
    band: Option<Level>,
    questions: Vec<usize>,
}

/// Split questions into rows. In differentiated mode a new tier starts a new row under a band.
fn rows(questions: &[Question], cols: usize, differentiated: bool) -> Vec<Row> {
    let mut rows: Vec<Row> = vec![];
    for (idx, q) in questions.iter().enumerate() {
        let new_tier = differentiated && (idx == 0 || questions[idx - 1].level != q.level);
        match rows.last_mut() {
            Some(row) if !new_tier && row.questions.len() < cols => row.questions.push(idx),
            _ => rows.push(Row { band: new_tier.then_some(q.level), questions: vec![idx] }),
        }
    }
    rows
}

/// Lay `questions` out on pages. A row that would overflow the page starts the next one, and
/// a tier band always moves with the row beneath it.
pub fn paginate(
    questions: &[Question],
    spec: &PageSpec,
    pass: Pass,
    differentiated: bool,
) -> Result<Vec<Page>, LayoutError> {
    spec.validate(differentiated)?;
    let cell_w = spec.cell_width();
    let cell_h = spec.cell_height(differentiated);
    let canvas = spec.diagram_canvas(differentiated);
    let reveal = pass == Pass::Answers;

    let mut pages: Vec<Page> = vec![];
    let mut page = Page::new(1, spec);
    let mut y = spec.content_top();
    for row in rows(questions, spec.cols, differentiated) {
        let band_h = if row.band.is_some() { spec.band_height + spec.gap } else { 0. };
        let mut top = if page.is_empty() { y } else { y + spec.gap };
        if !page.is_empty() && top + band_h + cell_h > spec.content_bottom() + EPSILON {
            debug!("page {} full after {} cells", page.number, page.cells.len());
            let number = page.number + 1;
            pages.push(page);
            page = Page::new(number, spec);
            top = spec.content_top();
        }
        if let Some(level) = row.band {
            page.bands.push(Band {
                level,
                title: format!("Level {}", level),
                x: spec.margin,
                y: top,
                width: spec.content_width(),
                height: spec.band_height,
            });
            top += band_h;
        }
        for (col, &idx) in row.questions.iter().enumerate() {
            let q = &questions[idx];
            let x = spec.margin + col as f64 * (cell_w + spec.gap);
            page.cells.push(Cell {
                question: idx,
                number: idx + 1,
                x,
                y: top,
                width: cell_w,
                height: cell_h,
                origin: R2::new(x, top + spec.caption_height),
                diagram: projector::diagram(q, &canvas, reveal),
                answer: reveal.then(|| q.answer.clone()),
                working: if reveal { q.working() } else { vec![] },
            });
        }
        y = top + cell_h;
    }
    if !page.is_empty() {
        pages.push(page);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        bbox::BBox,
        generator::{generate_batch, generate_differentiated, GenerateOptions},
    };
    use test_log::test;

    fn batch(count: usize) -> Vec<Question> {
        generate_batch(&GenerateOptions::new(Level::Two).with_hidden_edges(1), count, &mut StdRng::seed_from_u64(9))
    }

    fn tiers(counts: &[(Level, usize)]) -> Vec<Question> {
        generate_differentiated(&GenerateOptions::default(), counts, &mut StdRng::seed_from_u64(10))
    }

    fn inside_page(page: &Page, spec: &PageSpec) {
        let frame = BBox { min: R2::new(spec.margin, spec.content_top()), max: R2::new(spec.width - spec.margin, spec.content_bottom()) };
        for cell in &page.cells {
            let b = BBox { min: R2::new(cell.x, cell.y), max: R2::new(cell.x + cell.width, cell.y + cell.height) };
            assert!(frame.contains_box(&b, 1e-9), "page {}: cell {} at {:?} overflows", page.number, cell.number, b);
        }
        for band in &page.bands {
            assert!(band.y >= spec.content_top() - 1e-9);
            assert!(band.y + band.height <= spec.content_bottom() + 1e-9);
        }
    }

    #[test]
    fn grid_spills_onto_second_page() {
        let spec = PageSpec::default();
        let questions = batch(10);
        let pages = paginate(&questions, &spec, Pass::Questions, false).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cells.len(), 8);
        assert_eq!(pages[1].cells.len(), 2);
        assert_eq!(pages[1].number, 2);
        assert!(pages.iter().all(|p| p.bands.is_empty()));
        let numbers: Vec<usize> = pages.iter().flat_map(|p| p.cells.iter().map(|c| c.number)).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        for page in &pages {
            inside_page(page, &spec);
            assert!(page.cells.iter().all(|c| c.answer.is_none() && c.working.is_empty()));
        }
    }

    #[test]
    fn answer_pass_reveals() {
        let spec = PageSpec::default();
        let questions = batch(4);
        let pages = paginate(&questions, &spec, Pass::Answers, false).unwrap();
        for cell in &pages[0].cells {
            let q = &questions[cell.question];
            assert_eq!(cell.answer.as_deref(), Some(q.answer.as_str()));
            assert_eq!(cell.working, q.working());
            assert!(cell.diagram.labels.iter().all(|l| l.text != "?"));
        }
    }

    #[test]
    fn one_band_per_tier() {
        let spec = PageSpec::default();
        let questions = tiers(&[(Level::One, 3), (Level::Two, 2), (Level::Three, 1)]);
        let pages = paginate(&questions, &spec, Pass::Questions, true).unwrap();
        let bands: Vec<&Band> = pages.iter().flat_map(|p| p.bands.iter()).collect();
        assert_eq!(bands.iter().map(|b| b.level).collect::<Vec<_>>(), vec![Level::One, Level::Two, Level::Three]);
        assert_eq!(bands[1].title, "Level 2");
        // Each tier's first question opens a row in the first column, right under its band
        for page in &pages {
            for band in &page.bands {
                let first = page
                    .cells
                    .iter()
                    .find(|c| questions[c.question].level == band.level)
                    .expect("band sits over its tier's first row");
                assert_relative_eq!(first.x, spec.margin);
                assert_relative_eq!(first.y, band.y + band.height + spec.gap, epsilon = 1e-9);
            }
            inside_page(page, &spec);
        }
    }

    #[test]
    fn band_moves_with_its_row() {
        // Two rows per page: page 1 fills exactly, so the level-2 band moves over with its row
        let spec = PageSpec { rows: 2, ..PageSpec::default() };
        let questions = tiers(&[(Level::One, 4), (Level::Two, 2)]);
        let pages = paginate(&questions, &spec, Pass::Questions, true).unwrap();
        for page in &pages {
            inside_page(page, &spec);
            for band in &page.bands {
                assert!(page.cells.iter().any(|c| (c.y - (band.y + band.height + spec.gap)).abs() < 1e-9));
            }
        }
        let last = pages.last().unwrap();
        assert_eq!(last.bands.len(), 1);
        assert_eq!(last.bands[0].level, Level::Two);
    }

    #[test]
    fn cell_diagrams_share_the_print_canvas() {
        let spec = PageSpec::default();
        let pages = paginate(&batch(2), &spec, Pass::Questions, false).unwrap();
        let canvas = spec.diagram_canvas(false);
        for cell in &pages[0].cells {
            assert_eq!(cell.diagram.canvas, canvas);
            assert_relative_eq!(cell.origin.y, cell.y + spec.caption_height);
            assert!(canvas.height + spec.caption_height + spec.answer_height <= cell.height + 1e-9);
        }
    }

    #[test]
    fn bad_grids_are_rejected() {
        let spec = PageSpec { cols: 0, ..PageSpec::default() };
        assert_eq!(paginate(&[], &spec, Pass::Questions, false), Err(LayoutError::EmptyGrid { rows: 4, cols: 0 }));
        let spec = PageSpec { rows: 40, ..PageSpec::default() };
        assert!(matches!(paginate(&[], &spec, Pass::Questions, false), Err(LayoutError::CellTooSmall { .. })));
        assert_eq!(paginate(&[], &PageSpec::default(), Pass::Questions, false), Ok(vec![]));
    }

    #[test]
    fn page_spec_from_json() {
        let spec: PageSpec = serde_json::from_str(r#"{"cols": 3, "title": "Week 4"}"#).unwrap();
        assert_eq!(spec.cols, 3);
        assert_eq!(spec.rows, 4);
        assert_eq!(spec.title, "Week 4");
    }
}
