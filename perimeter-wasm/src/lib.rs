//! WASM bindings for perimeter questions.
//!
//! The browser renderer calls [`generate_question`] on "New Question", then
//! [`question_diagram`] whenever its canvas size changes.

use log::{error, info};
use perimeter_core::{
    generator::{self, GenerateOptions, Level},
    layout::{self, PageSpec, Pass},
    projector::{self, Canvas},
    Question,
};
use rand::{rngs::StdRng, SeedableRng};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) -> Result<(), JsError> {
    let level: Option<String> = serde_wasm_bindgen::from_value(level)?;
    log::set_max_level(perimeter_core::parse_log_level(level.as_deref()));
    Ok(())
}

fn options(options: JsValue) -> Result<GenerateOptions, JsError> {
    let options: GenerateOptions = serde_wasm_bindgen::from_value(options)?;
    options.validate()?;
    Ok(options)
}

/// Generates one question.
///
/// # Arguments
/// * `options` - [`GenerateOptions`]: `{ level, filter, mixedUnits, hiddenEdges }`, all optional.
/// * `seed` - The same seed and options always give the same question.
#[wasm_bindgen]
pub fn generate_question(opts: JsValue, seed: u32) -> Result<JsValue, JsError> {
    let opts = options(opts)?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let question = generator::generate(&opts, &mut rng);
    Ok(serde_wasm_bindgen::to_value(&question)?)
}

/// Projects a question onto a `width`×`height` pixel canvas and places its labels.
///
/// # Arguments
/// * `font_size` - Label font size in pixels; defaults to the screen font when omitted.
/// * `reveal` - Show hidden edges' values.
#[wasm_bindgen]
pub fn question_diagram(
    question: JsValue,
    width: f64,
    height: f64,
    font_size: Option<f64>,
    reveal: Option<bool>,
) -> Result<JsValue, JsError> {
    let question: Question = serde_wasm_bindgen::from_value(question)?;
    let mut canvas = Canvas::screen(width, height);
    if let Some(font_size) = font_size {
        canvas = canvas.with_font_size(font_size);
    }
    let diagram = projector::diagram(&question, &canvas, reveal.unwrap_or(false));
    Ok(serde_wasm_bindgen::to_value(&diagram)?)
}

/// Generates `count` distinct questions at one level, spread across shape families.
#[wasm_bindgen]
pub fn generate_worksheet(opts: JsValue, count: usize, seed: u32) -> Result<JsValue, JsError> {
    let opts = options(opts)?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let questions = generator::generate_batch(&opts, count, &mut rng);
    Ok(serde_wasm_bindgen::to_value(&questions)?)
}

/// Generates a worksheet mixing levels.
///
/// # Arguments
/// * `counts` - `[level, count]` pairs, e.g. `[[1, 4], [2, 4]]`.
#[wasm_bindgen]
pub fn generate_differentiated_worksheet(opts: JsValue, counts: JsValue, seed: u32) -> Result<JsValue, JsError> {
    let opts = options(opts)?;
    let counts: Vec<(u8, usize)> = serde_wasm_bindgen::from_value(counts)?;
    let counts = counts
        .into_iter()
        .map(|(level, count)| Ok((Level::try_from(level)?, count)))
        .collect::<Result<Vec<_>, JsError>>()?;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let questions = generator::generate_differentiated(&opts, &counts, &mut rng);
    Ok(serde_wasm_bindgen::to_value(&questions)?)
}

/// Lays questions out on printable pages.
///
/// # Arguments
/// * `page_spec` - [`PageSpec`] overrides; `null` for A4 with a 2×4 grid.
/// * `answers` - Answer-key pass: hidden edges revealed, answers filled in.
/// * `differentiated` - Head each level's first row with a band.
#[wasm_bindgen]
pub fn worksheet_pages(
    questions: JsValue,
    page_spec: JsValue,
    answers: bool,
    differentiated: bool,
) -> Result<JsValue, JsError> {
    let questions: Vec<Question> = serde_wasm_bindgen::from_value(questions)?;
    let spec: Option<PageSpec> = serde_wasm_bindgen::from_value(page_spec)?;
    let pass = if answers { Pass::Answers } else { Pass::Questions };
    let pages = layout::paginate(&questions, &spec.unwrap_or_default(), pass, differentiated)?;
    Ok(serde_wasm_bindgen::to_value(&pages)?)
}
