//! CLI for perimeter practice questions.
//!
//! Provides:
//! - Single questions as JSON and SVG
//! - Printable worksheets (one SVG per page, optional answer key), plus their JSON model

mod config;
mod render;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use perimeter_core::{
    generator::{self, GenerateOptions, Level, ShapeFilter},
    layout::{self, Pass},
    projector::{self, Canvas},
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use config::WorksheetConfig;
use render::RenderConfig;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PERIMETER_BUILD_SHA"), ")");

#[derive(Parser)]
#[command(name = "perimeter")]
#[command(about = "Perimeter practice question and worksheet generator", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by both subcommands
#[derive(Args)]
struct ShapeArgs {
    /// Shapes to draw from: any, polygons or rectilinear
    #[arg(short, long)]
    filter: Option<ShapeFilter>,

    /// Show some edges in mm or m (level 3 only)
    #[arg(short, long)]
    mixed_units: bool,

    /// Edges to leave for the learner to work out (levels 2 and 3)
    #[arg(long)]
    hidden: Option<u8>,

    /// Random seed; omit for a fresh draw each run
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one question
    Question {
        /// Difficulty: 1, 2 or 3
        #[arg(short, long, default_value = "1")]
        level: u8,

        #[command(flatten)]
        shape: ShapeArgs,

        /// Canvas width for the diagram, in pixels
        #[arg(long, default_value = "480")]
        width: f64,

        /// Canvas height for the diagram, in pixels
        #[arg(long, default_value = "360")]
        height: f64,

        /// Write the diagram as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write the question (and its diagram) as JSON; prints to stdout otherwise
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Generate a printable worksheet
    Worksheet {
        /// Questions per level
        #[arg(short, long)]
        count: Option<usize>,

        /// Comma-separated levels; more than one gives a differentiated worksheet
        #[arg(short, long, value_delimiter = ',')]
        levels: Option<Vec<u8>>,

        #[command(flatten)]
        shape: ShapeArgs,

        /// Worksheet settings (JSON); flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for worksheet.json and page SVGs
        #[arg(short, long, default_value = "worksheet")]
        out_dir: PathBuf,

        /// Also write answer-key pages
        #[arg(short, long)]
        answers: bool,
    },
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct QuestionOutput<'a> {
    question: &'a perimeter_core::Question,
    diagram: &'a perimeter_core::Diagram,
    working: Vec<String>,
}

fn question(level: u8, shape: ShapeArgs, width: f64, height: f64, svg: Option<PathBuf>, json: Option<PathBuf>) -> Result<()> {
    let options = GenerateOptions {
        level: Level::try_from(level)?,
        filter: shape.filter.unwrap_or_default(),
        mixed_units: shape.mixed_units,
        hidden_edges: shape.hidden.unwrap_or(0),
    };
    options.validate()?;
    let mut rng = seeded(shape.seed);
    let question = generator::generate(&options, &mut rng);
    info!("{}: {}", question.shape, question.config_key());
    let diagram = projector::diagram(&question, &Canvas::screen(width, height), false);

    if let Some(path) = svg {
        fs::write(&path, render::diagram_svg(&diagram, &RenderConfig::default()))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    let output = QuestionOutput { question: &question, diagram: &diagram, working: question.working() };
    match json {
        Some(path) => write_json(&path, &output)?,
        None => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}

fn worksheet(
    count: Option<usize>,
    levels: Option<Vec<u8>>,
    shape: ShapeArgs,
    config: Option<PathBuf>,
    out_dir: PathBuf,
    answers: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => WorksheetConfig::load(&path)?,
        None => WorksheetConfig::default(),
    };
    if let Some(count) = count {
        config.count = count;
    }
    if let Some(levels) = levels {
        config.levels = levels.into_iter().map(Level::try_from).collect::<Result<_, _>>()?;
    }
    if let Some(filter) = shape.filter {
        config.filter = filter;
    }
    config.mixed_units |= shape.mixed_units;
    if let Some(hidden) = shape.hidden {
        config.hidden_edges = hidden;
    }
    if shape.seed.is_some() {
        config.seed = shape.seed;
    }
    config.answers |= answers;

    let mut rng = seeded(config.seed);
    let differentiated = config.differentiated();
    let questions = if differentiated {
        generator::generate_differentiated(&config.options(Level::One)?, &config.counts(), &mut rng)
    } else {
        let level = config.levels.first().copied().unwrap_or(Level::One);
        generator::generate_batch(&config.options(level)?, config.count, &mut rng)
    };
    info!("generated {} questions", questions.len());

    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut passes = vec![("page", Pass::Questions)];
    if config.answers {
        passes.push(("answers", Pass::Answers));
    }
    let render_config = RenderConfig::default();
    for (prefix, pass) in passes {
        let mut spec = config.page.clone();
        if pass == Pass::Answers {
            spec.title = format!("{} (answers)", spec.title);
        }
        let pages = layout::paginate(&questions, &spec, pass, differentiated)?;
        for page in &pages {
            let path = out_dir.join(format!("{}-{:02}.svg", prefix, page.number));
            fs::write(&path, render::page_svg(page, config.page.font_size, &render_config))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
    }

    #[derive(Serialize)]
    struct WorksheetOutput<'a> {
        config: &'a WorksheetConfig,
        questions: &'a [perimeter_core::Question],
    }
    write_json(&out_dir.join("worksheet.json"), &WorksheetOutput { config: &config, questions: &questions })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Question { level, shape, width, height, svg, json } => question(level, shape, width, height, svg, json),
        Commands::Worksheet { count, levels, shape, config, out_dir, answers } => {
            worksheet(count, levels, shape, config, out_dir, answers)
        }
    }
}
