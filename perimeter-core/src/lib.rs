#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod catalogue;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod labels;
pub mod layout;
pub mod measurement;
pub mod projector;
pub mod question;

pub use geometry::bbox;
pub use geometry::polygon;
pub use geometry::r2;

pub use catalogue::{Catalogue, Family, ShapeDefinition, ShapeKind};
pub use error::{CatalogueError, InputError, LayoutError};
pub use generator::{generate, generate_batch, generate_differentiated, generate_with, GenerateOptions, Level, ShapeFilter};
pub use layout::{paginate, Page, PageSpec, Pass};
pub use measurement::{Edge, Unit, WorkingStep};
pub use polygon::Polygon;
pub use projector::{diagram, project, Canvas, Diagram};
pub use question::Question;
pub use r2::R2;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some("off") => log::LevelFilter::Off,
        Some(level) => {
            log::warn!("invalid log level {:?}, using info", level);
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn log_levels() {
        assert_eq!(parse_log_level(None), log::LevelFilter::Info);
        assert_eq!(parse_log_level(Some("debug")), log::LevelFilter::Debug);
        assert_eq!(parse_log_level(Some("loud")), log::LevelFilter::Info);
    }
}
