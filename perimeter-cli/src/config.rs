//! Worksheet settings, loadable from a JSON file and overridable from the command line.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use perimeter_core::{
    generator::{GenerateOptions, Level, ShapeFilter},
    layout::PageSpec,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    /// More than one level gives a differentiated worksheet, `count` questions per level
    #[serde(default = "default_levels")]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub filter: ShapeFilter,
    #[serde(default)]
    pub mixed_units: bool,
    #[serde(default)]
    pub hidden_edges: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub answers: bool,
    #[serde(default)]
    pub page: PageSpec,
}

fn default_count() -> usize {
    8
}

fn default_levels() -> Vec<Level> {
    vec![Level::One]
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            levels: default_levels(),
            filter: ShapeFilter::Any,
            mixed_units: false,
            hidden_edges: 0,
            seed: None,
            answers: false,
            page: PageSpec::default(),
        }
    }
}

impl WorksheetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let config: WorksheetConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing worksheet config {}", path.display()))?;
        Ok(config)
    }

    /// Generation options for one of this worksheet's levels.
    pub fn options(&self, level: Level) -> Result<GenerateOptions> {
        let options = GenerateOptions {
            level,
            filter: self.filter,
            mixed_units: self.mixed_units,
            hidden_edges: self.hidden_edges,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn differentiated(&self) -> bool {
        self.levels.len() > 1
    }

    /// `(level, count)` for each distinct level, ascending.
    pub fn counts(&self) -> Vec<(Level, usize)> {
        let mut levels = self.levels.clone();
        levels.sort();
        levels.dedup();
        levels.into_iter().map(|l| (l, self.count)).collect()
    }
}
