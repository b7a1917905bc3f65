use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{catalogue::Catalogue, error::InputError};

/// Difficulty tier.
///
/// 1: one label per symmetry group, tick marks for the rest. 2: every edge labelled,
/// hidden edges allowed. 3: harder shapes, mixed units allowed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];
}

impl TryFrom<u8> for Level {
    type Error = InputError;
    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            _ => Err(InputError::InvalidLevel(level)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Which catalogue(s) a question may draw from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum ShapeFilter {
    #[default]
    Any,
    Polygons,
    Rectilinear,
}

impl ShapeFilter {
    pub fn admits(&self, catalogue: Catalogue) -> bool {
        match self {
            ShapeFilter::Any => true,
            ShapeFilter::Polygons => catalogue == Catalogue::Polygon,
            ShapeFilter::Rectilinear => catalogue == Catalogue::Rectilinear,
        }
    }
}

impl FromStr for ShapeFilter {
    type Err = InputError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "" => Ok(ShapeFilter::Any),
            "polygons" | "polygon" | "regular" => Ok(ShapeFilter::Polygons),
            "rectilinear" => Ok(ShapeFilter::Rectilinear),
            _ => Err(InputError::UnknownFilter(s.to_string())),
        }
    }
}

fn default_level() -> Level {
    Level::One
}

/// Everything a single "New Question" request carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    #[serde(default = "default_level")]
    #[tsify(type = "1 | 2 | 3")]
    pub level: Level,
    #[serde(default)]
    pub filter: ShapeFilter,
    /// Show some edges in mm or m (level 3 only)
    #[serde(default)]
    pub mixed_units: bool,
    /// Edges to withhold for the learner to derive (levels 2 and 3 only)
    #[serde(default)]
    pub hidden_edges: u8,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            level: default_level(),
            filter: ShapeFilter::Any,
            mixed_units: false,
            hidden_edges: 0,
        }
    }
}

impl GenerateOptions {
    pub fn new(level: Level) -> Self {
        Self { level, ..Self::default() }
    }

    pub fn with_filter(mut self, filter: ShapeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mixed_units(mut self, mixed_units: bool) -> Self {
        self.mixed_units = mixed_units;
        self
    }

    pub fn with_hidden_edges(mut self, hidden_edges: u8) -> Self {
        self.hidden_edges = hidden_edges;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.hidden_edges > 2 {
            return Err(InputError::InvalidHiddenCount(self.hidden_edges));
        }
        Ok(())
    }

    /// Hidden edges actually requested at this level.
    pub fn effective_hidden(&self) -> usize {
        if self.level >= Level::Two {
            self.hidden_edges.min(2) as usize
        } else {
            0
        }
    }

    pub fn effective_mixed_units(&self) -> bool {
        self.mixed_units && self.level == Level::Three
    }
}
