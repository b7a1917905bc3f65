//! Measurement pills: sizing, candidate anchors, and the max-min placement search.

mod candidates;
mod placement;

pub use candidates::*;
pub use placement::*;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{polygon::Polygon, r2::R2};

/// Pill width per character, in font sizes.
pub const CHAR_WIDTH: f64 = 0.6;
/// Horizontal padding inside a pill (both sides together), in font sizes.
pub const PILL_PADDING: f64 = 1.0;
pub const PILL_HEIGHT: f64 = 1.6;
/// Distance from edge midpoint to pill centre, in font sizes, before crowding.
pub const STANDOFF: f64 = 1.2;
/// Midpoints closer than this (in the unit-normalised frame) crowd each other.
pub const CROWDING_RADIUS: f64 = 0.35;
/// Extra standoff per crowding neighbour, as a fraction of [`STANDOFF`].
pub const CROWDING_STEP: f64 = 0.15;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum LabelState {
    /// Measurement in cm
    Given,
    /// Measurement in mm or m
    Converted,
    /// `?`, for the learner to work out
    Hidden,
    /// Answer pass: a hidden edge's value
    Revealed,
}

/// What a labelled edge shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct LabelMeta {
    pub edge: usize,
    pub text: String,
    pub state: LabelState,
}

/// A label with its pill size and standoff, in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct LabelSpec {
    pub edge: usize,
    pub text: String,
    pub state: LabelState,
    pub width: f64,
    pub height: f64,
    pub standoff: f64,
}

impl LabelSpec {
    /// Margin a canvas must keep free so this pill fits whichever way it points.
    pub fn reach(&self) -> R2<f64> {
        R2::new(self.standoff + self.width / 2., self.standoff + self.height / 2.)
    }
}

pub fn pill_size(text: &str, font_size: f64) -> (f64, f64) {
    let chars = text.chars().count() as f64;
    (chars * CHAR_WIDTH * font_size + PILL_PADDING * font_size, PILL_HEIGHT * font_size)
}

/// Size every label and set its standoff from how many other labelled midpoints sit nearby.
/// `normalized` is the outline scaled so its longer side is 1.
pub fn specs(meta: &[LabelMeta], normalized: &Polygon, font_size: f64) -> Vec<LabelSpec> {
    let mids: Vec<R2<f64>> = meta.iter().map(|m| normalized.edge_midpoint(m.edge)).collect();
    meta.iter()
        .enumerate()
        .map(|(i, m)| {
            let crowding = mids
                .iter()
                .enumerate()
                .filter(|&(j, p)| j != i && p.distance(&mids[i]) < CROWDING_RADIUS)
                .count();
            let (width, height) = pill_size(&m.text, font_size);
            LabelSpec {
                edge: m.edge,
                text: m.text.clone(),
                state: m.state,
                width,
                height,
                standoff: STANDOFF * font_size * (1. + CROWDING_STEP * crowding as f64),
            }
        })
        .collect()
}
