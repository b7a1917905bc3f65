//! Random perimeter questions.
//!
//! Everything here is a pure function of its options and the caller's [`Rng`]: a seeded
//! `StdRng` reproduces the same questions.

mod batch;
mod options;
pub mod sample;

pub use batch::*;
pub use options::*;

use itertools::Itertools;
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    catalogue::{self, Family, ShapeDefinition},
    measurement::{self, Edge, Unit, WorkingStep},
    question::Question,
};

/// Chance that a labelled, visible edge is shown in mm or m, when mixing units.
pub const CONVERTED_FRACTION: f64 = 1. / 3.;

/// Definitions a question at `level` may draw from. An empty result under `hint` or `filter`
/// relaxes the hint first, then the filter.
pub fn eligible(level: Level, filter: ShapeFilter, hint: Option<Family>) -> Vec<&'static ShapeDefinition> {
    let matching = |filter: ShapeFilter, hint: Option<Family>| -> Vec<&'static ShapeDefinition> {
        catalogue::all()
            .filter(|d| d.tier <= level)
            .filter(|d| filter.admits(d.catalogue))
            .filter(|d| hint.map_or(true, |f| d.family == f))
            .collect()
    };
    let defs = matching(filter, hint);
    if !defs.is_empty() {
        return defs;
    }
    if let Some(family) = hint {
        debug!("no {} shapes at level {} with filter {:?}; dropping family hint", family, level, filter);
        let defs = matching(filter, None);
        if !defs.is_empty() {
            return defs;
        }
    }
    debug!("no shapes at level {} with filter {:?}; dropping filter", level, filter);
    let defs = matching(ShapeFilter::Any, None);
    assert!(!defs.is_empty(), "catalogue has no shapes at level {}", level);
    defs
}

/// One question at `options.level`.
pub fn generate<R: Rng + ?Sized>(options: &GenerateOptions, rng: &mut R) -> Question {
    generate_with(options, None, rng)
}

/// One question, restricted to `hint`'s family when the catalogue allows it.
pub fn generate_with<R: Rng + ?Sized>(options: &GenerateOptions, hint: Option<Family>, rng: &mut R) -> Question {
    let defs = eligible(options.level, options.filter, hint);
    let def = *defs.choose(rng).expect("eligible() never returns an empty list");
    let params = sample::params(def.kind, rng);
    build_question(def, &params, options, rng)
}

/// Assemble a question from drawn parameters: lengths, labels, hidden edges, units, working.
pub fn build_question<R: Rng + ?Sized>(
    def: &'static ShapeDefinition,
    params: &[u32],
    options: &GenerateOptions,
    rng: &mut R,
) -> Question {
    let raw = def.kind.build(def.sides, params);
    let groups = def.groups_vec();
    let lengths = measurement::assign(&groups, &def.kind.group_lengths(params));
    debug_assert!(
        lengths.iter().enumerate().all(|(i, &l)| (raw.edge_length(i) - l as f64).abs() < 1e-6),
        "{}: outline disagrees with group lengths {:?}",
        def.name,
        lengths,
    );

    let labelled: Vec<usize> = if options.level == Level::One {
        groups.iter().map(|g| g[0]).sorted().collect()
    } else {
        (0..def.sides).collect()
    };

    let hidden_edges = match options.effective_hidden() {
        0 => vec![],
        count => measurement::choose_hidden(def.catalogue, &raw, &groups, &lengths, &labelled, count, rng),
    };
    let mut hidden = vec![false; def.sides];
    for &h in &hidden_edges {
        hidden[h] = true;
    }

    let mut units = vec![Unit::Cm; def.sides];
    if options.effective_mixed_units() {
        for &edge in labelled.iter().filter(|&&e| !hidden[e]) {
            if rng.gen_bool(CONVERTED_FRACTION) {
                units[edge] = if rng.gen_bool(0.5) { Unit::Mm } else { Unit::M };
            }
        }
    }

    let edges: Vec<Edge> = (0..def.sides)
        .map(|i| Edge::new(lengths[i], units[i], hidden[i], def.group_of(i)))
        .collect();

    let mut steps: Vec<WorkingStep> = edges
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.hidden && e.unit != Unit::Cm)
        .map(|(i, e)| measurement::conversion(i, e.unit, e.length_cm))
        .collect();
    for &h in &hidden_edges {
        let step = measurement::derive_hidden(def.catalogue, &raw, &groups, &lengths, &hidden, h)
            .unwrap_or_else(|| panic!("{}: hidden edge {} chosen without a derivation", def.name, h));
        steps.push(step);
    }
    let sum = measurement::summation(&groups, &lengths);
    let perimeter_cm = sum.cm();
    steps.push(sum);

    Question {
        shape: def.name.to_string(),
        family: def.family,
        catalogue: def.catalogue,
        level: options.level,
        groups,
        raw,
        edges,
        labelled,
        perimeter_cm,
        answer: format!("{} cm", perimeter_cm),
        steps,
    }
}
