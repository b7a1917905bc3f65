//! Edge lengths, display units, hidden edges, and the working that justifies a perimeter.

use std::fmt::{self, Display};

use derive_more::Display;
use itertools::Itertools;
use log::debug;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    catalogue::Catalogue,
    error::InputError,
    polygon::Polygon,
};

#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    #[display(fmt = "cm")]
    Cm,
    #[display(fmt = "mm")]
    Mm,
    #[display(fmt = "m")]
    M,
}

impl Unit {
    /// `cm` expressed in this unit: `"120 mm"`, `"0.12 m"`, `"12 cm"`.
    pub fn format(&self, cm: u32) -> String {
        match self {
            Unit::Cm => format!("{} cm", cm),
            Unit::Mm => format!("{} mm", cm * 10),
            Unit::M => {
                let (whole, frac) = (cm / 100, cm % 100);
                if frac == 0 {
                    format!("{} m", whole)
                } else {
                    let frac = format!("{:02}", frac);
                    format!("{}.{} m", whole, frac.trim_end_matches('0'))
                }
            }
        }
    }

    /// Exact inverse of [`Unit::format`]: parses `"<value> <unit>"` back to whole centimetres.
    pub fn parse_cm(text: &str) -> Result<u32, InputError> {
        let bad = || InputError::BadMeasurement(text.to_string());
        let (value, unit) = text.trim().split_whitespace().collect_tuple().ok_or_else(bad)?;
        match unit {
            "cm" => value.parse().map_err(|_| bad()),
            "mm" => {
                let mm: u32 = value.parse().map_err(|_| bad())?;
                if mm % 10 == 0 { Ok(mm / 10) } else { Err(bad()) }
            }
            "m" => {
                let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
                if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(bad());
                }
                let whole: u32 = whole.parse().map_err(|_| bad())?;
                let frac: u32 = format!("{:0<2}", frac).parse().map_err(|_| bad())?;
                Ok(whole * 100 + frac)
            }
            _ => Err(bad()),
        }
    }

    /// How a value in this unit converts to centimetres, e.g. `"÷10"`.
    pub fn to_cm_factor(&self) -> &'static str {
        match self {
            Unit::Cm => "×1",
            Unit::Mm => "÷10",
            Unit::M => "×100",
        }
    }
}

/// One side of a question's outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub length_cm: u32,
    pub unit: Unit,
    /// What the diagram shows: the measurement, or `"?"` when hidden
    pub text: String,
    pub hidden: bool,
    /// Index into the question's symmetry groups
    pub group: usize,
}

impl Edge {
    pub fn new(length_cm: u32, unit: Unit, hidden: bool, group: usize) -> Self {
        let text = if hidden { "?".to_string() } else { unit.format(length_cm) };
        Edge { length_cm, unit, text, hidden, group }
    }

    /// The measurement, even when hidden.
    pub fn value_text(&self) -> String {
        self.unit.format(self.length_cm)
    }
}

/// `count` edges of `cm` each.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct Term {
    pub count: usize,
    pub cm: u32,
}

/// One line of working. The final step of every question is a [`WorkingStep::Sum`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WorkingStep {
    /// A label shown in mm or m, restated in cm
    Convert { edge: usize, shown: String, unit: Unit, cm: u32 },
    /// A hidden edge equal to a visible edge of its symmetry group
    Equal { edge: usize, source: usize, cm: u32 },
    /// A hidden rectilinear edge: sum of the opposite-facing edges minus the other edges
    /// facing its way
    Derive { edge: usize, added: Vec<u32>, subtracted: Vec<u32>, cm: u32 },
    Sum { terms: Vec<Term>, total: u32 },
}

impl WorkingStep {
    /// Length this step establishes (the perimeter, for [`WorkingStep::Sum`]).
    pub fn cm(&self) -> u32 {
        match self {
            WorkingStep::Convert { cm, .. } | WorkingStep::Equal { cm, .. } | WorkingStep::Derive { cm, .. } => *cm,
            WorkingStep::Sum { total, .. } => *total,
        }
    }
}

impl Display for WorkingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkingStep::Convert { shown, unit, cm, .. } => {
                write!(f, "{} = {} cm ({})", shown, cm, unit.to_cm_factor())
            }
            WorkingStep::Equal { edge, source, cm } => {
                write!(f, "Side {} = side {} = {} cm (equal sides)", edge + 1, source + 1, cm)
            }
            WorkingStep::Derive { edge, added, subtracted, cm } => {
                write!(f, "Side {} = {}", edge + 1, added.iter().join(" + "))?;
                for s in subtracted {
                    write!(f, " − {}", s)?;
                }
                if added.len() + subtracted.len() > 1 {
                    write!(f, " = {}", cm)?;
                }
                write!(f, " cm")
            }
            WorkingStep::Sum { terms, total } => {
                let terms = terms
                    .iter()
                    .map(|t| if t.count > 1 { format!("{} × {}", t.count, t.cm) } else { t.cm.to_string() })
                    .join(" + ");
                write!(f, "Perimeter = {} = {} cm", terms, total)
            }
        }
    }
}

/// Per-edge base lengths from one length per symmetry group.
pub fn assign(groups: &[Vec<usize>], group_lengths: &[u32]) -> Vec<u32> {
    assert_eq!(groups.len(), group_lengths.len(), "one length per symmetry group");
    let n = groups.iter().map(|g| g.len()).sum();
    let mut lengths = vec![0; n];
    for (group, &len) in groups.iter().zip(group_lengths) {
        for &edge in group {
            lengths[edge] = len;
        }
    }
    lengths
}

/// Sum of every edge, one term per symmetry group.
pub fn summation(groups: &[Vec<usize>], lengths: &[u32]) -> WorkingStep {
    let terms: Vec<Term> = groups
        .iter()
        .map(|g| Term { count: g.len(), cm: lengths[g[0]] })
        .collect();
    let total = terms.iter().map(|t| t.count as u32 * t.cm).sum();
    WorkingStep::Sum { terms, total }
}

pub fn conversion(edge: usize, unit: Unit, cm: u32) -> WorkingStep {
    WorkingStep::Convert { edge, shown: unit.format(cm), unit, cm }
}

/// Recover hidden rectilinear edge `idx` from the visible edges along the same axis.
///
/// Walking the outline, the edges travelling right sum to the edges travelling left (and up
/// to down). So the hidden edge is the opposite-facing total minus the other edges facing
/// its way. Requires every other edge on that axis to be visible.
pub fn derive_rectilinear(raw: &Polygon, lengths: &[u32], hidden: &[bool], idx: usize) -> Option<WorkingStep> {
    let orientations = raw.orientations()?;
    let facing = orientations[idx];
    let mut added = Vec::new();
    let mut subtracted = Vec::new();
    for (i, o) in orientations.iter().enumerate() {
        if i == idx {
            continue;
        }
        if *o == facing.opposite() {
            if hidden[i] {
                return None;
            }
            added.push(lengths[i]);
        } else if *o == facing {
            if hidden[i] {
                return None;
            }
            subtracted.push(lengths[i]);
        }
    }
    let cm = added.iter().map(|&v| v as i64).sum::<i64>() - subtracted.iter().map(|&v| v as i64).sum::<i64>();
    if cm <= 0 || added.is_empty() {
        return None;
    }
    Some(WorkingStep::Derive { edge: idx, added, subtracted, cm: cm as u32 })
}

/// Recover hidden edge `idx` from a visible edge of its symmetry group.
pub fn derive_from_group(groups: &[Vec<usize>], lengths: &[u32], hidden: &[bool], idx: usize) -> Option<WorkingStep> {
    let group = groups.iter().find(|g| g.contains(&idx))?;
    let source = *group.iter().find(|&&e| e != idx && !hidden[e])?;
    Some(WorkingStep::Equal { edge: idx, source, cm: lengths[source] })
}

/// How the learner gets hidden edge `idx` back, given the catalogue's derivation rule.
pub fn derive_hidden(
    catalogue: Catalogue,
    raw: &Polygon,
    groups: &[Vec<usize>],
    lengths: &[u32],
    hidden: &[bool],
    idx: usize,
) -> Option<WorkingStep> {
    match catalogue {
        Catalogue::Polygon => derive_from_group(groups, lengths, hidden, idx),
        Catalogue::Rectilinear => derive_rectilinear(raw, lengths, hidden, idx),
    }
}

/// Pick up to `count` edges (among `labelled`) to hide, keeping every hidden edge derivable.
/// Returns fewer when the shape doesn't allow `count`.
pub fn choose_hidden<R: Rng + ?Sized>(
    catalogue: Catalogue,
    raw: &Polygon,
    groups: &[Vec<usize>],
    lengths: &[u32],
    labelled: &[usize],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut hidden = vec![false; lengths.len()];
    let mut chosen = Vec::new();
    while chosen.len() < count {
        let candidates: Vec<usize> = labelled
            .iter()
            .copied()
            .filter(|&e| !hidden[e])
            .filter(|&e| {
                let mut trial = hidden.clone();
                trial[e] = true;
                chosen
                    .iter()
                    .chain([e].iter())
                    .all(|&h| derive_hidden(catalogue, raw, groups, lengths, &trial, h).is_some())
            })
            .collect();
        let Some(&edge) = candidates.choose(rng) else {
            debug!("only {} of {} requested edges can be hidden", chosen.len(), count);
            break;
        };
        hidden[edge] = true;
        chosen.push(edge);
    }
    chosen.sort_unstable();
    chosen
}
