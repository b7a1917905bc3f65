use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    catalogue::{self, Catalogue, Family, ShapeDefinition},
    generator::Level,
    labels::{LabelMeta, LabelState},
    measurement::{Edge, Unit, WorkingStep},
    polygon::Polygon,
};

/// One generated perimeter question. Immutable once returned by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub shape: String,
    pub family: Family,
    pub catalogue: Catalogue,
    #[tsify(type = "1 | 2 | 3")]
    pub level: Level,
    /// Symmetry groups: edges in one group share a length
    pub groups: Vec<Vec<usize>>,
    /// Outline in centimetres
    pub raw: Polygon,
    pub edges: Vec<Edge>,
    /// Edges that carry a label on the diagram, ascending
    pub labelled: Vec<usize>,
    pub perimeter_cm: u32,
    pub answer: String,
    pub steps: Vec<WorkingStep>,
}

impl Question {
    pub fn definition(&self) -> Option<&'static ShapeDefinition> {
        catalogue::by_name(&self.shape).ok()
    }

    pub fn hidden(&self) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn lengths(&self) -> Vec<u32> {
        self.edges.iter().map(|e| e.length_cm).collect()
    }

    /// Identifies questions a learner would see as the same: shape, lengths, which edges are
    /// hidden, and which units are shown.
    pub fn config_key(&self) -> String {
        let edges = self
            .edges
            .iter()
            .map(|e| if e.hidden { format!("{}cm?", e.length_cm) } else { e.text.clone() })
            .join(",");
        format!("{}[{}]", self.shape, edges)
    }

    /// Tick-mark group per edge: `Some(k)` draws `k` ticks, shared by every edge in the k-th
    /// symmetry group with more than one edge.
    pub fn ticks(&self) -> Vec<Option<usize>> {
        let mut ticks = vec![None; self.edges.len()];
        for (k, group) in self.groups.iter().filter(|g| g.len() > 1).enumerate() {
            for &edge in group {
                ticks[edge] = Some(k + 1);
            }
        }
        ticks
    }

    /// What each labelled edge shows; `reveal` fills in hidden edges (answer pass).
    pub fn label_meta(&self, reveal: bool) -> Vec<LabelMeta> {
        self.labelled
            .iter()
            .map(|&edge| {
                let e = &self.edges[edge];
                let (text, state) = match (e.hidden, reveal) {
                    (true, false) => (e.text.clone(), LabelState::Hidden),
                    (true, true) => (e.value_text(), LabelState::Revealed),
                    (false, _) if e.unit != Unit::Cm => (e.text.clone(), LabelState::Converted),
                    (false, _) => (e.text.clone(), LabelState::Given),
                };
                LabelMeta { edge, text, state }
            })
            .collect()
    }

    /// Lines of working, in order.
    pub fn working(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::generator::{build_question, GenerateOptions};
    use test_log::test;

    #[test]
    fn config_key_shows_displayed_values() {
        let def = catalogue::by_name("rectangle").unwrap();
        let options = GenerateOptions::new(Level::Two).with_hidden_edges(1);
        let mut q = build_question(def, &[9, 11], &options, &mut StdRng::seed_from_u64(0));
        let h = q.hidden()[0];
        let shown = (h + 1) % 4;
        q.edges[shown] = Edge::new(q.edges[shown].length_cm, Unit::Mm, false, q.edges[shown].group);
        let key = q.config_key();
        let parts: Vec<&str> = key.trim_start_matches("rectangle[").trim_end_matches(']').split(',').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[h], format!("{}cm?", q.edges[h].length_cm));
        assert_eq!(parts[shown], format!("{}0 mm", q.edges[shown].length_cm));
        assert!(!key.contains(&format!("{}mm", q.edges[shown].length_cm)));
        // The same lengths shown in cm are a different question
        let mut plain = q.clone();
        plain.edges[shown] = Edge::new(q.edges[shown].length_cm, Unit::Cm, false, q.edges[shown].group);
        assert_ne!(plain.config_key(), key);
    }
}
