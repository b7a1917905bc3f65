use std::collections::{BTreeMap, HashSet};

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{catalogue::Family, question::Question};

use super::{eligible, generate_with, GenerateOptions, Level};

/// Questions per family before the batch prefers other families.
pub const DEFAULT_FAMILY_CAP: usize = 2;
/// Regenerations allowed for a question whose configuration is already in the batch.
pub const MAX_UNIQUE_ATTEMPTS: usize = 50;

/// Running state of one worksheet: configurations used so far and per-family counts.
#[derive(Debug, Clone)]
pub struct BatchState {
    used: HashSet<String>,
    counts: BTreeMap<Family, usize>,
    step: usize,
    cap: usize,
}

impl BatchState {
    pub fn new(family_cap: usize) -> Self {
        let step = family_cap.max(1);
        BatchState { used: HashSet::new(), counts: BTreeMap::new(), step, cap: step }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn count(&self, family: Family) -> usize {
        self.counts.get(&family).copied().unwrap_or(0)
    }

    /// Start counting families afresh (configurations stay used).
    pub fn reset_families(&mut self) {
        self.counts.clear();
        self.cap = self.step;
    }

    /// A family still under the cap, drawn uniformly. Raises the cap when every family
    /// available to `options` has reached it.
    fn pick_family<R: Rng + ?Sized>(&mut self, options: &GenerateOptions, rng: &mut R) -> Family {
        let mut families: Vec<Family> = eligible(options.level, options.filter, None)
            .iter()
            .map(|d| d.family)
            .collect();
        families.sort_unstable();
        families.dedup();
        loop {
            let open: Vec<Family> = families.iter().copied().filter(|&f| self.count(f) < self.cap).collect();
            if let Some(&family) = open.choose(rng) {
                return family;
            }
            self.cap += self.step;
            debug!("every family has {} questions; raising cap to {}", self.cap - self.step, self.cap);
        }
    }

    /// One more question for the batch, distinct from those already in it when possible.
    pub fn next<R: Rng + ?Sized>(&mut self, options: &GenerateOptions, rng: &mut R) -> Question {
        let family = self.pick_family(options, rng);
        let mut question = generate_with(options, Some(family), rng);
        for attempt in 1..MAX_UNIQUE_ATTEMPTS {
            if !self.used.contains(&question.config_key()) {
                break;
            }
            debug!("duplicate {} (attempt {})", question.config_key(), attempt);
            question = generate_with(options, Some(family), rng);
        }
        if !self.used.insert(question.config_key()) {
            debug!("accepting duplicate {} after {} attempts", question.config_key(), MAX_UNIQUE_ATTEMPTS);
        }
        *self.counts.entry(question.family).or_default() += 1;
        question
    }
}

impl Default for BatchState {
    fn default() -> Self {
        BatchState::new(DEFAULT_FAMILY_CAP)
    }
}

/// `count` questions at one level, spread across families.
pub fn generate_batch<R: Rng + ?Sized>(options: &GenerateOptions, count: usize, rng: &mut R) -> Vec<Question> {
    generate_batch_capped(options, count, DEFAULT_FAMILY_CAP, rng)
}

pub fn generate_batch_capped<R: Rng + ?Sized>(
    options: &GenerateOptions,
    count: usize,
    family_cap: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut state = BatchState::new(family_cap);
    (0..count).map(|_| state.next(options, rng)).collect()
}

/// A worksheet mixing levels: `counts` questions per level, in ascending level order.
/// Family counts restart at each level; used configurations carry across the whole sheet.
pub fn generate_differentiated<R: Rng + ?Sized>(
    options: &GenerateOptions,
    counts: &[(Level, usize)],
    rng: &mut R,
) -> Vec<Question> {
    let mut counts = counts.to_vec();
    counts.sort_by_key(|&(level, _)| level);
    let mut state = BatchState::default();
    let mut questions = Vec::new();
    for (level, count) in counts {
        state.reset_families();
        let options = GenerateOptions { level, ..options.clone() };
        questions.extend((0..count).map(|_| state.next(&options, rng)));
    }
    questions
}
