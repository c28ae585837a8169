// src/reconcile.rs
//! Cross-source reconciliation and the allowed-list cross-filter.
//!
//! Independent "used answers" scrapes disagree: different coverage, different
//! noise. When they substantially agree we keep only what they agree on; when
//! the overlap is tiny we assume at least one scrape broke and keep everything.

use std::fmt;

use crate::error::ReconciliationError;
use crate::words::WordSet;

/// Which branch produced a [`Reconciliation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exactly one source; passed through.
    Single,
    /// High agreement: intersection reached the threshold.
    Intersection,
    /// Low agreement: degraded to the union for recall.
    Union,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Single => "single",
            Strategy::Intersection => "intersection",
            Strategy::Union => "union",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub words: WordSet,
    pub strategy: Strategy,
    /// Size of the all-source intersection (the whole set for `Single`).
    pub overlap: usize,
}

pub fn reconcile(sets: &[WordSet], min_confidence: usize) -> Result<Reconciliation, ReconciliationError> {
    let (first, rest) = sets.split_first().ok_or(ReconciliationError::NoSources)?;

    if rest.is_empty() {
        return Ok(Reconciliation {
            words: first.clone(),
            strategy: Strategy::Single,
            overlap: first.len(),
        });
    }

    let intersection: WordSet = first
        .iter()
        .filter(|w| rest.iter().all(|s| s.contains(*w)))
        .cloned()
        .collect();
    let overlap = intersection.len();

    if overlap >= min_confidence {
        logf!("Reconcile: {} sources agree on {overlap} words (>= {min_confidence}), using intersection", sets.len());
        return Ok(Reconciliation { words: intersection, strategy: Strategy::Intersection, overlap });
    }

    let union: WordSet = sets.iter().flatten().cloned().collect();
    logw!(
        "Reconcile: intersection too small ({overlap} < {min_confidence}), using union of {} words",
        union.len()
    );
    Ok(Reconciliation { words: union, strategy: Strategy::Union, overlap })
}

/// `used ∩ allowed`: an answer that is not a valid guess is a parse error.
pub fn restrict_to_allowed(used: &WordSet, allowed: &WordSet) -> WordSet {
    used.intersection(allowed).cloned().collect()
}
