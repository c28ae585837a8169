// src/specs/extract.rs

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::SourceProfile;
use crate::core::html::element_texts;
use crate::words::{self, WordSet};

/// Raw, unvalidated tokens from one page.
pub type CandidateSet = HashSet<String>;

// Structural text is lowercased before matching; the fallback sees raw markup.
static LOWER5: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-z]{5}\b").unwrap());
static ALPHA5: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{5}\b").unwrap());

/// Structural pass, then the whole-document fallback if it came up empty.
pub fn extract(doc: &str, profile: &SourceProfile) -> CandidateSet {
    let candidates = structural_pass(doc, profile.selectors);
    if !candidates.is_empty() {
        return candidates;
    }
    logw!("{}: structural pass found nothing, scanning raw text", profile.name);
    fallback_pass(doc)
}

/// [`extract`] gated through the normalizer.
pub fn extract_words(doc: &str, profile: &SourceProfile) -> WordSet {
    words::normalize(extract(doc, profile))
}

pub fn structural_pass(doc: &str, selectors: &[&str]) -> CandidateSet {
    let mut out = CandidateSet::new();
    for text in element_texts(doc, selectors) {
        let text = text.to_lowercase();
        out.extend(LOWER5.find_iter(&text).map(|m| s!(m.as_str())));
    }
    out
}

pub fn fallback_pass(doc: &str) -> CandidateSet {
    ALPHA5
        .find_iter(doc)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}
