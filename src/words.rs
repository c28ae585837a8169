// src/words.rs
//! Word domain and the normalizer gate.
//!
//! A [`Word`] can only be built through [`Word::parse`], so every member of a
//! [`WordSet`] has passed validation: exactly five ASCII lowercase letters.

use std::collections::BTreeSet;
use std::fmt;

pub const WORD_LEN: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(String);

impl Word {
    /// Trim, ASCII-lowercase, then admit iff the result is `[a-z]{5}`.
    pub fn parse(raw: &str) -> Option<Word> {
        let folded = raw.trim().to_ascii_lowercase();
        if folded.len() == WORD_LEN && folded.bytes().all(|b| b.is_ascii_lowercase()) {
            Some(Word(folded))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deduplicated, validated words. Iteration order is lexicographic.
pub type WordSet = BTreeSet<Word>;

/// Normalize raw tokens into a [`WordSet`]. Total: invalid tokens are dropped.
pub fn normalize<I, S>(raw_tokens: I) -> WordSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_tokens
        .into_iter()
        .filter_map(|t| Word::parse(t.as_ref()))
        .collect()
}

/// Plain-text word list: one token per line, blank lines ignored.
pub fn parse_word_list(text: &str) -> WordSet {
    normalize(text.lines().filter(|l| !l.trim().is_empty()))
}
