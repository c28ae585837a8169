// src/artifacts.rs
//! Derived views and their byte-stable serialization.
//!
//! Everything here is pure: [`build_artifacts`] turns two word sets and a date
//! into named byte blobs. Writing them out is `file::publish`'s job.
//!
//! Byte stability: JSON keys are emitted in struct order, word arrays come out
//! of `BTreeSet` iteration (ascending), and pretty-printing is fixed at two-space
//! indentation with no trailing newline. Same input, same bytes, same digest.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::csv;
use crate::error::ArtifactError;
use crate::words::{Word, WordSet};

pub const ALLOWED_JSON: &str = "allowed.json";
pub const USED_JSON: &str = "used.json";
pub const ALLOWED_NOT_USED_JSON: &str = "allowed_not_used.json";
pub const WORDS_CSV: &str = "words.csv";
pub const CHECKSUMS_TXT: &str = "checksums.txt";

/// Artifacts mirrored byte-for-byte to the public directory.
pub const MIRRORED: [&str; 3] = [ALLOWED_JSON, USED_JSON, ALLOWED_NOT_USED_JSON];

pub const CSV_HEADER: [&str; 3] = ["word", "is_used", "generated"];

/// On-disk shape of the three JSON artifacts. Field order is the key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub generated: String,
    pub count: usize,
    pub words: Vec<String>,
}

impl WordList {
    fn new<'a>(generated: &str, words: impl Iterator<Item = &'a Word>) -> Self {
        let words: Vec<String> = words.map(|w| s!(w.as_str())).collect();
        Self { generated: s!(generated), count: words.len(), words }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Content digest of the final bytes, `sha256:<hex>`.
    pub fn digest(&self) -> String {
        sha256_digest(&self.bytes)
    }
}

pub fn sha256_digest(bytes: &[u8]) -> String {
    format!("sha256:{:x}", Sha256::digest(bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub allowed: usize,
    pub used: usize,
    pub diff: usize,
}

impl std::fmt::Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "allowed={} used={} diff={}", self.allowed, self.used, self.diff)
    }
}

#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Write order; the checksum manifest is always last.
    pub entries: Vec<Artifact>,
    pub counts: Counts,
}

impl Artifacts {
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.entries.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.entries.iter()
    }
}

pub fn build_artifacts(
    allowed: &WordSet,
    used: &WordSet,
    generation_date: NaiveDate,
) -> Result<Artifacts, ArtifactError> {
    let date = generation_date.format("%Y-%m-%d").to_string();
    let not_used: WordSet = allowed.difference(used).cloned().collect();

    let mut entries = vec![
        json_artifact(ALLOWED_JSON, &WordList::new(&date, allowed.iter()))?,
        json_artifact(USED_JSON, &WordList::new(&date, used.iter()))?,
        json_artifact(ALLOWED_NOT_USED_JSON, &WordList::new(&date, not_used.iter()))?,
        Artifact { name: WORDS_CSV, bytes: words_table(allowed, used, &date) },
    ];
    entries.push(checksum_manifest(&entries));

    Ok(Artifacts {
        entries,
        counts: Counts { allowed: allowed.len(), used: used.len(), diff: not_used.len() },
    })
}

fn json_artifact(name: &'static str, list: &WordList) -> Result<Artifact, ArtifactError> {
    let bytes = serde_json::to_vec_pretty(list)
        .map_err(|source| ArtifactError::Serialize { name, source })?;
    Ok(Artifact { name, bytes })
}

/// `allowed ∪ used`, one row per word, ascending.
fn words_table(allowed: &WordSet, used: &WordSet, date: &str) -> Vec<u8> {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = csv::write_row(&mut buf, &CSV_HEADER);
    for word in allowed.union(used) {
        let flag = if used.contains(word) { "true" } else { "false" };
        let _ = csv::write_row(&mut buf, &[word.as_str(), flag, date]);
    }
    buf
}

/// `sha256:<hex>  <name>` per artifact, in write order.
fn checksum_manifest(entries: &[Artifact]) -> Artifact {
    let mut text = s!();
    for a in entries {
        let _ = writeln!(text, "{}  {}", a.digest(), a.name);
    }
    Artifact { name: CHECKSUMS_TXT, bytes: text.into_bytes() }
}
