// src/verify.rs
//! Consumer-side check of a published artifact directory.
//!
//! Reads the artifacts back from disk and re-checks every structural and
//! cross-dataset invariant a downstream reader relies on.

use std::{collections::BTreeSet, fs, io, path::{Path, PathBuf}};

use thiserror::Error;

use crate::artifacts::{
    ALLOWED_JSON, ALLOWED_NOT_USED_JSON, CHECKSUMS_TXT, CSV_HEADER, USED_JSON, WORDS_CSV, WordList, sha256_digest,
};
use crate::csv::Records;
use crate::words::Word;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{name}: malformed JSON: {source}")]
    Json {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name}: {problem}")]
    Invalid { name: &'static str, problem: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub generated: String,
    pub allowed: usize,
    pub used: usize,
    pub diff: usize,
    pub digests: Vec<(&'static str, String)>,
}

fn invalid(name: &'static str, problem: impl Into<String>) -> VerifyError {
    VerifyError::Invalid { name, problem: problem.into() }
}

fn read(dir: &Path, name: &str) -> Result<Vec<u8>, VerifyError> {
    let path = dir.join(name);
    fs::read(&path).map_err(|source| VerifyError::Read { path, source })
}

fn load_list(name: &'static str, bytes: &[u8]) -> Result<WordList, VerifyError> {
    let list: WordList = serde_json::from_slice(bytes).map_err(|source| VerifyError::Json { name, source })?;

    if list.count != list.words.len() {
        return Err(invalid(name, format!("count {} but {} words", list.count, list.words.len())));
    }
    if let Some(bad) = list.words.iter().find(|w| Word::parse(w).as_ref().map(Word::as_str) != Some(w.as_str())) {
        return Err(invalid(name, format!("invalid word {bad:?}")));
    }
    if let Some(pair) = list.words.windows(2).find(|p| p[0] >= p[1]) {
        return Err(invalid(name, format!("not strictly ascending at {:?}", pair[1])));
    }
    Ok(list)
}

pub fn verify_dir(dir: &Path) -> Result<VerifyReport, VerifyError> {
    let mut digests = Vec::new();
    let mut lists = Vec::new();

    for name in [ALLOWED_JSON, USED_JSON, ALLOWED_NOT_USED_JSON] {
        let bytes = read(dir, name)?;
        digests.push((name, sha256_digest(&bytes)));
        lists.push(load_list(name, &bytes)?);
    }
    let [allowed, used, not_used]: [WordList; 3] = lists
        .try_into()
        .map_err(|_| invalid(ALLOWED_JSON, "internal: expected three lists"))?;

    for (name, list) in [(USED_JSON, &used), (ALLOWED_NOT_USED_JSON, &not_used)] {
        if list.generated != allowed.generated {
            return Err(invalid(name, format!("generated {} differs from {}", list.generated, allowed.generated)));
        }
    }

    let allowed_set: BTreeSet<&str> = allowed.words.iter().map(String::as_str).collect();
    let used_set: BTreeSet<&str> = used.words.iter().map(String::as_str).collect();

    if let Some(w) = used_set.iter().find(|w| !allowed_set.contains(*w)) {
        return Err(invalid(USED_JSON, format!("{w:?} is not in {ALLOWED_JSON}")));
    }
    let expected_diff: Vec<&str> = allowed_set.difference(&used_set).copied().collect();
    if not_used.words.iter().map(String::as_str).ne(expected_diff.iter().copied()) {
        return Err(invalid(ALLOWED_NOT_USED_JSON, "does not equal allowed − used"));
    }

    let csv_bytes = read(dir, WORDS_CSV)?;
    digests.push((WORDS_CSV, sha256_digest(&csv_bytes)));
    verify_table(&String::from_utf8_lossy(&csv_bytes), &allowed_set, &used_set, &allowed.generated)?;
    verify_manifest(dir, &digests)?;

    Ok(VerifyReport {
        generated: allowed.generated,
        allowed: allowed.count,
        used: used.count,
        diff: not_used.count,
        digests,
    })
}

fn verify_table(
    text: &str,
    allowed: &BTreeSet<&str>,
    used: &BTreeSet<&str>,
    generated: &str,
) -> Result<(), VerifyError> {
    let mut rows = Records::new(text);

    match rows.next() {
        Some(h) if h == CSV_HEADER => {}
        other => return Err(invalid(WORDS_CSV, format!("bad header {other:?}"))),
    }

    let mut expected = allowed.union(used);
    for (i, row) in rows.enumerate() {
        let line = i + 2;
        let [word, is_used, date] = row.as_slice() else {
            return Err(invalid(WORDS_CSV, format!("line {line}: expected 3 fields")));
        };
        if expected.next() != Some(&word.as_str()) {
            return Err(invalid(WORDS_CSV, format!("line {line}: unexpected word {word:?}")));
        }
        let flag = if used.contains(word.as_str()) { "true" } else { "false" };
        if is_used != flag {
            return Err(invalid(WORDS_CSV, format!("line {line}: is_used {is_used} for {word}")));
        }
        if date != generated {
            return Err(invalid(WORDS_CSV, format!("line {line}: generated {date}")));
        }
    }
    if let Some(missing) = expected.next() {
        return Err(invalid(WORDS_CSV, format!("missing row for {missing:?}")));
    }
    Ok(())
}

/// Optional: a manifest from an older layout may be absent.
fn verify_manifest(dir: &Path, digests: &[(&'static str, String)]) -> Result<(), VerifyError> {
    let path = dir.join(CHECKSUMS_TXT);
    if !path.exists() {
        return Ok(());
    }
    let text = fs::read_to_string(&path).map_err(|source| VerifyError::Read { path, source })?;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let Some((listed, name)) = line.split_once("  ") else {
            return Err(invalid(CHECKSUMS_TXT, format!("malformed line {line:?}")));
        };
        match digests.iter().find(|(n, _)| *n == name) {
            Some((_, actual)) if actual == listed => {}
            Some(_) => return Err(invalid(CHECKSUMS_TXT, format!("digest mismatch for {name}"))),
            None => return Err(invalid(CHECKSUMS_TXT, format!("unknown artifact {name}"))),
        }
    }
    Ok(())
}
