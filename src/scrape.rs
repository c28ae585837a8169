// src/scrape.rs
//! Source acquisition.
//!
//! - Allowed vocabulary: candidate URLs in order, first success wins.
//! - Used answers: every source attempted, each failure isolated and recorded.

use crate::{
    config::options::UsedSource,
    core::net::Fetch,
    error::{PipelineError, SourceFetchError, UsedSourceError},
    progress::Progress,
    reconcile::{self, Reconciliation},
    specs,
    words::{self, WordSet},
};

pub fn fetch_allowed(urls: &[String], fetcher: &dyn Fetch) -> Result<WordSet, PipelineError> {
    let mut last: Option<SourceFetchError> = None;

    for url in urls {
        match fetch_allowed_one(url, fetcher) {
            Ok(set) => {
                logf!("Allowed: {} words from {url}", set.len());
                return Ok(set);
            }
            Err(e) => {
                logw!("Allowed: {e}; trying next source");
                last = Some(e);
            }
        }
    }

    Err(PipelineError::AllowedUnavailable {
        attempts: urls.len(),
        last: last.map_or_else(|| s!("no allowed-list URLs configured"), |e| e.to_string()),
    })
}

fn fetch_allowed_one(url: &str, fetcher: &dyn Fetch) -> Result<WordSet, SourceFetchError> {
    let text = fetcher.get(url)?;
    let set = words::parse_word_list(&text);
    if set.is_empty() {
        return Err(SourceFetchError::Empty { url: s!(url) });
    }
    Ok(set)
}

/// Fetch + extract + normalize one used-answers page.
pub fn fetch_used_one(source: &UsedSource, fetcher: &dyn Fetch) -> Result<WordSet, UsedSourceError> {
    let html = fetcher
        .get(&source.url)
        .map_err(|e| UsedSourceError::Fetch { name: source.name.clone(), source: e })?;

    let set = specs::extract_words(&html, specs::profile_for(&source.name));
    if set.is_empty() {
        return Err(UsedSourceError::Empty { name: source.name.clone(), url: source.url.clone() });
    }
    Ok(set)
}

/// Successes and recorded failures of one used-answers sweep.
#[derive(Debug, Default)]
pub struct UsedHarvest {
    pub names: Vec<String>,
    pub sets: Vec<WordSet>,
    pub failures: Vec<UsedSourceError>,
}

impl UsedHarvest {
    pub fn push(&mut self, name: &str, result: Result<WordSet, UsedSourceError>) {
        match result {
            Ok(set) => {
                self.names.push(s!(name));
                self.sets.push(set);
            }
            Err(e) => self.failures.push(e),
        }
    }

    /// Reconcile the successful sources. Fatal only when every source failed.
    pub fn reconcile(&self, min_confidence: usize) -> Result<Reconciliation, PipelineError> {
        if self.sets.is_empty() && !self.failures.is_empty() {
            return Err(PipelineError::UsedUnavailable {
                failures: self.failures.iter().map(|e| e.to_string()).collect(),
            });
        }
        Ok(reconcile::reconcile(&self.sets, min_confidence)?)
    }
}

pub fn harvest_used(
    sources: &[UsedSource],
    fetcher: &dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> UsedHarvest {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(sources.len());
    }

    let mut harvest = UsedHarvest::default();
    for source in sources {
        let result = fetch_used_one(source, fetcher);

        match &result {
            Ok(set) => {
                logd!("Used: {} -> {} words", source.name, set.len());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&source.name, set.len());
                }
            }
            Err(e) => {
                logw!("Used: dropping source: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&source.name, &e.to_string());
                }
            }
        }
        harvest.push(&source.name, result);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    harvest
}
