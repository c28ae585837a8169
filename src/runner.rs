// src/runner.rs
use std::path::PathBuf;

use crate::{
    artifacts::{self, Counts, MIRRORED},
    config::options::RunOptions,
    core::net::Fetch,
    error::PipelineError,
    file,
    progress::Progress,
    reconcile::{Strategy, restrict_to_allowed},
    scrape,
};

/// Summary of what was produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counts: Counts,
    pub strategy: Strategy,
    /// Used-answers sources that made it into reconciliation.
    pub sources_used: Vec<String>,
    pub sources_failed: usize,
    pub files_written: Vec<PathBuf>,
    pub files_mirrored: Vec<PathBuf>,
    /// `(artifact name, sha256:<hex>)` in write order.
    pub digests: Vec<(&'static str, String)>,
}

/// Top-level pipeline: acquire → extract → reconcile → cross-filter → publish.
/// Every fatal condition surfaces before the first artifact is replaced.
pub fn run(
    opts: &RunOptions,
    fetcher: &dyn Fetch,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, PipelineError> {
    let date = opts.generation_date();

    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching allowed list…");
    }
    let allowed = scrape::fetch_allowed(&opts.sources.allowed_urls, fetcher)?;

    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching used answers…");
    }
    let harvest = scrape::harvest_used(&opts.sources.used, fetcher, progress);
    let reconciled = harvest.reconcile(opts.min_confidence)?;

    let used = restrict_to_allowed(&reconciled.words, &allowed);
    let rejected = reconciled.words.len() - used.len();
    if rejected > 0 {
        logw!("Cross-filter: dropped {rejected} used word(s) missing from the allowed list");
    }

    let artifacts = artifacts::build_artifacts(&allowed, &used, date)?;

    // Both directories are fully staged before either sees a rename.
    let data = file::stage_all(&opts.output.data_dir, artifacts.iter())?;
    let mirror = match &opts.output.public_dir {
        Some(dir) => match file::stage_all(dir, artifacts.iter().filter(|a| MIRRORED.contains(&a.name))) {
            Ok(staged) => Some(staged),
            Err(e) => {
                data.discard();
                return Err(e.into());
            }
        },
        None => None,
    };

    let files_written = data.commit()?;
    let files_mirrored = match mirror {
        Some(staged) => staged.commit()?,
        None => Vec::new(),
    };

    logf!("Published {} artifact(s) to {}", files_written.len(), opts.output.data_dir.display());

    Ok(RunSummary {
        counts: artifacts.counts,
        strategy: reconciled.strategy,
        sources_used: harvest.names,
        sources_failed: harvest.failures.len(),
        files_written,
        files_mirrored,
        digests: artifacts.iter().map(|a| (a.name, a.digest())).collect(),
    })
}
