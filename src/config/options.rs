// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use super::consts::*;

/// A named "used answers" endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsedSource {
    pub name: String,
    pub url: String,
}

impl UsedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// Everything one run needs. Nothing in the pipeline reads process-wide state;
/// the CLI builds this and hands it to `runner::run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub sources: SourceOptions,
    pub output: OutputOptions,
    /// Intersection must reach this size to be trusted over the union.
    pub min_confidence: usize,
    /// Stamped into every artifact; `None` means today (local time).
    pub date: Option<NaiveDate>,
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sources: SourceOptions::default(),
            output: OutputOptions::default(),
            min_confidence: MIN_CONFIDENCE,
            date: None,
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }
}

impl RunOptions {
    pub fn generation_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    /// Tried in order; first success wins.
    pub allowed_urls: Vec<String>,
    /// All attempted; each may fail on its own.
    pub used: Vec<UsedSource>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            allowed_urls: ALLOWED_URLS.iter().map(|u| s!(*u)).collect(),
            used: USED_SOURCES.iter().map(|(n, u)| UsedSource::new(*n, *u)).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub data_dir: PathBuf,
    /// Mirror target for the JSON artifacts; `None` disables mirroring.
    pub public_dir: Option<PathBuf>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            public_dir: Some(PathBuf::from(DEFAULT_PUBLIC_DIR)),
        }
    }
}
