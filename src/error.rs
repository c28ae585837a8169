// src/error.rs
//! Error taxonomy for one pipeline run.
//!
//! Per-source errors (`SourceFetchError`, `UsedSourceError`) are recovered where
//! they happen. Everything reaching `PipelineError` is fatal and aborts the run
//! before any artifact is replaced.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Transport-level failure from a [`crate::core::net::Fetch`] implementation.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

/// One allowed-vocabulary URL attempt failed; the next candidate is tried.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{url} yielded no valid words")]
    Empty { url: String },
}

/// One used-answers source failed; it is dropped from reconciliation.
#[derive(Debug, Error)]
pub enum UsedSourceError {
    #[error("{name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: FetchError,
    },
    #[error("{name}: no words extracted from {url}")]
    Empty { name: String, url: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconciliationError {
    #[error("no sources available")]
    NoSources,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fatal conditions for a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch allowed list from any of {attempts} source(s); last error: {last}")]
    AllowedUnavailable {
        attempts: usize,
        last: String,
    },
    #[error("no used-answers sources could be parsed ({})", .failures.join("; "))]
    UsedUnavailable { failures: Vec<String> },
    #[error(transparent)]
    Reconciliation(#[from] ReconciliationError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl PipelineError {
    /// Both acquisition variants are the FatalAcquisition class.
    pub fn is_fatal_acquisition(&self) -> bool {
        matches!(self, Self::AllowedUnavailable { .. } | Self::UsedUnavailable { .. })
    }
}
