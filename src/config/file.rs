// src/config/file.rs
//
// Optional TOML overlay on top of the built-in defaults. Every key is optional;
// whatever is present replaces the default wholesale.
//
//   allowed_urls = ["https://example.org/words"]
//   data_dir = "data"
//   public_dir = "public"
//   min_confidence = 100
//   timeout_secs = 30
//
//   [used_sources]
//   techradar = "https://www.techradar.com/news/past-wordle-answers"

use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};

use serde::Deserialize;

use super::options::{RunOptions, UsedSource};
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub allowed_urls: Option<Vec<String>>,
    pub used_sources: Option<BTreeMap<String, String>>,
    pub data_dir: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
    pub min_confidence: Option<usize>,
    pub timeout_secs: Option<u64>,
}

pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

pub fn parse(text: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(text)
}

impl ConfigFile {
    pub fn apply(self, opts: &mut RunOptions) {
        if let Some(urls) = self.allowed_urls {
            opts.sources.allowed_urls = urls;
        }
        if let Some(used) = self.used_sources {
            opts.sources.used = used
                .into_iter()
                .map(|(name, url)| UsedSource::new(name, url))
                .collect();
        }
        if let Some(dir) = self.data_dir {
            opts.output.data_dir = dir;
        }
        if let Some(dir) = self.public_dir {
            opts.output.public_dir = Some(dir);
        }
        if let Some(n) = self.min_confidence {
            opts.min_confidence = n;
        }
        if let Some(secs) = self.timeout_secs {
            opts.timeout = std::time::Duration::from_secs(secs);
        }
    }
}
