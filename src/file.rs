// src/file.rs

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::artifacts::Artifact;
use crate::config::consts::STAGING_EXT;
use crate::error::ArtifactError;

fn io_err(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> ArtifactError {
    let path = path.to_path_buf();
    move |source| ArtifactError::Io { op, path, source }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ArtifactError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ArtifactError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_err("create directory", dir))?;
    }
    Ok(())
}

/// `<dir>/<name>.tmp`, next to its target so the rename stays on one filesystem.
pub fn staging_path(target: &Path) -> PathBuf {
    let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    target.with_file_name(join!(name, ".", STAGING_EXT))
}

fn stage(target: &Path, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
    let tmp = staging_path(target);
    let mut f = File::create(&tmp).map_err(io_err("create", &tmp))?;
    f.write_all(bytes).map_err(io_err("write", &tmp))?;
    f.sync_all().map_err(io_err("sync", &tmp))?;
    Ok(tmp)
}

/// Artifacts written next to their targets but not yet visible under their
/// own names.
#[must_use]
pub struct Staged {
    files: Vec<(PathBuf, PathBuf)>, // (staging path, target)
}

impl Staged {
    /// Rename every staged file over its target.
    pub fn commit(self) -> Result<Vec<PathBuf>, ArtifactError> {
        let mut written = Vec::with_capacity(self.files.len());
        for (tmp, target) in self.files {
            fs::rename(&tmp, &target).map_err(io_err("rename into", &target))?;
            logd!("Wrote {}", target.display());
            written.push(target);
        }
        Ok(written)
    }

    /// Drop the staged files; targets are left as they were.
    pub fn discard(self) {
        for (tmp, _) in &self.files {
            let _ = fs::remove_file(tmp);
        }
    }
}

/// Stage a set of artifacts into `dir`. Nothing under `dir` is replaced until
/// [`Staged::commit`]; a staging failure removes whatever was staged.
pub fn stage_all<'a, I>(dir: &Path, artifacts: I) -> Result<Staged, ArtifactError>
where
    I: IntoIterator<Item = &'a Artifact>,
{
    ensure_directory(dir)?;

    let mut staged = Staged { files: Vec::new() };
    for a in artifacts {
        let target = dir.join(a.name);
        match stage(&target, &a.bytes) {
            Ok(tmp) => staged.files.push((tmp, target)),
            Err(e) => {
                let _ = fs::remove_file(staging_path(&target));
                staged.discard();
                return Err(e);
            }
        }
    }
    Ok(staged)
}
