use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Fallback file name used when a logical path has no normal components.
const UNNAMED: &str = "artifact";

/// A uniquely named temporary directory owned by exactly one holder.
///
/// The directory is removed either by [`TransientDir::release`], which reports
/// failures, or on drop, which swallows them. Removal happens at most once.
#[derive(Debug)]
pub struct TransientDir {
    path:     PathBuf,
    released: bool,
}

impl TransientDir {
    pub fn new(prefix: &str) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .map_err(|e| Error::CreateDir {
                prefix: prefix.to_string(),
                source: e,
            })?;

        Ok(Self {
            path:     dir.keep(),
            released: false,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Location inside this directory that mirrors `logical`.
    pub fn mirror(&self, logical: impl AsRef<Path>) -> PathBuf {
        self.path.join(mirror_path(logical))
    }

    pub fn release(mut self) -> Result<()> {
        self.released = true;
        std::fs::remove_dir_all(&self.path).map_err(|e| Error::Remove {
            path:   self.path.clone(),
            source: e,
        })
    }
}

impl Drop for TransientDir {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

/// Reduce a logical path to its normal components.
///
/// Root, prefix, `.` and `..` components are dropped so the result can always
/// be joined under a base directory without escaping it.
pub fn mirror_path(logical: impl AsRef<Path>) -> PathBuf {
    let mirrored: PathBuf = logical
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    if mirrored.as_os_str().is_empty() {
        PathBuf::from(UNNAMED)
    } else {
        mirrored
    }
}
