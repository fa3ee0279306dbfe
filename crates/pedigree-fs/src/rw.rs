use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Write `content` to `path`, creating missing parent directories.
///
/// Content lands in a sibling temporary file first and is renamed into place,
/// so readers never observe a partially written file.
pub fn write_file(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = path.parent().ok_or_else(|| Error::Write {
        path:   path.to_path_buf(),
        source: std::io::Error::other("no parent directory"),
    })?;

    fs::create_dir_all(parent).map_err(|e| Error::Write {
        path:   parent.to_path_buf(),
        source: e,
    })?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let tmp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, content).map_err(|e| Error::Write {
        path:   tmp_path.clone(),
        source: e,
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::Write {
            path:   path.to_path_buf(),
            source: e,
        }
    })
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}

/// Fail unless `path` names an existing regular file.
pub fn ensure_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(Error::NotAFile {
            path: path.to_path_buf(),
        }),
    }
}
