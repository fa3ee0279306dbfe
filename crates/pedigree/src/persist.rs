//! Where an artifact's bytes live, and when they are released.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use pedigree_fs::TransientDir;

use crate::error::{Error, Result};
use crate::event::{Event, EventSink};
use crate::{HandlerKind, SnoopOptions};

pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Borrowed view of artifact content handed to handler factories.
#[derive(Clone, Copy, Debug)]
pub enum Content<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

impl<'a> Content<'a> {
    /// A fresh reader positioned at the start of the content.
    pub fn reader(&self) -> io::Result<Box<dyn ReadSeek + 'a>> {
        match *self {
            Content::Path(path) => Ok(Box::new(File::open(path)?)),
            Content::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes))),
        }
    }

    /// Read at most `limit` leading bytes.
    pub fn head(&self, limit: usize) -> io::Result<Vec<u8>> {
        match *self {
            Content::Path(_) => {
                let mut head = Vec::with_capacity(limit);
                self.reader()?.take(limit as u64).read_to_end(&mut head)?;
                Ok(head)
            }
            Content::Bytes(bytes) => Ok(bytes[..bytes.len().min(limit)].to_vec()),
        }
    }

    /// Read everything, up to `limit` bytes.
    pub fn read_to_limit(&self, limit: usize) -> io::Result<Vec<u8>> { self.head(limit) }
}

/// Backing store of an artifact, fixed for its lifetime.
pub enum Storage {
    /// The caller-supplied on-disk path.
    Disk(PathBuf),
    /// Caller-supplied bytes, used in place.
    Memory(Bytes),
    /// Caller-supplied bytes written to a transient directory.
    Transient(TransientStorage),
}

impl Storage {
    pub fn content(&self) -> Content<'_> {
        match self {
            Storage::Disk(path) => Content::Path(path),
            Storage::Memory(bytes) => Content::Bytes(bytes),
            Storage::Transient(transient) => Content::Path(transient.file()),
        }
    }

    /// Path handlers operate on, if the content is on disk.
    pub fn effective_path(&self) -> Option<&Path> {
        match self {
            Storage::Disk(path) => Some(path),
            Storage::Memory(_) => None,
            Storage::Transient(transient) => Some(transient.file()),
        }
    }

    pub fn is_transient(&self) -> bool { matches!(self, Storage::Transient(_)) }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Storage::Disk(path) => f.debug_tuple("Disk").field(path).finish(),
            Storage::Memory(bytes) => f.debug_tuple("Memory").field(&bytes.len()).finish(),
            Storage::Transient(transient) => f.debug_tuple("Transient").field(&transient.file).finish(),
        }
    }
}

/// A transient directory owned by one artifact.
///
/// Released exactly once: by [`TransientStorage::release`] or on drop.
/// Removal failures are reported to the event sink and otherwise ignored.
pub struct TransientStorage {
    dir:  Option<TransientDir>,
    file: PathBuf,
    sink: Arc<dyn EventSink>,
}

impl TransientStorage {
    pub(crate) fn new(dir: TransientDir, file: PathBuf, sink: Arc<dyn EventSink>) -> Self {
        Self {
            dir: Some(dir),
            file,
            sink,
        }
    }

    pub fn file(&self) -> &Path { &self.file }

    pub fn dir(&self) -> Option<&Path> { self.dir.as_ref().map(TransientDir::path) }

    pub fn release(mut self) { self.release_inner(); }

    fn release_inner(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.release() {
                self.sink.emit(&Event::CleanupFailed {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }
}

impl Drop for TransientStorage {
    fn drop(&mut self) { self.release_inner(); }
}

/// Choose and prepare the backing store for an artifact about to become `kind`.
///
/// Without bytes the logical path must already be a regular file. With bytes,
/// kinds that need a real file get one in a fresh transient directory; the
/// directory is removed again if writing fails.
pub(crate) fn persist(
    path: &Path,
    bytes: Option<Bytes>,
    kind: HandlerKind,
    options: &SnoopOptions,
) -> Result<Storage> {
    let Some(bytes) = bytes else {
        pedigree_fs::ensure_file(path).map_err(|_| Error::NotAFile {
            path: path.to_path_buf(),
        })?;
        return Ok(Storage::Disk(path.to_path_buf()));
    };

    if !kind.requires_disk() {
        return Ok(Storage::Memory(bytes));
    }

    let persist_err = |source| Error::Persist {
        path: path.to_path_buf(),
        kind,
        source,
    };
    let dir = TransientDir::new(&options.temp_prefix).map_err(persist_err)?;
    let file = dir.mirror(path);
    pedigree_fs::write_file(&file, &bytes).map_err(persist_err)?;

    tracing::trace!(
        path = %path.display(),
        file = %file.display(),
        size = bytes.len(),
        "materialized to transient storage"
    );
    Ok(Storage::Transient(TransientStorage::new(dir, file, Arc::clone(&options.sink))))
}
