//! One classified file and the provenance it carries.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use pedigree_archive::{Archive, DETECT_LEN, Members, detect_format};
use pedigree_verify::DigestSet;

use crate::classify::extension_of;
use crate::error::{Error, HandlerError, Result};
use crate::event::{Event, EventSink};
use crate::handler::{BuildContext, Handler};
use crate::persist::{self, Content, ReadSeek, Storage};
use crate::record::ArtifactRecord;
use crate::{HandlerKind, SnoopOptions};

/// What the caller hands to the strategy: a path, optionally its bytes, and
/// where it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactInput {
    /// Logical path, reported as-is.
    pub path:          PathBuf,
    /// Content already in memory. `None` means read `path` from disk.
    pub bytes:         Option<Bytes>,
    /// Prefix stripped from `path` when computing the relative path.
    pub parent_path:   Option<PathBuf>,
    /// Strongest digest of the producing container.
    pub parent_digest: Option<String>,
}

impl ArtifactInput {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            bytes: Some(bytes.into()),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_path: impl Into<PathBuf>, parent_digest: impl Into<String>) -> Self {
        self.parent_path = Some(parent_path.into());
        self.parent_digest = Some(parent_digest.into());
        self
    }

    fn content(&self) -> Content<'_> {
        match &self.bytes {
            Some(bytes) => Content::Bytes(bytes),
            None => Content::Path(&self.path),
        }
    }
}

/// A fingerprinted artifact.
///
/// Storage is fixed at construction. Transient storage is released when the
/// artifact is dropped or [`released`](Artifact::release).
#[derive(Debug)]
pub struct Artifact {
    path:          PathBuf,
    relative_path: Vec<String>,
    name:          String,
    kind:          String,
    parent_digest: Option<String>,
    digests:       DigestSet,
    handler:       Handler,
    storage:       Storage,
    sink:          Arc<dyn EventSink>,
}

impl Artifact {
    /// Build an artifact of exactly `kind`.
    ///
    /// Archive construction checks the content's magic bytes before anything is
    /// written, so content that is plainly not a container never reaches disk.
    pub fn build(input: ArtifactInput, kind: HandlerKind, options: &SnoopOptions) -> Result<Self> {
        if input.bytes.is_none() {
            pedigree_fs::ensure_file(&input.path).map_err(|_| Error::NotAFile {
                path: input.path.clone(),
            })?;
        }
        if options.algorithms.is_empty() {
            return Err(Error::NoAlgorithms);
        }

        if kind == HandlerKind::Archive {
            sniff(&input)?;
        }

        let ArtifactInput {
            path,
            bytes,
            parent_path,
            parent_digest,
        } = input;

        let storage = persist::persist(&path, bytes, kind, options)?;
        let ctx = BuildContext {
            path: &path,
            content: storage.content(),
            options,
        };
        let handler = options
            .registry
            .instantiate(kind, &ctx)
            .map_err(|e| e.at(&path, kind))?;
        let digests = compute_digests(&path, kind, &storage, options)?;

        Ok(Self {
            relative_path: relative_segments(&path, parent_path.as_deref()),
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            kind: extension_of(&path),
            parent_digest,
            digests,
            handler,
            storage,
            sink: Arc::clone(&options.sink),
            path,
        })
    }

    /// Logical path as supplied.
    pub fn path(&self) -> &Path { &self.path }

    /// Directory segments below the parent prefix.
    pub fn relative_path(&self) -> &[String] { &self.relative_path }

    pub fn name(&self) -> &str { &self.name }

    /// Lowercase extension with leading dot, or `""`.
    pub fn kind(&self) -> &str { &self.kind }

    pub fn parent_digest(&self) -> Option<&str> { self.parent_digest.as_deref() }

    pub fn digests(&self) -> &DigestSet { &self.digests }

    /// Digest under the strongest configured algorithm; children link to it.
    pub fn digest(&self) -> Option<&str> { self.digests.strongest() }

    pub fn handler(&self) -> &Handler { &self.handler }

    pub fn handler_kind(&self) -> HandlerKind { self.handler.kind() }

    pub fn is_container(&self) -> bool { self.handler.is_container() }

    pub fn storage(&self) -> &Storage { &self.storage }

    /// Path handlers read from: the caller's file or the transient copy.
    pub fn effective_path(&self) -> Option<&Path> { self.storage.effective_path() }

    /// Enumerate children as inputs ready for another classification round.
    ///
    /// Non-containers have no children.
    pub fn children(&self) -> Result<Children<'_>> {
        let Some(info) = self.handler.as_archive() else {
            return Ok(Children::empty(self));
        };

        let opened = self
            .storage
            .content()
            .reader()
            .map_err(HandlerError::from)
            .and_then(|reader| Archive::open_with(reader, info.options).map_err(HandlerError::from))
            .and_then(|archive| archive.members(&self.name).map_err(HandlerError::from));

        match opened {
            Ok(members) => Ok(Children {
                parent:  self,
                members: Some(members),
            }),
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn record(&self) -> ArtifactRecord {
        ArtifactRecord {
            relative_path: self.relative_path.clone(),
            name:          self.name.clone(),
            kind:          self.kind.clone(),
            parent:        self.parent_digest.clone(),
            digests:       self.digests.clone(),
            handler:       self.handler.kind(),
        }
    }

    /// Release transient storage now instead of on drop.
    pub fn release(self) {
        if let Storage::Transient(transient) = self.storage {
            transient.release();
        }
    }

    fn fail(&self, err: HandlerError) -> Error {
        let err = err.at(&self.path, self.handler.kind());
        self.sink.emit(&Event::IoFailure {
            path:  self.path.clone(),
            kind:  self.handler.kind(),
            error: err.to_string(),
        });
        err
    }
}

/// Children of one container, in container order.
///
/// Each item carries the child's bytes, this artifact's path as the parent
/// prefix and its strongest digest as the parent digest. A member that cannot
/// be read yields one `Err` and iteration moves on to the next member.
pub struct Children<'a> {
    parent:  &'a Artifact,
    members: Option<Members<Box<dyn ReadSeek + 'a>>>,
}

impl<'a> Children<'a> {
    fn empty(parent: &'a Artifact) -> Self {
        Self {
            parent,
            members: None,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = Result<ArtifactInput>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.members.as_mut()?.next()?;
        match item {
            Ok(member) => Some(Ok(ArtifactInput {
                path:          self.parent.path.join(&member.path),
                bytes:         Some(Bytes::from(member.data)),
                parent_path:   Some(self.parent.path.clone()),
                parent_digest: self.parent.digest().map(str::to_string),
            })),
            Err(e) => Some(Err(self.parent.fail(HandlerError::member(e)))),
        }
    }
}

fn sniff(input: &ArtifactInput) -> Result<()> {
    let head = input.content().head(DETECT_LEN).map_err(|source| Error::Read {
        path: input.path.clone(),
        kind: HandlerKind::Archive,
        source,
    })?;
    match detect_format(&head) {
        Some(_) => Ok(()),
        None => Err(Error::NotAContainer {
            path:   input.path.clone(),
            source: pedigree_archive::Error::UnsupportedFormat,
        }),
    }
}

fn compute_digests(
    path: &Path,
    kind: HandlerKind,
    storage: &Storage,
    options: &SnoopOptions,
) -> Result<DigestSet> {
    let mut digests = DigestSet::new();
    for &algorithm in &options.algorithms {
        let mut reader = storage.content().reader().map_err(|source| Error::Read {
            path: path.to_path_buf(),
            kind,
            source,
        })?;
        let hex = options
            .checksums
            .digest(&mut reader, algorithm)
            .map_err(|source| Error::Checksum {
                path: path.to_path_buf(),
                algorithm,
                source,
            })?;
        digests.insert(algorithm, hex);
    }
    Ok(digests)
}

/// Normal segments of the directory holding `path`, below `parent`.
fn relative_segments(path: &Path, parent: Option<&Path>) -> Vec<String> {
    let dir = path.parent().unwrap_or(Path::new(""));
    let relative = parent
        .and_then(|parent| dir.strip_prefix(parent).ok())
        .unwrap_or(dir);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
