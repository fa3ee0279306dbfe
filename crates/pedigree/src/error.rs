use std::io;
use std::path::{Path, PathBuf};

use pedigree_verify::Algorithm;

use crate::HandlerKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{path}' does not exist or is not a regular file")]
    NotAFile { path: PathBuf },

    #[error("'{path}' is not a recognized container: {source}")]
    NotAContainer {
        path:   PathBuf,
        source: pedigree_archive::Error,
    },

    #[error("failed to read '{path}' as {kind}: {source}")]
    Read {
        path:   PathBuf,
        kind:   HandlerKind,
        source: io::Error,
    },

    #[error("failed to open '{path}' as {kind}: {source}")]
    Container {
        path:   PathBuf,
        kind:   HandlerKind,
        source: pedigree_archive::Error,
    },

    #[error("failed to persist '{path}' for {kind}: {source}")]
    Persist {
        path:   PathBuf,
        kind:   HandlerKind,
        source: pedigree_fs::Error,
    },

    #[error("{algorithm} checksum of '{path}' failed: {source}")]
    Checksum {
        path:      PathBuf,
        algorithm: Algorithm,
        source:    pedigree_verify::Error,
    },

    #[error("no checksum algorithms configured")]
    NoAlgorithms,
}

impl Error {
    /// Logical path of the artifact that failed.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotAFile { path }
            | Self::NotAContainer { path, .. }
            | Self::Read { path, .. }
            | Self::Container { path, .. }
            | Self::Persist { path, .. }
            | Self::Checksum { path, .. } => Some(path),
            Self::NoAlgorithms => None,
        }
    }

    /// Handler kind that was being constructed, when known.
    pub fn kind(&self) -> Option<HandlerKind> {
        match self {
            Self::NotAContainer { .. } => Some(HandlerKind::Archive),
            Self::Read { kind, .. } | Self::Container { kind, .. } | Self::Persist { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure while a handler factory inspects content.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("not a recognized container: {0}")]
    NotAContainer(pedigree_archive::Error),

    #[error(transparent)]
    Container(pedigree_archive::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<pedigree_archive::Error> for HandlerError {
    fn from(err: pedigree_archive::Error) -> Self {
        if err.is_format_error() {
            Self::NotAContainer(err)
        } else {
            match err {
                pedigree_archive::Error::Io(e) => Self::Io(e),
                other => Self::Container(other),
            }
        }
    }
}

impl HandlerError {
    /// A failure confined to one member of a container that opened fine.
    ///
    /// Never `NotAContainer`: the container itself was already accepted.
    pub(crate) fn member(err: pedigree_archive::Error) -> Self {
        match err {
            pedigree_archive::Error::Io(e) => Self::Io(e),
            other => Self::Container(other),
        }
    }

    pub(crate) fn at(self, path: &Path, kind: HandlerKind) -> Error {
        let path = path.to_path_buf();
        match self {
            Self::NotAContainer(source) => Error::NotAContainer { path, source },
            Self::Container(source) => Error::Container { path, kind, source },
            Self::Io(source) => Error::Read { path, kind, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn member_failures_never_mean_not_a_container() {
        let err = HandlerError::member(pedigree_archive::Error::UnsafePath {
            path: PathBuf::from("../evil.txt"),
        });
        assert!(matches!(
            err.at(Path::new("app.jar"), HandlerKind::Archive),
            Error::Container {
                kind: HandlerKind::Archive,
                ..
            }
        ));

        let err = HandlerError::member(pedigree_archive::Error::Io(io::Error::other("gone")));
        assert!(matches!(
            err.at(Path::new("app.jar"), HandlerKind::Archive),
            Error::Read { .. }
        ));
    }
}
