use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create transient directory with prefix '{prefix}': {source}")]
    CreateDir {
        prefix: String,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove '{path}': {source}")]
    Remove {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("'{path}' does not exist or is not a regular file")]
    NotAFile { path: PathBuf },
}

impl Error {
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::CreateDir { .. } => None,
            Self::Write { path, .. }
            | Self::Read { path, .. }
            | Self::Remove { path, .. }
            | Self::NotAFile { path } => Some(path),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
