use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown checksum algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
