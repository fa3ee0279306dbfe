use std::io;
use std::path::PathBuf;

use crate::format::Compression;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("{0:?} support is not compiled in")]
    CodecDisabled(Compression),

    #[error("archive is corrupted: {reason}")]
    Corrupted { reason: String },

    #[error("member path '{path}' escapes the archive root")]
    UnsafePath { path: PathBuf },

    #[error("member '{path}' exceeds the {limit} byte limit")]
    TooLarge { path: PathBuf, limit: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// True when the input simply is not a container this crate can read,
    /// as opposed to an environment or resource failure.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat
                | Self::CodecDisabled(_)
                | Self::Corrupted { .. }
                | Self::UnsafePath { .. }
        )
    }

    pub(crate) fn corrupted(reason: impl ToString) -> Self {
        Self::Corrupted {
            reason: reason.to_string(),
        }
    }

    /// Split decoder I/O errors into environment failures and bad data.
    ///
    /// Only the kinds codecs use for malformed input count as corruption;
    /// anything carrying an OS error code is an environment failure.
    pub(crate) fn from_decode(err: io::Error) -> Self {
        if err.raw_os_error().is_some() {
            return Self::Io(err);
        }
        match err.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
                Self::corrupted(err)
            }
            _ => Self::Io(err),
        }
    }

    /// Like [`Error::from_decode`], for parsers that report bad input as
    /// `Other` errors built from a message (tar header checksums, zstd frame
    /// errors). Those carry no OS error code.
    pub(crate) fn from_parser(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Other && err.raw_os_error().is_none() {
            return Self::corrupted(err);
        }
        Self::from_decode(err)
    }
}

#[cfg(feature = "zip")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::from_decode(e),
            other => Self::corrupted(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_format_errors() {
        let err = Error::from_decode(io::Error::new(io::ErrorKind::InvalidData, "bad crc"));
        assert!(err.is_format_error());

        let err = Error::from_decode(io::Error::new(io::ErrorKind::UnexpectedEof, "short"));
        assert!(err.is_format_error());

        let err = Error::from_decode(io::Error::new(io::ErrorKind::InvalidInput, "bad window"));
        assert!(err.is_format_error());
    }

    #[test]
    fn environment_errors_are_not_format_errors() {
        let err = Error::from_decode(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(!err.is_format_error());

        let err = Error::from_decode(io::Error::from_raw_os_error(5));
        assert!(!err.is_format_error());

        let err = Error::from_decode(io::Error::other("disk went away"));
        assert!(matches!(err, Error::Io(_)));

        let err = Error::TooLarge {
            path:  PathBuf::from("big.bin"),
            limit: 1,
        };
        assert!(!err.is_format_error());
    }

    #[test]
    fn parser_errors_are_format_errors() {
        let err = Error::from_parser(io::Error::other("archive header checksum mismatch"));
        assert!(err.is_format_error());

        let err = Error::from_parser(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(!err.is_format_error());

        let err = Error::from_parser(io::Error::from_raw_os_error(5));
        assert!(!err.is_format_error());
    }
}
