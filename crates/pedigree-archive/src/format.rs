use std::io::{self, Read};

use crate::{Error, Result};

/// Bytes needed to recognize every supported container, tar being the widest.
pub const DETECT_LEN: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(Compression),
    /// A single compressed stream that does not wrap a tar archive.
    Stream(Compression),
}

/// Compression codec wrapping a tar archive or a lone stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Create a decoder for this compression codec.
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>> {
        match self {
            Self::None => Ok(Decoder::Passthrough(reader)),
            #[cfg(feature = "gzip")]
            Self::Gzip => Ok(Decoder::Gzip(Box::new(flate2::read::MultiGzDecoder::new(
                reader,
            )))),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(Decoder::Bzip2(Box::new(bzip2::read::BzDecoder::new(reader)))),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Decoder::Xz(Box::new(xz2::read::XzDecoder::new(reader)))),
            #[cfg(feature = "zstd")]
            Self::Zstd => {
                let decoder = zstd::stream::read::Decoder::new(reader).map_err(Error::from_parser)?;
                Ok(Decoder::Zstd(Box::new(decoder)))
            }
            #[allow(unreachable_patterns)]
            other => Err(Error::CodecDisabled(other)),
        }
    }
}

/// Decoder wrapper for compressed containers.
pub enum Decoder<R: Read> {
    Passthrough(R),
    #[cfg(feature = "gzip")]
    Gzip(Box<flate2::read::MultiGzDecoder<R>>),
    #[cfg(feature = "bzip2")]
    Bzip2(Box<bzip2::read::BzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::read::XzDecoder<R>>),
    #[cfg(feature = "zstd")]
    Zstd(Box<zstd::stream::read::Decoder<'static, io::BufReader<R>>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            #[cfg(feature = "gzip")]
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
            #[cfg(feature = "zstd")]
            Self::Zstd(d) => d.read(buf),
        }
    }
}

/// Recognize a container from its leading bytes.
///
/// A compressed stream is reported as [`ArchiveFormat::Stream`]; whether it
/// wraps a tar archive is only known after decoding.
pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] | [0x50, 0x4B, 0x07, 0x08, ..] => {
            Some(ArchiveFormat::Zip)
        }
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Stream(Compression::Gzip)),
        [b'B', b'Z', b'h', ..] => Some(ArchiveFormat::Stream(Compression::Bzip2)),
        [0x28, 0xB5, 0x2F, 0xFD, ..] => Some(ArchiveFormat::Stream(Compression::Zstd)),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Some(ArchiveFormat::Stream(Compression::Xz)),
        _ if is_tar_header(data) => Some(ArchiveFormat::Tar(Compression::None)),
        _ => None,
    }
}

/// POSIX `ustar\0` and GNU `ustar ` magic both start with `ustar`.
pub fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= DETECT_LEN && data[257..262] == *b"ustar"
}

/// Read up to [`DETECT_LEN`] bytes and detect the format.
///
/// The reader is left advanced; callers rewind before decoding.
pub fn detect_from_reader<R: Read>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    let mut header = Vec::with_capacity(DETECT_LEN);
    reader.by_ref().take(DETECT_LEN as u64).read_to_end(&mut header)?;
    Ok(detect_format(&header))
}
