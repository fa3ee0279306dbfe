use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::format::{self, ArchiveFormat, Compression};
use crate::members;
use crate::sanitize::stream_member_name;

/// Default ceiling for a single decoded member or stream: 1 GiB.
pub const DEFAULT_MAX_MEMBER_SIZE: u64 = 1 << 30;

/// A file member read out of a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Sanitized path relative to the container root.
    pub path: PathBuf,
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub max_member_size: u64,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            max_member_size: DEFAULT_MAX_MEMBER_SIZE,
        }
    }
}

impl ArchiveOptions {
    pub fn max_member_size(mut self, bytes: u64) -> Self {
        self.max_member_size = bytes;
        self
    }
}

enum Inner<R> {
    #[cfg(feature = "zip")]
    Zip(zip::ZipArchive<R>),
    #[cfg_attr(not(feature = "tar"), allow(dead_code))]
    Tar(R),
    Decoded(Vec<u8>),
}

/// A structurally validated container.
///
/// [`Archive::open`] walks the whole structure once. Member paths and member
/// sizes are checked during enumeration, where a failure affects only that
/// member. A bare compressed stream is decoded at open time, so its size
/// limit applies there.
pub struct Archive<R> {
    format:       ArchiveFormat,
    member_count: usize,
    options:      ArchiveOptions,
    inner:        Inner<R>,
}

impl<R: Read + Seek> Archive<R> {
    pub fn open(reader: R) -> Result<Self> { Self::open_with(reader, ArchiveOptions::default()) }

    pub fn open_with(mut reader: R, options: ArchiveOptions) -> Result<Self> {
        let detected = format::detect_from_reader(&mut reader)?.ok_or(Error::UnsupportedFormat)?;
        reader.rewind()?;

        match detected {
            ArchiveFormat::Zip => open_zip(reader, options),
            ArchiveFormat::Tar(_) => open_tar(reader, options),
            ArchiveFormat::Stream(codec) => open_stream(reader, codec, options),
        }
    }

    pub fn format(&self) -> ArchiveFormat { self.format }

    /// Number of file members; directories and links are not counted.
    pub fn member_count(&self) -> usize { self.member_count }

    /// Enumerate file members in archive order.
    ///
    /// `archive_name` names the single member of a bare compressed stream.
    pub fn members(self, archive_name: &str) -> Result<Members<R>> {
        let limit = self.options.max_member_size;
        let inner = match (self.inner, self.format) {
            #[cfg(feature = "zip")]
            (Inner::Zip(archive), _) => MembersInner::Zip(members::zip::ZipMembers::new(archive, limit)),
            #[cfg(feature = "tar")]
            (Inner::Tar(reader), _) => MembersInner::Listed(members::tar::list(reader, limit)?.into_iter()),
            #[cfg(feature = "tar")]
            (Inner::Decoded(bytes), ArchiveFormat::Tar(_)) => {
                MembersInner::Listed(members::tar::list(Cursor::new(bytes), limit)?.into_iter())
            }
            (Inner::Decoded(data), _) => {
                let member = Member {
                    path: PathBuf::from(stream_member_name(archive_name)),
                    data,
                };
                MembersInner::Listed(vec![Ok(member)].into_iter())
            }
            #[allow(unreachable_patterns)]
            _ => return Err(Error::UnsupportedFormat),
        };
        Ok(Members { inner })
    }
}

#[cfg(feature = "zip")]
fn open_zip<R: Read + Seek>(reader: R, options: ArchiveOptions) -> Result<Archive<R>> {
    let (archive, member_count) = members::zip::open(reader)?;
    Ok(Archive {
        format: ArchiveFormat::Zip,
        member_count,
        options,
        inner: Inner::Zip(archive),
    })
}

#[cfg(not(feature = "zip"))]
fn open_zip<R: Read + Seek>(_reader: R, _options: ArchiveOptions) -> Result<Archive<R>> {
    Err(Error::UnsupportedFormat)
}

#[cfg(feature = "tar")]
fn open_tar<R: Read + Seek>(mut reader: R, options: ArchiveOptions) -> Result<Archive<R>> {
    let member_count = members::tar::count(&mut reader)?;
    reader.rewind()?;
    Ok(Archive {
        format: ArchiveFormat::Tar(Compression::None),
        member_count,
        options,
        inner: Inner::Tar(reader),
    })
}

#[cfg(not(feature = "tar"))]
fn open_tar<R: Read + Seek>(_reader: R, _options: ArchiveOptions) -> Result<Archive<R>> {
    Err(Error::UnsupportedFormat)
}

fn open_stream<R: Read + Seek>(
    reader: R,
    codec: Compression,
    options: ArchiveOptions,
) -> Result<Archive<R>> {
    let limit = options.max_member_size;
    let mut decoded = Vec::new();
    codec
        .decoder(reader)?
        .take(limit.saturating_add(1))
        .read_to_end(&mut decoded)
        .map_err(Error::from_parser)?;

    if decoded.len() as u64 > limit {
        return Err(Error::TooLarge {
            path: PathBuf::from(format!("<{codec:?} stream>")),
            limit,
        });
    }
    if decoded.is_empty() {
        return Err(Error::corrupted("compressed stream decodes to nothing"));
    }

    #[cfg(feature = "tar")]
    if format::is_tar_header(&decoded) {
        let member_count = members::tar::count(Cursor::new(&decoded))?;
        return Ok(Archive {
            format: ArchiveFormat::Tar(codec),
            member_count,
            options,
            inner: Inner::Decoded(decoded),
        });
    }

    Ok(Archive {
        format: ArchiveFormat::Stream(codec),
        member_count: 1,
        options,
        inner: Inner::Decoded(decoded),
    })
}

enum MembersInner<R> {
    #[cfg(feature = "zip")]
    Zip(members::zip::ZipMembers<R>),
    Listed(std::vec::IntoIter<Result<Member>>),
    #[allow(dead_code)]
    Never(std::marker::PhantomData<R>),
}

/// File members of an [`Archive`], in archive order.
///
/// Zip members are read lazily one at a time; tar and stream members are
/// listed when enumeration starts. An `Err` item stands for one member and
/// enumeration continues after it.
pub struct Members<R> {
    inner: MembersInner<R>,
}

impl<R: Read + Seek> Iterator for Members<R> {
    type Item = Result<Member>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            #[cfg(feature = "zip")]
            MembersInner::Zip(members) => members.next(),
            MembersInner::Listed(members) => members.next(),
            MembersInner::Never(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_unknown_bytes() {
        let result = Archive::open(Cursor::new(b"just some text".to_vec()));
        assert!(matches!(result, Err(Error::UnsupportedFormat)));
    }

    #[test]
    fn open_rejects_empty_input() {
        let result = Archive::open(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(Error::UnsupportedFormat)));
    }

    #[test]
    #[cfg(feature = "zip")]
    fn open_rejects_truncated_zip() {
        let result = Archive::open(Cursor::new(vec![0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]));
        let err = result.err().unwrap();
        assert!(err.is_format_error(), "unexpected error: {err:?}");
    }

    #[test]
    #[cfg(feature = "gzip")]
    fn open_rejects_corrupt_gzip() {
        let result = Archive::open(Cursor::new(vec![0x1F, 0x8B, 0x08, 0x00, 0xFF, 0xFF, 0xFF]));
        let err = result.err().unwrap();
        assert!(err.is_format_error(), "unexpected error: {err:?}");
    }

    #[test]
    fn options_builder() {
        let options = ArchiveOptions::default().max_member_size(42);
        assert_eq!(options.max_member_size, 42);
        assert_eq!(ArchiveOptions::default().max_member_size, DEFAULT_MAX_MEMBER_SIZE);
    }
}
