use std::io::{Read, Seek};

use crate::archive::Member;
use crate::error::{Error, Result};
use crate::sanitize::sanitize_member_path;

/// Open a zip archive and count its file members.
///
/// Only the central directory is read. Member names are checked when each
/// member is read, so one hostile name fails that member alone.
pub(crate) fn open<R: Read + Seek>(reader: R) -> Result<(zip::ZipArchive<R>, usize)> {
    let archive = zip::ZipArchive::new(reader)?;
    let count = archive.file_names().filter(|name| !is_dir_name(name)).count();
    Ok((archive, count))
}

/// Upper bound on the up-front allocation for one member; declared sizes are
/// untrusted.
const CAPACITY_HINT: u64 = 64 * 1024;

fn is_dir_name(name: &str) -> bool { name.ends_with('/') || name.ends_with('\\') }

pub(crate) struct ZipMembers<R> {
    archive: zip::ZipArchive<R>,
    index:   usize,
    limit:   u64,
}

impl<R: Read + Seek> ZipMembers<R> {
    pub(crate) fn new(archive: zip::ZipArchive<R>, limit: u64) -> Self {
        Self {
            archive,
            index: 0,
            limit,
        }
    }

    fn read_at(&mut self, index: usize) -> Result<Option<Member>> {
        let mut file = self.archive.by_index(index)?;
        if file.is_dir() || is_dir_name(file.name()) {
            return Ok(None);
        }

        let path = sanitize_member_path(file.name())?;
        if file.size() > self.limit {
            return Err(Error::TooLarge {
                path,
                limit: self.limit,
            });
        }

        let mut data = Vec::with_capacity(file.size().min(CAPACITY_HINT) as usize);
        (&mut file)
            .take(self.limit.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(Error::from_decode)?;
        if data.len() as u64 > self.limit {
            return Err(Error::TooLarge {
                path,
                limit: self.limit,
            });
        }
        Ok(Some(Member { path, data }))
    }
}

impl<R: Read + Seek> Iterator for ZipMembers<R> {
    type Item = Result<Member>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.archive.len() {
            let index = self.index;
            self.index += 1;
            match self.read_at(index) {
                Ok(Some(member)) => return Some(Ok(member)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
