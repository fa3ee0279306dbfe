use std::io::Read;

use crate::archive::Member;
use crate::error::{Error, Result};
use crate::sanitize::sanitize_member_path;

/// Walk every header once and count file members.
///
/// Member paths and sizes are checked per member by [`list`], so a hostile
/// or oversized member does not make the whole archive unreadable.
pub(crate) fn count<R: Read>(reader: R) -> Result<usize> {
    let mut archive = tar::Archive::new(reader);
    let mut count = 0;
    for entry in archive.entries().map_err(Error::from_parser)? {
        if entry.map_err(Error::from_parser)?.header().entry_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Read every file member into memory, one result per member.
///
/// A member that fails its path or size check is reported in place and the
/// walk moves on; a broken header ends it.
pub(crate) fn list<R: Read>(reader: R, limit: u64) -> Result<Vec<Result<Member>>> {
    let mut archive = tar::Archive::new(reader);
    let mut members = Vec::new();
    for entry in archive.entries().map_err(Error::from_parser)? {
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                members.push(Err(Error::from_parser(e)));
                break;
            }
        };
        if entry.header().entry_type().is_file() {
            members.push(read_member(&mut entry, limit));
        }
    }
    Ok(members)
}

fn read_member<R: Read>(entry: &mut tar::Entry<'_, R>, limit: u64) -> Result<Member> {
    let raw = entry.path().map_err(Error::from_parser)?.into_owned();
    let path = sanitize_member_path(&raw)?;
    if entry.size() > limit {
        return Err(Error::TooLarge { path, limit });
    }

    let mut data = Vec::new();
    entry.read_to_end(&mut data).map_err(Error::from_parser)?;
    Ok(Member { path, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn build_tar(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, data) in entries {
            let mut header = tar::Header::new_ustar();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, data.as_bytes()).unwrap();
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn count_and_list_agree() {
        let bytes = build_tar(&[("lib/a.jar", "first"), ("b.txt", "second")]);
        assert_eq!(count(Cursor::new(&bytes)).unwrap(), 2);

        let members: Vec<_> = list(Cursor::new(&bytes), u64::MAX)
            .unwrap()
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].path, PathBuf::from("lib/a.jar"));
        assert_eq!(members[0].data, b"first");
        assert_eq!(members[1].path, PathBuf::from("b.txt"));
    }

    #[test]
    fn oversized_member_fails_alone() {
        let big = "x".repeat(100);
        let bytes = build_tar(&[("big.bin", big.as_str()), ("small.txt", "ok")]);
        assert_eq!(count(Cursor::new(&bytes)).unwrap(), 2);

        let members = list(Cursor::new(&bytes), 10).unwrap();
        assert_eq!(members.len(), 2);
        assert!(matches!(members[0], Err(Error::TooLarge { limit: 10, .. })));
        assert_eq!(members[1].as_ref().unwrap().data, b"ok");
    }

    #[test]
    fn garbage_after_magic_is_corrupt() {
        let mut bytes = vec![0u8; 1024];
        bytes[257..263].copy_from_slice(b"ustar\0");
        bytes[0] = b'x';
        let err = count(Cursor::new(&bytes)).unwrap_err();
        assert!(err.is_format_error(), "unexpected error: {err:?}");
    }
}
