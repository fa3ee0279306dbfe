use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize a member path and reject anything that leaves the archive root.
///
/// `.` components are dropped and `..` pops the previous component; absolute
/// paths and `..` past the root are zip-slip attempts.
pub fn sanitize_member_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(unsafe_path(path));
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(unsafe_path(path)),
        }
    }

    if result.as_os_str().is_empty() {
        return Err(unsafe_path(path));
    }
    Ok(result)
}

fn unsafe_path(path: &Path) -> Error {
    Error::UnsafePath {
        path: path.to_path_buf(),
    }
}

/// Name given to the single member of a compressed stream.
///
/// The codec extension is stripped (`notes.txt.gz` becomes `notes.txt`);
/// a name with nothing left falls back to `data`.
pub fn stream_member_name(archive_name: &str) -> String {
    let file_name = Path::new(archive_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ if !file_name.is_empty() && !file_name.starts_with('.') => file_name,
        _ => "data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_member_path() {
        assert_eq!(
            sanitize_member_path("META-INF/MANIFEST.MF").unwrap(),
            Path::new("META-INF/MANIFEST.MF")
        );
    }

    #[test]
    fn member_path_normalization() {
        assert_eq!(
            sanitize_member_path("a/./b/../c.class").unwrap(),
            Path::new("a/c.class")
        );
    }

    #[test]
    fn zip_slip_protection() {
        assert!(matches!(
            sanitize_member_path("../../etc/passwd"),
            Err(Error::UnsafePath { .. })
        ));
        let absolute = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        assert!(matches!(
            sanitize_member_path(absolute),
            Err(Error::UnsafePath { .. })
        ));
    }

    #[test]
    fn empty_member_path_rejected() {
        assert!(sanitize_member_path("./").is_err());
    }

    #[test]
    fn stream_names() {
        assert_eq!(stream_member_name("logs/notes.txt.gz"), "notes.txt");
        assert_eq!(stream_member_name("payload.bz2"), "payload");
        assert_eq!(stream_member_name("payload"), "payload");
        assert_eq!(stream_member_name(".gz"), "data");
        assert_eq!(stream_member_name(""), "data");
    }
}
