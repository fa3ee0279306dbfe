use pedigree_fs::{Result, TransientDir, read_file, write_file};

#[test]
fn test_mirrored_write_round_trip() -> Result<()> {
    let dir = TransientDir::new("pedigree-it-").unwrap();
    let target = dir.mirror("lib/nested/app.jar");

    write_file(&target, b"PK\x03\x04payload")?;

    assert!(target.starts_with(dir.path()));
    assert_eq!(read_file(&target)?, b"PK\x03\x04payload");
    Ok(())
}

#[test]
fn test_sibling_dirs_are_independent() {
    let first = TransientDir::new("pedigree-it-").unwrap();
    let second = TransientDir::new("pedigree-it-").unwrap();
    assert_ne!(first.path(), second.path());

    let second_path = second.path().to_path_buf();
    write_file(second.mirror("keep.txt"), b"keep").unwrap();

    first.release().unwrap();
    assert!(second_path.join("keep.txt").exists());
    drop(second);
    assert!(!second_path.exists());
}
