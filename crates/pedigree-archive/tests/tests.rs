use std::io::{Cursor, Write};
use std::path::PathBuf;

use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use pedigree_archive::{Archive, ArchiveFormat, ArchiveOptions, Compression, Error, Member};
use zip::write::SimpleFileOptions;

fn jar_bytes() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\r\n").unwrap();
    writer
        .start_file("com/example/App.class", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(&[0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52]).unwrap();
    writer.finish().unwrap().into_inner()
}

fn tar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
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

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn collect(archive: Archive<Cursor<Vec<u8>>>, name: &str) -> Vec<Member> {
    archive
        .members(name)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn open_jar_regardless_of_name() {
    let archive = Archive::open(Cursor::new(jar_bytes())).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Zip);
    assert_eq!(archive.member_count(), 2);

    let members = collect(archive, "renamed.mf");
    let paths: Vec<_> = members.iter().map(|m| m.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("META-INF/MANIFEST.MF"),
            PathBuf::from("com/example/App.class"),
        ]
    );
}

#[test]
fn open_tar_gz() {
    let bytes = gzip(&tar_bytes(&[("pkg/lib.jar", "inner"), ("pkg/README", "hi")]));
    let archive = Archive::open(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Tar(Compression::Gzip));
    assert_eq!(archive.member_count(), 2);

    let members = collect(archive, "bundle.tgz");
    assert_eq!(members[0].path, PathBuf::from("pkg/lib.jar"));
    assert_eq!(members[0].data, b"inner");
}

#[test]
fn open_plain_tar() {
    let archive = Archive::open(Cursor::new(tar_bytes(&[("a.txt", "a")]))).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Tar(Compression::None));
    assert_eq!(collect(archive, "a.tar").len(), 1);
}

#[test]
fn open_bare_gzip_stream() {
    let archive = Archive::open(Cursor::new(gzip(b"plain log line\n"))).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Stream(Compression::Gzip));
    assert_eq!(archive.member_count(), 1);

    let members = collect(archive, "logs/app.log.gz");
    assert_eq!(
        members,
        vec![Member {
            path: PathBuf::from("app.log"),
            data: b"plain log line\n".to_vec(),
        }]
    );
}

#[cfg(feature = "bzip2")]
#[test]
fn open_bzip2_stream() {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(b"bz payload").unwrap();
    let bytes = encoder.finish().unwrap();

    let archive = Archive::open(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Stream(Compression::Bzip2));
    assert_eq!(collect(archive, "x.bz2")[0].data, b"bz payload");
}

#[test]
fn zip_slip_member_fails_alone() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("META-INF/MANIFEST.MF", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    writer
        .start_file("../../evil.sh", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"rm -rf /").unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let archive = Archive::open(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.format(), ArchiveFormat::Zip);
    assert_eq!(archive.member_count(), 2);

    let results: Vec<_> = archive.members("app.jar").unwrap().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].as_ref().unwrap().path,
        PathBuf::from("META-INF/MANIFEST.MF")
    );
    assert!(matches!(results[1], Err(Error::UnsafePath { .. })));
}

#[test]
fn oversized_tar_member_fails_alone() {
    let big = "x".repeat(64);
    let bytes = tar_bytes(&[("big.bin", big.as_str()), ("notes.txt", "ok")]);

    let options = ArchiveOptions::default().max_member_size(16);
    let archive = Archive::open_with(Cursor::new(bytes), options).unwrap();
    assert_eq!(archive.member_count(), 2);

    let results: Vec<_> = archive.members("dist.tar").unwrap().collect();
    assert!(matches!(results[0], Err(Error::TooLarge { limit: 16, .. })));
    assert_eq!(results[1].as_ref().unwrap().data, b"ok");
}

#[test]
fn decoded_stream_over_limit_is_not_format_error() {
    let bytes = gzip(&[b'z'; 4096]);
    let options = ArchiveOptions::default().max_member_size(1024);

    let err = Archive::open_with(Cursor::new(bytes), options).err().unwrap();
    assert!(matches!(err, Error::TooLarge { limit: 1024, .. }));
    assert!(!err.is_format_error());
}

#[test]
fn text_is_not_a_container() {
    let err = Archive::open(Cursor::new(b"Manifest-Version: 1.0\n".to_vec()))
        .err()
        .unwrap();
    assert!(matches!(err, Error::UnsupportedFormat));
    assert!(err.is_format_error());
}
