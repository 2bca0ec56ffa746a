//! End-to-end scenarios (S1-S6 in the design notes), exercising
//! [`crate::Session`] against real gzip fixtures.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::BuildConfig;
use crate::{ErrorKind, Session};

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut s = seed;
    for _ in 0..len {
        s = s.wrapping_mul(1_103_515_245).wrapping_add(12345);
        out.push((s >> 16) as u8);
    }
    out
}

fn read_at(session: &mut Session, offset: u64, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    let n = session.read_at(offset, &mut buf).unwrap();
    buf.truncate(n);
    buf
}

/// S1: small file, single access point, exact and short reads.
#[test]
fn s1_small_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s1.gz");
    std::fs::write(&path, gzip(b"abcdefghij")).unwrap();

    let mut session = Session::open(&path).unwrap();
    assert_eq!(session.unpacked_length(), 10);

    assert_eq!(read_at(&mut session, 3, 4), b"defg");
    assert_eq!(read_at(&mut session, 8, 10), b"ij");
    assert_eq!(read_at(&mut session, 10, 1), b"");
}

/// S2: a 4 MiB single-byte-repeated file forces several access points.
#[test]
fn s2_multi_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s2.gz");
    let plain = vec![b'A'; 4_194_304];
    std::fs::write(&path, gzip(&plain)).unwrap();

    let mut session = Session::open_with_config(&path, BuildConfig::default()).unwrap();
    assert_eq!(session.unpacked_length(), plain.len() as u64);
    assert!(session.index_point_count() >= 4);

    let expected_1024 = vec![b'A'; 1024];
    let offsets: Vec<u64> = session
        .access_point_offsets()
        .into_iter()
        .filter(|&o| o + 1024 <= plain.len() as u64)
        .collect();
    for offset in offsets {
        assert_eq!(read_at(&mut session, offset, 1024), expected_1024);
    }

    assert_eq!(read_at(&mut session, 4_194_300, 100), vec![b'A'; 4]);
}

/// S3: reads that straddle an access-point boundary.
#[test]
fn s3_boundary_offset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s3.gz");
    let plain = vec![b'A'; 4_194_304];
    std::fs::write(&path, gzip(&plain)).unwrap();

    let mut session = Session::open(&path).unwrap();
    assert_eq!(read_at(&mut session, 1_048_576, 1), b"A");
    assert_eq!(read_at(&mut session, 1_048_575, 2), b"AA");
}

/// S4: sub-byte-aligned resume on pseudo-random data.
#[test]
fn s4_sub_byte_prime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s4.gz");
    let plain = pseudo_random(2 * 1024 * 1024, 42);
    std::fs::write(&path, gzip(&plain)).unwrap();

    let mut session = Session::open(&path).unwrap();
    let got = read_at(&mut session, 1_500_000, 17);
    assert_eq!(got, &plain[1_500_000..1_500_017]);
}

/// S5: an index that no longer matches its source file's mtime is rebuilt.
#[test]
fn s5_stale_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s5.gz");
    std::fs::write(&path, gzip(b"abcdefghij")).unwrap();

    {
        let _session = Session::open(&path).unwrap();
    }

    std::thread::sleep(std::time::Duration::from_millis(1100));
    std::fs::write(&path, gzip(b"0123456789")).unwrap();

    let mut session = Session::open(&path).unwrap();
    assert_eq!(session.error(), ErrorKind::Success);
    assert_eq!(read_at(&mut session, 0, 10), b"0123456789");
}

/// S6: a truncated data file fails the build, and leaves no index behind.
#[test]
fn s6_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s6.gz");
    let plain = pseudo_random(200_000, 99);
    let mut compressed = gzip(&plain);
    compressed.truncate(compressed.len() / 2);
    std::fs::write(&path, &compressed).unwrap();

    let result = Session::open(&path);
    assert!(result.is_err());
    assert!(!path.with_extension("gz.idx").exists());
}
