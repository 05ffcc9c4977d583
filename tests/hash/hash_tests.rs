// Tests for the algorithm registry and streaming file digests

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use shahash::hash::{Algorithm, HashComputer, HashRegistry, HashUtilityError};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

// Deterministic, non-repeating-looking content
fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 7)) as u8).collect()
}

#[test]
fn test_empty_file_known_digests() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.bin", b"");
    let computer = HashComputer::new();

    let expected = [
        (Algorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e"),
        (Algorithm::Sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        (
            Algorithm::Sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        ),
        (
            Algorithm::Sha384,
            "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
        ),
        (
            Algorithm::Sha512,
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        ),
    ];

    for (algorithm, digest) in expected {
        let result = computer.compute_hash(&path, algorithm).unwrap();
        assert_eq!(result.hash, digest, "empty digest for {}", algorithm);
    }
}

#[test]
fn test_abc_vectors() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "abc.txt", b"abc");
    let computer = HashComputer::new();

    let result = computer.compute_hash(&path, Algorithm::Sha256).unwrap();
    assert_eq!(result.algorithm, Algorithm::Sha256);
    assert_eq!(
        result.hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(result.file_path, path);

    let md5 = computer.compute_hash(&path, Algorithm::Md5).unwrap();
    assert_eq!(md5.hash, "900150983cd24fb0d6963f7d28e17f72");

    let sha1 = computer.compute_hash(&path, Algorithm::Sha1).unwrap();
    assert_eq!(sha1.hash, "a9993e364706816aba3e25717850c26c9cd0d89d");
}

#[test]
fn test_hex_is_lowercase_and_fixed_width() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "data.bin", &pattern(4096));
    let computer = HashComputer::new();

    for algorithm in Algorithm::all() {
        let result = computer.compute_hash(&path, algorithm).unwrap();
        assert_eq!(result.hash.len(), 2 * algorithm.output_size());
        assert!(result
            .hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}

#[test]
fn test_hashing_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "twice.bin", &pattern(300_000));
    let computer = HashComputer::new();

    for algorithm in Algorithm::all() {
        let first = computer.compute_hash(&path, algorithm).unwrap();
        let second = computer.compute_hash(&path, algorithm).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_chunk_size_does_not_change_digest() {
    let dir = TempDir::new().unwrap();
    // Not a multiple of any buffer size below, so the last read is short
    let path = write_file(&dir, "chunks.bin", &pattern(100_003));

    for algorithm in Algorithm::all() {
        let reference = HashComputer::new().compute_hash(&path, algorithm).unwrap();
        for buffer_size in [1, 7, 64, 4096, 65_536, 1 << 20] {
            let result = HashComputer::with_buffer_size(buffer_size)
                .compute_hash(&path, algorithm)
                .unwrap();
            assert_eq!(
                result.hash, reference.hash,
                "{} with {} byte chunks",
                algorithm, buffer_size
            );
        }
    }
}

#[test]
fn test_ten_megabytes_single_pass_matches_single_byte_reads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("large.bin");
    let mut file = File::create(&path).unwrap();
    let block = pattern(1024 * 1024);
    for _ in 0..10 {
        file.write_all(&block).unwrap();
    }
    drop(file);

    let single_pass = HashComputer::with_buffer_size(16 * 1024 * 1024)
        .compute_hash(&path, Algorithm::Sha256)
        .unwrap();

    // BufReader keeps the one-byte chunks off the syscall path
    let mut reader = BufReader::new(File::open(&path).unwrap());
    let byte_at_a_time = HashComputer::with_buffer_size(1)
        .compute_reader(&mut reader, Algorithm::Sha256.new_hasher())
        .unwrap();

    assert_eq!(single_pass.hash, byte_at_a_time);
}

#[test]
fn test_unsupported_algorithm_checked_before_io() {
    let missing = Path::new("definitely/not/here.bin");
    assert!(!missing.exists());

    match HashRegistry::resolve("sha999") {
        Err(HashUtilityError::UnsupportedAlgorithm { algorithm }) => {
            assert_eq!(algorithm, "sha999");
        }
        other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
    }
    assert!(HashRegistry::get_hasher("sha999").is_err());
}

#[test]
fn test_file_not_found_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nonexistent_file.txt");

    let result = HashComputer::new().compute_hash(&missing, Algorithm::Sha256);
    match result {
        Err(HashUtilityError::FileNotFound { path }) => assert_eq!(path, missing),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();

    let result = HashComputer::new().compute_hash(dir.path(), Algorithm::Md5);
    assert!(matches!(result, Err(HashUtilityError::FileNotFound { .. })));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "locked.bin", b"secret");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits
    if File::open(&path).is_ok() {
        return;
    }

    match HashComputer::new().compute_hash(&path, Algorithm::Md5) {
        Err(HashUtilityError::FileUnreadable { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected FileUnreadable, got {:?}", other),
    }
}

// A regular file whose first read fails with EIO
#[cfg(target_os = "linux")]
#[test]
fn test_read_failure_is_file_unreadable() {
    let path = Path::new("/proc/self/mem");

    match HashComputer::new().compute_hash(path, Algorithm::Sha256) {
        Err(HashUtilityError::FileUnreadable { path: p, source }) => {
            assert_eq!(p, path);
            assert_ne!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected FileUnreadable, got {:?}", other),
    }
}

#[test]
fn test_list_algorithms() {
    let list = HashRegistry::list_algorithms();
    let names: Vec<_> = list.iter().map(|info| info.name).collect();
    assert_eq!(names, ["md5", "sha1", "sha256", "sha384", "sha512"]);

    let bits: Vec<_> = list.iter().map(|info| info.output_bits).collect();
    assert_eq!(bits, [128, 160, 256, 384, 512]);

    assert!(!list[0].collision_resistant);
    assert!(list[2].collision_resistant);
}
