// Hash computation module
// Provides the algorithm registry and streaming file digest logic

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use md5::Md5;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::error::HashUtilityError;

/// Trait for hash algorithm implementations
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the raw digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

// Every supported algorithm comes from the RustCrypto `Digest` family,
// so one wrapper covers all of them.
struct DigestHasher<D>(D);

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    pub fn all() -> [Algorithm; 5] {
        [
            Algorithm::Md5,
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha384,
            Algorithm::Sha512,
        ]
    }

    /// Canonical token, identical to what the user types
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes
    pub fn output_size(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 => 32,
            Algorithm::Sha384 => 48,
            Algorithm::Sha512 => 64,
        }
    }

    /// Build a fresh engine bound to this algorithm
    pub fn new_hasher(self) -> Box<dyn Hasher> {
        match self {
            Algorithm::Md5 => Box::new(DigestHasher(Md5::new())),
            Algorithm::Sha1 => Box::new(DigestHasher(Sha1::new())),
            Algorithm::Sha256 => Box::new(DigestHasher(Sha256::new())),
            Algorithm::Sha384 => Box::new(DigestHasher(Sha384::new())),
            Algorithm::Sha512 => Box::new(DigestHasher(Sha512::new())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HashUtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| HashUtilityError::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            })
    }
}

impl TryFrom<String> for Algorithm {
    type Error = HashUtilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Information about a hash algorithm
#[derive(Debug, Clone)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub output_bits: usize,
    pub collision_resistant: bool,
}

/// Registry for hash algorithms
pub struct HashRegistry;

impl HashRegistry {
    /// Resolve a user-supplied token. Matching is exact and case-sensitive.
    pub fn resolve(name: &str) -> Result<Algorithm, HashUtilityError> {
        let algorithm = name.parse()?;
        debug!("resolved algorithm {}", algorithm);
        Ok(algorithm)
    }

    /// Get a hasher instance for the specified algorithm
    pub fn get_hasher(name: &str) -> Result<Box<dyn Hasher>, HashUtilityError> {
        Ok(Self::resolve(name)?.new_hasher())
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        Algorithm::all()
            .into_iter()
            .map(|alg| AlgorithmInfo {
                name: alg.name(),
                output_bits: alg.output_size() * 8,
                // md5 and sha1 have practical collision attacks
                collision_resistant: !matches!(alg, Algorithm::Md5 | Algorithm::Sha1),
            })
            .collect()
    }
}

/// Result of a hash computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashResult {
    pub algorithm: Algorithm,
    pub hash: String, // lowercase hex
    pub file_path: PathBuf,
}

/// Hash computer with streaming I/O
pub struct HashComputer {
    buffer_size: usize,
}

/// Default read chunk (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Largest read chunk accepted (64MB)
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

impl HashComputer {
    /// Create a new HashComputer with default buffer size (1MB)
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a new HashComputer with custom buffer size,
    /// clamped to `1..=MAX_BUFFER_SIZE`.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.clamp(1, MAX_BUFFER_SIZE),
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Compute the digest of a single file.
    ///
    /// The file is opened read-only, rewound to offset 0 and consumed in
    /// `buffer_size` chunks. The handle is closed on every return path.
    pub fn compute_hash(
        &self,
        path: &Path,
        algorithm: Algorithm,
    ) -> Result<HashResult, HashUtilityError> {
        let mut file =
            File::open(path).map_err(|e| HashUtilityError::from_io_error(e, path))?;

        let metadata = file
            .metadata()
            .map_err(|e| HashUtilityError::from_io_error(e, path))?;
        if !metadata.is_file() {
            return Err(HashUtilityError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(
            "hashing {} ({} bytes) with {} in {} byte chunks",
            path.display(),
            metadata.len(),
            algorithm,
            self.buffer_size
        );

        file.seek(SeekFrom::Start(0))
            .map_err(|e| HashUtilityError::from_io_error(e, path))?;

        let hash = self
            .compute_reader(&mut file, algorithm.new_hasher())
            .map_err(|source| HashUtilityError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(HashResult {
            algorithm,
            hash,
            file_path: path.to_path_buf(),
        })
    }

    /// Stream `reader` to EOF through `hasher` and return the hex digest
    pub fn compute_reader<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        mut hasher: Box<dyn Hasher>,
    ) -> std::io::Result<String> {
        let mut buffer = vec![0u8; self.buffer_size];
        let mut total = 0u64;

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..bytes_read]);
            total += bytes_read as u64;
        }

        let expected_len = hasher.output_size();
        let digest = hasher.finalize();
        debug_assert_eq!(digest.len(), expected_len);
        debug!("finalized digest over {} bytes", total);

        Ok(hex::encode(digest))
    }
}

impl Default for HashComputer {
    fn default() -> Self {
        Self::new()
    }
}
