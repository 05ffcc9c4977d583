// Hash Core
// Algorithm selection and streaming file digests

pub mod error;
pub mod hash;

// Re-export commonly used types for convenience
pub use error::HashUtilityError;
pub use hash::{
    Algorithm, AlgorithmInfo, HashComputer, HashRegistry, HashResult, Hasher, DEFAULT_BUFFER_SIZE,
    MAX_BUFFER_SIZE,
};
