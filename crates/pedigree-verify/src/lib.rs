//! Checksum provider for artifact fingerprinting.
//!
//! Computes one hex digest per named algorithm in a single streaming pass per
//! algorithm. The [`ChecksumProvider`] trait is the seam an application uses
//! to plug in its own hashing backend.
//!
//! # Example
//!
//! ```
//! use pedigree_verify::{Algorithm, hexdigest};
//!
//! let hex = hexdigest(&b"hello world"[..], Algorithm::Sha256).unwrap();
//! assert_eq!(hex, "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
//! ```

pub use self::algorithm::{Algorithm, REQUIRED_ALGORITHMS};
pub use self::error::{Error, Result};
pub use self::hasher::{
    DigestHasher, Hasher, HashingReader, Md5Hasher, Sha1Hasher, Sha256Hasher, Sha512Hasher,
};
pub use self::provider::{ChecksumProvider, DigestSet, StandardChecksums, hexdigest};

mod algorithm;
mod error;
mod hasher;
mod provider;
