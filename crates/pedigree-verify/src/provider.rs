use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::hasher::{HashingReader, Md5Hasher, Sha1Hasher, Sha256Hasher, Sha512Hasher};
use crate::{Algorithm, Result};

/// Source of hex digests for a byte stream.
///
/// Called once per algorithm per artifact; the reader is positioned at the
/// start of the content each time.
pub trait ChecksumProvider: Send + Sync + fmt::Debug {
    fn digest(&self, reader: &mut dyn Read, algorithm: Algorithm) -> Result<String>;
}

/// Streaming provider backed by the RustCrypto hashers.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardChecksums;

impl ChecksumProvider for StandardChecksums {
    fn digest(&self, reader: &mut dyn Read, algorithm: Algorithm) -> Result<String> {
        hexdigest(reader, algorithm)
    }
}

/// Hash everything `reader` yields and return the lowercase hex digest.
pub fn hexdigest<R: Read>(reader: R, algorithm: Algorithm) -> Result<String> {
    let bytes = match algorithm {
        Algorithm::Md5 => HashingReader::new(reader, Md5Hasher::new()).finish()?,
        Algorithm::Sha1 => HashingReader::new(reader, Sha1Hasher::new()).finish()?,
        Algorithm::Sha256 => HashingReader::new(reader, Sha256Hasher::new()).finish()?,
        Algorithm::Sha512 => HashingReader::new(reader, Sha512Hasher::new()).finish()?,
    };
    Ok(hex::encode(bytes))
}

/// Algorithm name to hex digest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestSet(BTreeMap<Algorithm, String>);

impl DigestSet {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, algorithm: Algorithm, hex: String) { self.0.insert(algorithm, hex); }

    pub fn get(&self, algorithm: Algorithm) -> Option<&str> {
        self.0.get(&algorithm).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ { self.0.keys().copied() }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &str)> + '_ {
        self.0.iter().map(|(algorithm, hex)| (*algorithm, hex.as_str()))
    }

    /// True when exactly `required` is present, each with a non-empty value.
    pub fn is_complete(&self, required: &[Algorithm]) -> bool {
        self.0.len() == required.len()
            && required
                .iter()
                .all(|algorithm| self.get(*algorithm).is_some_and(|hex| !hex.is_empty()))
    }

    /// Digest under the strongest algorithm present.
    pub fn strongest(&self) -> Option<&str> {
        self.0.last_key_value().map(|(_, hex)| hex.as_str())
    }
}
