use std::io::{self, Read};

use digest::Digest;

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

/// Adapts any RustCrypto [`Digest`] to [`Hasher`].
#[derive(Default)]
pub struct DigestHasher<D: Digest + Send>(D);

impl<D: Digest + Send> DigestHasher<D> {
    pub fn new() -> Self { Self(D::new()) }
}

impl<D: Digest + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) { Digest::update(&mut self.0, data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

pub type Md5Hasher = DigestHasher<md5::Md5>;
pub type Sha1Hasher = DigestHasher<sha1::Sha1>;
pub type Sha256Hasher = DigestHasher<sha2::Sha256>;
pub type Sha512Hasher = DigestHasher<sha2::Sha512>;

/// Streaming reader that hashes data as it passes through.
pub struct HashingReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H> HashingReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self { Self { reader, hasher } }
}

impl<R: Read, H: Hasher> HashingReader<R, H> {
    /// Drain the remaining input and return the digest bytes.
    pub fn finish(mut self) -> io::Result<Vec<u8>> {
        io::copy(&mut self, &mut io::sink())?;
        Ok(self.hasher.finalize())
    }
}

impl<R: Read, H: Hasher> Read for HashingReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}
