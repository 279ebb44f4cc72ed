use crate::artifacts::index::CHECKSUM_SIZE;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Reader/writer wrapper hashing every byte that passes through it
#[derive(Debug)]
pub struct Checksum<T> {
    inner: T,
    digest: Sha1,
}

impl<T> Checksum<T> {
    pub(crate) fn new(inner: T) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Checksum<T> {
    pub(crate) fn read(&mut self, size: usize) -> std::io::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.inner.read_exact(&mut buffer)?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Read the stored checksum and compare it with the digest of everything read so far
    pub(crate) fn verify(&mut self) -> std::io::Result<bool> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.inner.read_exact(&mut expected_checksum)?;

        let actual_checksum = self.digest.clone().finalize();

        Ok(expected_checksum == actual_checksum.as_slice())
    }
}

impl<T: Write> Checksum<T> {
    pub(crate) fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(&mut self) -> std::io::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.inner.write_all(checksum.as_slice())
    }
}
