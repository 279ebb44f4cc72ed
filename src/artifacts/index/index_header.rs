use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) additions_count: u32,
    pub(crate) removals_count: u32,
}

impl IndexHeader {
    pub(crate) fn new(additions_count: u32, removals_count: u32) -> Self {
        IndexHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
            additions_count,
            removals_count,
        }
    }

    pub(crate) fn serialize(&self) -> std::io::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.additions_count)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.removals_count)?;

        Ok(Bytes::from(bytes))
    }

    /// Decode a header, returning the reason it is unusable on failure
    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() < HEADER_SIZE {
            return Err(String::from("invalid header size"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| String::from("invalid marker in index header"))?;
        if marker != SIGNATURE {
            return Err(format!("invalid index signature {marker:?}"));
        }

        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(format!("unsupported index version {version}"));
        }

        Ok(IndexHeader {
            marker,
            version,
            additions_count: byteorder::NetworkEndian::read_u32(&bytes[8..12]),
            removals_count: byteorder::NetworkEndian::read_u32(&bytes[12..16]),
        })
    }
}
