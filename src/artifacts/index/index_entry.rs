use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Size of a raw blob id inside an index entry
pub const OID_SIZE: usize = 20;

/// Size of the length prefix in front of every path
pub const PATH_LENGTH_SIZE: usize = 2;

/// A file staged for addition: path plus the blob captured at `add` time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub(crate) name: PathBuf,
    pub(crate) oid: ObjectId,
}

impl IndexEntry {
    pub fn new(name: PathBuf, oid: ObjectId) -> Self {
        IndexEntry { name, oid }
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Checksum<W>) -> std::io::Result<()> {
        let mut bytes = Vec::with_capacity(OID_SIZE);
        self.oid.write_h40_to(&mut bytes)?;
        writer.write(&bytes)?;

        write_path(&self.name, writer)
    }

    pub(crate) fn read_from<R: Read>(reader: &mut Checksum<R>) -> std::io::Result<Self> {
        let oid_bytes = reader.read(OID_SIZE)?;
        let oid = ObjectId::read_h40_from(&mut oid_bytes.as_ref())?;
        let name = read_path(reader)?;

        Ok(IndexEntry { name, oid })
    }
}

/// Write a path as a u16 length prefix followed by its bytes
pub(crate) fn write_path<W: Write>(path: &Path, writer: &mut Checksum<W>) -> std::io::Result<()> {
    let path_str = path.to_str().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("path is not valid UTF-8: {}", path.display()),
        )
    })?;
    let path_len = u16::try_from(path_str.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("path too long for the index: {}", path.display()),
        )
    })?;

    let mut bytes = Vec::with_capacity(PATH_LENGTH_SIZE + path_str.len());
    bytes.write_u16::<byteorder::NetworkEndian>(path_len)?;
    bytes.write_all(path_str.as_bytes())?;

    writer.write(&bytes)
}

pub(crate) fn read_path<R: Read>(reader: &mut Checksum<R>) -> std::io::Result<PathBuf> {
    let length_bytes = reader.read(PATH_LENGTH_SIZE)?;
    let path_len = byteorder::NetworkEndian::read_u16(&length_bytes) as usize;

    let path_bytes = reader.read(path_len)?;
    let path = String::from_utf8(path_bytes.to_vec())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(PathBuf::from(path))
}
