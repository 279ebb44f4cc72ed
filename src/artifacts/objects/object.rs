use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Reason an object's bytes could not be decoded
///
/// The database wraps this into a `CorruptObject` error together with the id
/// of the object being read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MalformedObject(pub String);

pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    /// Decode an object whose `<type> <size>\0` header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self, MalformedObject>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(self.serialize());

        ObjectId::from_digest(hasher.finalize().as_slice())
    }
}

/// Prefix `content` with the `<type> <size>\0` envelope shared by all objects
pub(crate) fn envelope(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), content.len());

    let mut object_bytes = Vec::with_capacity(header.len() + content.len());
    object_bytes.extend_from_slice(header.as_bytes());
    object_bytes.extend_from_slice(content);

    Bytes::from(object_bytes)
}
