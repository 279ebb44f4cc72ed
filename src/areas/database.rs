//! Content-addressed object database
//!
//! Blobs and commits are stored under `.gitlet/objects/<2 hex>/<38 hex>`, keyed by
//! the SHA-1 of their serialized form and zlib-compressed on disk. Objects are
//! immutable: storing the same content twice is a no-op, and nothing is ever
//! deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{MalformedObject, Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Error, IoResultExt, Missing, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object and return its id
    ///
    /// The object is fully written and synced to disk before this returns, so a
    /// caller may safely reference the id from a commit or a branch afterwards.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if self.exists(&object_id) {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::corrupt_object(&object_id, "invalid object path"))?;
        std::fs::create_dir_all(object_dir).storage_context(|| {
            format!("unable to create object directory {}", object_dir.display())
        })?;

        self.write_object(&object_path, object.serialize())?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Read the raw (decompressed) bytes of an object, envelope included
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(Error::NotFound(Missing::Object(object_id.clone())));
        }

        self.read_object(object_id, &object_path)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(
                Blob::deserialize(object_reader).map_err(|e| corrupt(object_id, e))?,
            )),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(
                Commit::deserialize(object_reader).map_err(|e| corrupt(object_id, e))?,
            )),
            _ => Ok(None),
        }
    }

    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(&self, object_id: &ObjectId) -> Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type =
            ObjectType::parse_object_type(&mut object_reader).map_err(|e| corrupt(object_id, e))?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId, object_path: &Path) -> Result<Bytes> {
        let object_content = std::fs::read(object_path).storage_context(|| {
            format!("unable to read object file {}", object_path.display())
        })?;

        let mut decoder = flate2::read::ZlibDecoder::new(object_content.as_slice());
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|e| Error::corrupt_object(object_id, format!("unable to decompress: {e}")))?;

        Ok(decompressed_content.into())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<()> {
        let object_dir = object_path.parent().unwrap_or(self.path.as_ref());
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(&object_content).storage_context(|| {
            format!("unable to compress object {}", object_path.display())
        })?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .storage_context(|| {
                format!("unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content)
            .and_then(|_| file.sync_all())
            .storage_context(|| {
                format!("unable to write object file {}", temp_object_path.display())
            })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).storage_context(|| {
            format!("unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose id starts with the given hex prefix
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is
    /// searched; shorter prefixes scan the whole store.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        if prefix.len() >= 2 {
            let dir_path = self.path.join(&prefix[..2]);

            Ok(self
                .objects_in(&dir_path)?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(&prefix))
                .collect())
        } else {
            Ok(self
                .list_objects()?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(&prefix))
                .collect())
        }
    }

    /// Every object id in the store, sorted
    pub fn list_objects(&self) -> Result<Vec<ObjectId>> {
        let mut objects = self.objects_in(&self.path)?;
        objects.sort();

        Ok(objects)
    }

    fn objects_in(&self, dir_path: &Path) -> Result<Vec<ObjectId>> {
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        WalkDir::new(dir_path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    Some(Ok(Self::object_id_from_path(&self.path, entry.path())))
                }
                Ok(_) => None,
                Err(e) => Some(Err(Error::StorageIo {
                    context: format!("unable to scan object directory {}", dir_path.display()),
                    source: e.into(),
                })),
            })
            .filter_map(|result| result.transpose())
            .collect()
    }

    // temp files and stray entries do not parse as ids and are skipped
    fn object_id_from_path(root: &Path, path: &Path) -> Option<ObjectId> {
        let relative: PathBuf = path.strip_prefix(root).ok()?.to_path_buf();
        let full_oid = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<String>();

        if full_oid.len() != OBJECT_ID_LENGTH {
            return None;
        }

        ObjectId::try_parse(full_oid)
    }
}

fn corrupt(object_id: &ObjectId, error: MalformedObject) -> Error {
    Error::corrupt_object(object_id, error.0)
}
