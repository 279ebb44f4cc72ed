//! Object types stored in the object database
//!
//! Every object is identified by the SHA-1 of its serialized form. There are two
//! kinds:
//!
//! - **Blob**: raw file content
//! - **Commit**: a complete snapshot (path -> blob id) plus parent, timestamp and message
//!
//! All objects share the on-disk envelope `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving abbreviated object ids
pub const MIN_ABBREV_LENGTH: usize = 4;
