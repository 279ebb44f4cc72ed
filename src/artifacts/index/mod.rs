//! Staging index file format
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "GLIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged addition count (4 bytes)
//!   - Staged removal count (4 bytes)
//!
//! Additions, sorted by path:
//!   - Blob id (20 bytes)
//!   - Path length (2 bytes) followed by the path bytes
//!
//! Removals, sorted by path:
//!   - Path length (2 bytes) followed by the path bytes
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16; // marker, version, additions count, removals count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "GLIX";

/// Index file format version
pub const VERSION: u32 = 1;
