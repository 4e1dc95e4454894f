//! Snapshot persistence for the existence cache
//!
//! This module implements the on-disk format used to pre-warm the cache
//! across process restarts:
//! - Header: magic number, format version, payload checksum, payload length
//! - Payload: the full key -> existence mapping, JSON-encoded
//!
//! Snapshots are only ever read from trusted local paths. Validation rejects
//! truncated or corrupted files before any entry is applied, but the format is
//! not hardened against hostile input beyond that.

use crate::types::CacheKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// ============================================================================
// Constants
// ============================================================================

/// Snapshot magic number ("RXCF" in little endian)
pub const SNAPSHOT_MAGIC: u32 = 0x52584346;

/// Snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot header size: magic + version + checksum + payload length
pub const SNAPSHOT_HEADER_SIZE: usize = 20;

// ============================================================================
// Snapshot Error
// ============================================================================

/// Snapshot-related errors
#[derive(Debug)]
pub enum SnapshotError {
    /// No snapshot file at the given path
    NotFound(PathBuf),
    /// Header is shorter than expected or carries the wrong magic
    InvalidHeader,
    /// Snapshot was written by an unrecognized format version
    UnsupportedVersion(u32),
    /// Payload is shorter or longer than the header declares
    Truncated,
    /// Payload checksum mismatch
    ChecksumMismatch,
    /// Payload bytes do not decode to a key -> existence mapping
    Malformed(String),
    /// IO error
    Io(std::io::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NotFound(path) => {
                write!(f, "Snapshot file not found: {}", path.display())
            }
            SnapshotError::InvalidHeader => write!(f, "Invalid snapshot header"),
            SnapshotError::UnsupportedVersion(version) => {
                write!(f, "Unsupported snapshot version: {}", version)
            }
            SnapshotError::Truncated => write!(f, "Truncated snapshot payload"),
            SnapshotError::ChecksumMismatch => write!(f, "Snapshot checksum mismatch"),
            SnapshotError::Malformed(msg) => write!(f, "Malformed snapshot payload: {}", msg),
            SnapshotError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

// ============================================================================
// Encoding / Decoding
// ============================================================================

/// Serialized payload layout
///
/// A BTreeMap keeps the key order stable, so encoding the same mapping twice
/// yields byte-identical snapshots.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotPayload {
    entries: BTreeMap<CacheKey, bool>,
}

/// Encode a mapping into snapshot bytes (header + payload)
pub fn encode(entries: BTreeMap<CacheKey, bool>) -> SnapshotResult<Vec<u8>> {
    let payload = serde_json::to_vec(&SnapshotPayload { entries })
        .map_err(|err| SnapshotError::Malformed(err.to_string()))?;

    let mut bytes = Vec::with_capacity(SNAPSHOT_HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode snapshot bytes back into a mapping
///
/// The header and checksum are fully validated before the payload is parsed,
/// so a corrupt file never yields a partial mapping.
pub fn decode(bytes: &[u8]) -> SnapshotResult<BTreeMap<CacheKey, bool>> {
    if bytes.len() < SNAPSHOT_HEADER_SIZE {
        return Err(SnapshotError::InvalidHeader);
    }

    let magic = read_u32(bytes, 0);
    if magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::InvalidHeader);
    }

    let version = read_u32(bytes, 4);
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let checksum = read_u32(bytes, 8);
    let payload_len = read_u64(bytes, 12);

    let payload = &bytes[SNAPSHOT_HEADER_SIZE..];
    if payload.len() as u64 != payload_len {
        return Err(SnapshotError::Truncated);
    }

    if crc32fast::hash(payload) != checksum {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let parsed: SnapshotPayload =
        serde_json::from_slice(payload).map_err(|err| SnapshotError::Malformed(err.to_string()))?;

    Ok(parsed.entries)
}

/// Read a little-endian u32 at the given offset
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(raw)
}

/// Read a little-endian u64 at the given offset
fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(raw)
}

// ============================================================================
// File I/O
// ============================================================================

/// Write a snapshot to disk, replacing any existing file at `path`
///
/// The bytes go to a temporary sibling first and are renamed over the target,
/// so a failed write never leaves a partial file at `path`.
pub fn write_snapshot(path: &Path, entries: BTreeMap<CacheKey, bool>) -> SnapshotResult<()> {
    let bytes = encode(entries)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, &bytes)?;

    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(SnapshotError::Io(err));
    }

    Ok(())
}

/// Read and validate a snapshot from disk
pub fn read_snapshot(path: &Path) -> SnapshotResult<BTreeMap<CacheKey, bool>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SnapshotError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(SnapshotError::Io(err)),
    };

    decode(&bytes)
}

/// Temporary sibling path used while writing a snapshot
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
