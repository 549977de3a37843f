//! Byte-exact file IO for patch sessions.
//!
//! The mutated image reaches disk only after the full validated mutation
//! sequence succeeds: the buffer is written to a temp file in the destination
//! directory and renamed over the target in one step.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write `bytes` to `path`, replacing any existing file only once the full
/// buffer is on disk. The temp file lives next to the destination so the
/// final rename stays on one filesystem.
pub fn write_image_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Byte-for-byte copy, overwriting the destination
pub fn backup_copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    fs::copy(&src, &dst)?;
    debug!(
        "Copied {} -> {}",
        src.as_ref().display(),
        dst.as_ref().display()
    );
    Ok(())
}

/// Remove a temporary artifact; a missing file is not an error
pub fn remove_temp<P: AsRef<Path>>(path: P) -> Result<()> {
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
