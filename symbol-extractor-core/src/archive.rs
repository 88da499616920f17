//! Packs a sources directory into a gzip-compressed tarball.
//!
//! The tarball is written to `archive.tgz` inside a fresh temporary directory and
//! read back into memory. The temporary directory is removed when its guard drops,
//! on success as well as on every error path.

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, error};

/// File name of the tarball, both on disk and in the upload.
pub const ARCHIVE_FILENAME: &str = "archive.tgz";

/// Creates a gzip-compressed tar of every file under `source_dir`, with paths
/// relative to `source_dir` (the directory itself is the `.` entry).
///
/// Filesystem errors are returned as-is.
pub fn create_archive(source_dir: &Path) -> io::Result<Vec<u8>> {
    create_archive_in(source_dir, &std::env::temp_dir())
}

/// Like [`create_archive`], with the temporary `archive.tgz` placed in a fresh
/// directory under `temp_root`. Nothing is left under `temp_root` on return.
pub fn create_archive_in(source_dir: &Path, temp_root: &Path) -> io::Result<Vec<u8>> {
    let metadata = fs::metadata(source_dir).map_err(|e| {
        error!(error = ?e, path = %source_dir.display(), "Sources directory is not readable");
        e
    })?;
    if !metadata.is_dir() {
        error!(path = %source_dir.display(), "Sources path is not a directory");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", source_dir.display()),
        ));
    }

    let temp_dir = tempfile::tempdir_in(temp_root)?;
    let archive_path = temp_dir.path().join(ARCHIVE_FILENAME);

    let file = File::create(&archive_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);
    builder.append_dir_all(".", source_dir).map_err(|e| {
        error!(error = ?e, path = %source_dir.display(), "Failed to add sources to archive");
        e
    })?;
    builder.into_inner()?.finish()?;

    let bytes = fs::read(&archive_path)?;
    debug!(
        path = %source_dir.display(),
        size = bytes.len(),
        "Packed sources into archive"
    );
    Ok(bytes)
}

/// Lowercase hex SHA-256 of an archive, for correlating uploads in logs.
pub fn archive_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
