// src/fs/mod.rs

use std::fmt::Debug;
use std::fs::{self, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface used by the glob tracker and the output
/// components.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the file contents in one step; readers never observe a
    /// partially written file.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Remove a file. Returns `Ok(false)` if it did not exist.
    fn remove_file(&self, path: &Path) -> Result<bool>;

    /// Create a directory and its ancestors. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// True if `path` itself is a symbolic link (not followed).
    fn is_symlink(&self, path: &Path) -> bool;

    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;

        // Stage next to the target so the final rename stays on one filesystem.
        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temp file in {:?}", parent))?;
        staged
            .write_all(contents)
            .with_context(|| format!("writing temp file for {:?}", path))?;

        // The staged file is created 0600; give it the mode of the file it
        // replaces instead.
        let perms = match fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(perms) = perms {
            staged
                .as_file()
                .set_permissions(perms)
                .with_context(|| format!("setting permissions for {:?}", path))?;
        }

        staged
            .persist(path)
            .with_context(|| format!("replacing file {:?}", path))?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| format!("removing file {:?}", path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
