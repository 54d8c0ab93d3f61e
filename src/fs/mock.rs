// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem for tests.
///
/// Paths are used verbatim as keys, so tests should stick to one spelling
/// (absolute paths such as `/proj/src/a.scss` work best). Any path under a
/// prefix registered with [`MockFileSystem::deny_writes_under`] rejects
/// writes, removals and directory creation. Paths registered with
/// [`MockFileSystem::mark_symlink`] report as symbolic links; their entries
/// are otherwise ordinary.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    read_only: Arc<Mutex<Vec<PathBuf>>>,
    symlinks: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            read_only: Arc::new(Mutex::new(Vec::new())),
            symlinks: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.lock();
        files.insert(path.clone(), MockEntry::File(content.into()));

        // Ensure parent directories exist implicitly for simplicity in this mock
        if let Some(parent) = path.parent() {
            let parent = non_empty(parent);
            Self::ensure_dir_entry(&mut files, parent);
            Self::link_child(&mut files, parent, &path);
        }
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.lock();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Make every path under `prefix` reject mutation.
    pub fn deny_writes_under(&self, prefix: impl AsRef<Path>) {
        self.read_only
            .lock()
            .unwrap()
            .push(prefix.as_ref().to_path_buf());
    }

    /// Report `path` as a symbolic link.
    pub fn mark_symlink(&self, path: impl AsRef<Path>) {
        self.symlinks
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    /// Contents of a file as UTF-8, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.lock().get(path.as_ref()) {
            Some(MockEntry::File(bytes)) => String::from_utf8(bytes.clone()).ok(),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.lock().unwrap()
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        let denied = self.read_only.lock().unwrap();
        if denied.iter().any(|prefix| path.starts_with(prefix)) {
            bail!("Permission denied: {:?}", path);
        }
        Ok(())
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
        if let Some(parent) = path.parent() {
            let parent = non_empty(parent);
            if parent != path {
                Self::ensure_dir_entry(files, parent);
                Self::link_child(files, parent, path);
            }
        }
    }

    fn link_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }
}

fn non_empty(parent: &Path) -> &Path {
    if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let files = self.lock();
        match files.get(path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.check_writable(path)?;
        self.add_file(path, contents);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        self.check_writable(path)?;
        let mut files = self.lock();
        match files.get(path) {
            Some(MockEntry::File(_)) => {}
            Some(MockEntry::Dir(_)) => bail!("Is a directory: {:?}", path),
            None => return Ok(false),
        }
        files.remove(path);
        let name = path.file_name().and_then(|n| n.to_str());
        if let (Some(parent), Some(name)) = (path.parent(), name) {
            if let Some(MockEntry::Dir(children)) = files.get_mut(non_empty(parent)) {
                children.retain(|c| c != name);
            }
        }
        Ok(true)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.check_writable(path)?;
        let mut files = self.lock();
        if let Some(MockEntry::File(_)) = files.get(path) {
            bail!("Not a directory: {:?}", path);
        }
        Self::ensure_dir_entry(&mut files, path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(MockEntry::Dir(_)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.symlinks.lock().unwrap().contains(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // In mock, we just return the path as is, assuming absolute paths are used in tests
        Ok(path.to_path_buf())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.lock();
        match files.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
