//! On-disk storage backend rooted at a real directory.

use crate::error::StorageError;
use crate::store::{StorageBackend, StorageEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Storage backend writing through to a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    /// Open the storage root, creating it when it does not exist yet.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| StorageError::io("create root", root, e))?;
            debug!(root = %root.display(), "Created storage root");
        }
        if !root.is_dir() {
            return Err(StorageError::Root(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        let root = dunce::canonicalize(root).map_err(|e| StorageError::io("canonicalize", root, e))?;
        Ok(Self { root })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl StorageBackend for DiskStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn create_file(&mut self, path: &Path) -> Result<(), StorageError> {
        let full = self.resolve(path);
        fs::File::create(&full).map_err(|e| StorageError::io("create file", &full, e))?;
        debug!(path = %full.display(), "Created file");
        Ok(())
    }

    fn create_directory(&mut self, path: &Path) -> Result<(), StorageError> {
        let full = self.resolve(path);
        match fs::create_dir(&full) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists && full.is_dir() => {}
            Err(e) => return Err(StorageError::io("create directory", &full, e)),
        }
        debug!(path = %full.display(), "Created directory");
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<(), StorageError> {
        let full = self.resolve(path);
        let metadata = match fs::symlink_metadata(&full) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::io("remove", &full, e)),
        };
        let result = if metadata.is_dir() {
            fs::remove_dir_all(&full)
        } else {
            fs::remove_file(&full)
        };
        result.map_err(|e| StorageError::io("remove", &full, e))?;
        debug!(path = %full.display(), "Removed");
        Ok(())
    }

    fn rename(&mut self, from: &Path, to: &Path) -> Result<(), StorageError> {
        let source = self.resolve(from);
        let target = self.resolve(to);
        fs::rename(&source, &target).map_err(|e| StorageError::io("rename", &source, e))?;
        debug!(from = %source.display(), to = %target.display(), "Renamed");
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<StorageEntry>, StorageError> {
        let dir = self.resolve(path);
        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StorageError::Walk {
                path: dir.clone(),
                source: e,
            })?;
            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "Skipping entry with non-UTF-8 name");
                continue;
            };
            let name = name.to_string();
            let is_directory = entry.file_type().is_dir();
            let size = if is_directory {
                0
            } else {
                entry
                    .metadata()
                    .map_err(|e| StorageError::Walk {
                        path: entry.path().to_path_buf(),
                        source: e,
                    })?
                    .len()
            };
            entries.push(StorageEntry {
                name,
                is_directory,
                size,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let storage = DiskStorage::open(&root).unwrap();
        assert!(root.is_dir());
        assert!(storage.root().is_absolute());
    }

    #[test]
    fn test_open_rejects_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(matches!(DiskStorage::open(&file), Err(StorageError::Root(_))));
    }

    #[test]
    fn test_read_dir_sorted_with_sizes() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "hello").unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("a").join("inner"), "x").unwrap();

        let storage = DiskStorage::open(temp.path()).unwrap();
        let entries = storage.read_dir(Path::new("")).unwrap();
        assert_eq!(
            entries,
            vec![
                StorageEntry {
                    name: "a".to_string(),
                    is_directory: true,
                    size: 0
                },
                StorageEntry {
                    name: "b.txt".to_string(),
                    is_directory: false,
                    size: 5
                },
            ]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_dir_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(OsStr::from_bytes(b"bad\xffname"))).unwrap();
        fs::write(temp.path().join("good"), "x").unwrap();

        let storage = DiskStorage::open(temp.path()).unwrap();
        let entries = storage.read_dir(Path::new("")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["good"]);
    }

    #[test]
    fn test_mutations_reach_disk() {
        let temp = TempDir::new().unwrap();
        let mut storage = DiskStorage::open(temp.path()).unwrap();

        storage.create_directory(Path::new("docs")).unwrap();
        storage.create_directory(Path::new("docs")).unwrap();
        storage.create_file(Path::new("docs/a.txt")).unwrap();
        assert!(temp.path().join("docs/a.txt").is_file());

        storage.rename(Path::new("docs/a.txt"), Path::new("docs/b.txt")).unwrap();
        assert!(temp.path().join("docs/b.txt").is_file());

        storage.remove(Path::new("docs")).unwrap();
        assert!(!temp.path().join("docs").exists());
        storage.remove(Path::new("docs")).unwrap();
    }

    #[test]
    fn test_rename_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let mut storage = DiskStorage::open(temp.path()).unwrap();
        let err = storage
            .rename(Path::new("nope"), Path::new("other"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { op: "rename", .. }));
    }
}
