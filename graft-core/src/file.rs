use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

/// Read a UTF-8 file, returning `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace the file at `path` with `content` in a single rename.
///
/// The content goes to a temporary file in the target directory first, so a
/// failed write never leaves a truncated file behind. Permissions of an
/// existing file are carried over.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Whether [`File::write`] touched the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file already held exactly this content.
    Unchanged,
}

/// Rendered content bound for `path`.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Write the file atomically unless the on-disk bytes already match.
    pub fn write(&self) -> io::Result<WriteResult> {
        if read_if_exists(&self.path)?.as_deref() == Some(self.content.as_str()) {
            return Ok(WriteResult::Unchanged);
        }
        write_atomic(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_read_if_exists_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.ts");

        assert_eq!(read_if_exists(&path).unwrap(), None);
    }

    #[test]
    fn test_read_if_exists_present() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.ts");
        fs::write(&path, "class App {}\n").unwrap();

        assert_eq!(
            read_if_exists(&path).unwrap().as_deref(),
            Some("class App {}\n")
        );
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_atomic(&path, "hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.txt");

        write_atomic(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_atomic_replaces_and_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_write_reports_written() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_file_write_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("src/app.ts");

        assert_eq!(
            File::new(&path, "class App {}\n").write().unwrap(),
            WriteResult::Written
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "class App {}\n");
    }
}
