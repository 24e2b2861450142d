//! Export destination abstraction
//!
//! The conversion engine writes through a [`Destination`] rather than
//! touching the filesystem directly: a destination hands out writable
//! streams by logical output name and performs verbatim file copies.
//! A `None` stream means "skip, no output".

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Where exported assets end up
pub trait Destination {
    /// Open a writable stream for the given logical output name.
    ///
    /// `Ok(None)` means the destination declines the output (for example an
    /// existing file without overwrite); the caller must skip the output
    /// without treating it as an error.
    fn create(&self, name: &str) -> io::Result<Option<Box<dyn Write>>>;

    /// Copy a source file verbatim to the given logical output name
    fn copy_file(&self, source: &Path, name: &str) -> io::Result<()>;
}

/// Filesystem-backed destination rooted at an output directory
pub struct FsDestination {
    root: PathBuf,
    overwrite: bool,
}

impl FsDestination {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overwrite: false,
        }
    }

    /// Allow replacing files that already exist at the destination
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }
}

impl Destination for FsDestination {
    fn create(&self, name: &str) -> io::Result<Option<Box<dyn Write>>> {
        let path = self.resolve(name)?;
        if !self.overwrite && path.exists() {
            return Ok(None);
        }
        let file = File::create(path)?;
        Ok(Some(Box::new(BufWriter::new(file))))
    }

    fn copy_file(&self, source: &Path, name: &str) -> io::Result<()> {
        let path = self.resolve(name)?;
        if !self.overwrite && path.exists() {
            return Ok(());
        }
        fs::copy(source, path)?;
        Ok(())
    }
}

/// In-memory destination capturing outputs, for tests and dry runs
#[derive(Default, Clone)]
pub struct MemoryDestination {
    state: Rc<RefCell<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    files: BTreeMap<String, Vec<u8>>,
    copies: Vec<(PathBuf, String)>,
    declined: Vec<String>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` return `None` for the given output name
    pub fn decline(&self, name: impl Into<String>) {
        self.state.borrow_mut().declined.push(name.into());
    }

    /// Bytes written under the given output name, if any
    pub fn written(&self, name: &str) -> Option<Vec<u8>> {
        self.state.borrow().files.get(name).cloned()
    }

    /// Names of all outputs written through streams
    pub fn written_names(&self) -> Vec<String> {
        self.state.borrow().files.keys().cloned().collect()
    }

    /// All `copy_file` calls, in order
    pub fn copies(&self) -> Vec<(PathBuf, String)> {
        self.state.borrow().copies.clone()
    }
}

impl Destination for MemoryDestination {
    fn create(&self, name: &str) -> io::Result<Option<Box<dyn Write>>> {
        if self.state.borrow().declined.iter().any(|n| n == name) {
            return Ok(None);
        }
        Ok(Some(Box::new(MemoryWriter {
            state: Rc::clone(&self.state),
            name: name.to_string(),
            buffer: Vec::new(),
        })))
    }

    fn copy_file(&self, source: &Path, name: &str) -> io::Result<()> {
        self.state
            .borrow_mut()
            .copies
            .push((source.to_path_buf(), name.to_string()));
        Ok(())
    }
}

/// Buffers bytes and commits them as one file when the stream closes
struct MemoryWriter {
    state: Rc<RefCell<MemoryState>>,
    name: String,
    buffer: Vec<u8>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        self.state
            .borrow_mut()
            .files
            .insert(self.name.clone(), std::mem::take(&mut self.buffer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_destination_captures_stream_writes() {
        let destination = MemoryDestination::new();
        {
            let mut stream = destination.create("Textures/out.png").unwrap().unwrap();
            stream.write_all(b"pixels").unwrap();
        }
        assert_eq!(destination.written("Textures/out.png").unwrap(), b"pixels");
    }

    #[test]
    fn test_memory_destination_decline() {
        let destination = MemoryDestination::new();
        destination.decline("skip.png");
        assert!(destination.create("skip.png").unwrap().is_none());
        assert!(destination.create("keep.png").unwrap().is_some());
    }

    #[test]
    fn test_fs_destination_skips_existing_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let destination = FsDestination::new(dir.path());

        {
            let mut stream = destination.create("a.png").unwrap().unwrap();
            stream.write_all(b"first").unwrap();
        }
        assert!(destination.create("a.png").unwrap().is_none());

        let destination = FsDestination::new(dir.path()).with_overwrite(true);
        assert!(destination.create("a.png").unwrap().is_some());
    }

    #[test]
    fn test_fs_destination_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let destination = FsDestination::new(dir.path());
        {
            let mut stream = destination.create("Textures/Ship/a.png").unwrap().unwrap();
            stream.write_all(b"data").unwrap();
        }
        assert!(dir.path().join("Textures/Ship/a.png").exists());
    }
}
