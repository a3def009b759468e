//! Byte-sinks: where generated files go.
//!
//! The core never persists anything itself. It hands `(name, bytes)` pairs
//! to a [`ByteSink`] supplied by the caller. When one emit fails, the files
//! already emitted in that run are handed back through [`ByteSink::discard`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Destination for generated files.
pub trait ByteSink {
    /// Persist one file.
    fn emit(&mut self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Drop the last `count` emitted files after a later emit failed.
    ///
    /// Sinks that cannot take anything back keep the default, which does
    /// nothing.
    fn discard(&mut self, count: usize) {
        let _ = count;
    }
}

/// Collects emitted files in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitted files in emission order.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }

    /// Emitted file names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of emitted files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ByteSink for MemorySink {
    fn emit(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn discard(&mut self, count: usize) {
        let keep = self.files.len().saturating_sub(count);
        self.files.truncate(keep);
    }
}

/// Writes each file into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ByteSink for DirectorySink {
    fn emit(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Only the final path component is used so names cannot escape the directory.
        let file_name = Path::new(name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| name.into());
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        self.written.push(path);
        Ok(())
    }

    /// Removes the files from disk. A file that overwrote an existing one
    /// is removed as well.
    fn discard(&mut self, count: usize) {
        let keep = self.written.len().saturating_sub(count);
        for path in self.written.drain(keep..) {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed {}", path.display()),
                Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}
