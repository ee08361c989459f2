//! The filesystem seam the resolver reads through.
//!
//! A trait rather than a direct `std::fs` call so hosts embedding the
//! compiler (and this crate's own tests) can supply sources from memory,
//! a bundle, or a virtual filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Reads DSL source files by path.
pub trait FileLoader {
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// The production loader, backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileLoader;

impl FileLoader for StdFileLoader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// An in-memory loader for tests: paths are looked up verbatim in a map.
#[derive(Debug, Default, Clone)]
pub struct MapFileLoader {
    files: HashMap<PathBuf, String>,
}

impl MapFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl FileLoader for MapFileLoader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file in MapFileLoader: {}", path.display()),
            )
        })
    }
}
