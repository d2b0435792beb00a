//! Source documents and hierarchy resolution.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A source document backed by a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name of the document (its path as a string).
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// Read the document's content as text.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    pub fn read_to_string(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Resolve the documents rooted at `root`.
    ///
    /// A file root yields itself. A directory root yields every regular file
    /// beneath it, recursively, sorted by path.
    ///
    /// # Errors
    /// Returns [`Error::DocumentNotFound`] if `root` does not exist and
    /// [`Error::EmptyHierarchy`] if it is a directory with no files.
    pub fn hierarchy(root: &Path) -> Result<Vec<Document>> {
        if !root.exists() {
            return Err(Error::DocumentNotFound(root.to_path_buf()));
        }

        if !root.is_dir() {
            return Ok(vec![Document::new(root)]);
        }

        let mut files = Vec::new();
        collect_files(root, &mut files)?;
        if files.is_empty() {
            return Err(Error::EmptyHierarchy(root.to_path_buf()));
        }
        files.sort();

        tracing::debug!("Resolved {} documents under {}", files.len(), root.display());
        Ok(files.into_iter().map(Document::new).collect())
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
