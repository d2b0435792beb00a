//! Compiled documents.

use crate::TEMPLATE_SUFFIX;
use crate::document::Document;

/// The result of compiling one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    root: Document,
    source: String,
}

impl Compilation {
    pub fn new(root: Document, source: impl Into<String>) -> Self {
        Self {
            root,
            source: source.into(),
        }
    }

    /// The document this compilation was produced from.
    pub fn root_document(&self) -> &Document {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the root document is a primary template unit.
    pub fn is_template(&self) -> bool {
        self.root.name().ends_with(TEMPLATE_SUFFIX)
    }
}
