//! Runtime environment of a pipeline run.

use crate::compilation::Compilation;
use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::meta::Meta;

/// Context shared by the compile and execute phases of one run.
///
/// Owns the metadata store, the diagnostic sink, and the compilations
/// accumulated so far.
#[derive(Debug, Default)]
pub struct Environment {
    meta: Meta,
    diagnostic: Diagnostic,
    compilations: Vec<Compilation>,
}

impl Environment {
    /// Create an environment whose diagnostics go to stderr.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostic(diagnostic: Diagnostic) -> Self {
        Self {
            meta: Meta::new(),
            diagnostic,
            compilations: Vec::new(),
        }
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn diagnostic_mut(&mut self) -> &mut Diagnostic {
        &mut self.diagnostic
    }

    /// Compilations in the order they were added.
    pub fn compilation_set(&self) -> &[Compilation] {
        &self.compilations
    }

    /// Add a compilation, replacing any earlier compilation of the same
    /// document in place.
    pub fn add_compilation(&mut self, compilation: Compilation) {
        match self
            .compilations
            .iter_mut()
            .find(|c| c.root_document() == compilation.root_document())
        {
            Some(existing) => *existing = compilation,
            None => self.compilations.push(compilation),
        }
    }

    pub fn compilation(&self, document: &Document) -> Option<&Compilation> {
        self.compilations
            .iter()
            .find(|c| c.root_document() == document)
    }
}
