//! Environment construction from a parsed invocation.

use std::fs;
use std::path::{self, PathBuf};

use anyhow::Context;
use jamplate_core::meta::{MEMORY, OUTPUT, PROJECT};
use jamplate_core::{Diagnostic, Document, Environment};
use tracing::debug;

use crate::args::Invocation;

/// An environment ready for the pipeline, with its document hierarchy.
#[derive(Debug)]
pub struct Prepared {
    pub environment: Environment,
    pub documents: Vec<Document>,
}

/// Build the environment for `invocation`, reporting diagnostics to stderr.
pub fn build(invocation: &Invocation) -> anyhow::Result<Prepared> {
    build_with(invocation, Diagnostic::new())
}

/// Build the environment for `invocation` with the given diagnostic sink.
///
/// The input must exist. The output is made absolute but need not exist.
pub fn build_with(invocation: &Invocation, diagnostic: Diagnostic) -> anyhow::Result<Prepared> {
    let project = fs::canonicalize(invocation.input())
        .with_context(|| format!("Input not found: {}", invocation.input()))?;
    let output = resolve_output(invocation.output())?;

    let documents = Document::hierarchy(&project)
        .with_context(|| format!("Failed to load documents from {}", project.display()))?;
    debug!(
        "Resolved {} documents from {}",
        documents.len(),
        project.display()
    );

    let mut environment = Environment::with_diagnostic(diagnostic);
    let meta = environment.meta_mut();
    meta.put(MEMORY, invocation.default_memory().clone());
    meta.put(PROJECT, project);
    meta.put(OUTPUT, output);

    Ok(Prepared {
        environment,
        documents,
    })
}

fn resolve_output(output: &str) -> anyhow::Result<PathBuf> {
    path::absolute(output).with_context(|| format!("Invalid output path: {output}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> Diagnostic {
        Diagnostic::with_sink(std::io::sink())
    }

    #[test]
    fn test_metadata_is_populated() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let input = temp.path().join("site");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("index.jamplate"), "").unwrap();
        let output = temp.path().join("dist");

        let invocation = Invocation::parse([
            input.to_str().unwrap(),
            "title=Home",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let prepared = build_with(&invocation, quiet()).expect("Failed to build");
        let meta = prepared.environment.meta();

        assert_eq!(meta.get(MEMORY), Some(invocation.default_memory()));
        assert_eq!(meta.get(PROJECT), Some(&input.canonicalize().unwrap()));
        assert_eq!(meta.get(OUTPUT), Some(&output));
        assert_eq!(prepared.documents.len(), 1);
        assert!(prepared.environment.compilation_set().is_empty());
    }

    #[test]
    fn test_output_is_absolute() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let input = temp.path().join("page.jamplate");
        fs::write(&input, "").unwrap();

        let invocation = Invocation::new(input.to_str().unwrap());
        let prepared = build_with(&invocation, quiet()).expect("Failed to build");
        let output = prepared.environment.meta().get(OUTPUT).unwrap();

        assert!(output.is_absolute());
        assert!(output.ends_with(Invocation::DEFAULT_OUTPUT));
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let missing = temp.path().join("missing");

        let invocation = Invocation::new(missing.to_str().unwrap());
        let err = build_with(&invocation, quiet()).unwrap_err();
        assert!(err.to_string().contains("Input not found"));
    }
}
