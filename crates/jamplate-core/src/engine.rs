//! Compile and execute entry points.
//!
//! The pipeline drives an [`Engine`] in two phases: `compile` over the whole
//! document hierarchy, then `execute` over the selected compilations. Both
//! report problems through the environment's diagnostic sink and return
//! whether the phase succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::TEMPLATE_SUFFIX;
use crate::compilation::Compilation;
use crate::diagnostic::Message;
use crate::document::Document;
use crate::environment::Environment;
use crate::meta::{OUTPUT, PROJECT};

/// A template engine the pipeline can drive.
pub trait Engine {
    /// Compile `documents`, adding the results to the environment's
    /// compilation set.
    fn compile(&self, env: &mut Environment, documents: &[Document]) -> bool;

    /// Run the given compilations.
    fn execute(&self, env: &mut Environment, compilations: &[Compilation]) -> bool;
}

/// Engine that renders every template verbatim.
///
/// Each executed compilation is written to the output root at its path
/// relative to the project root, with the template suffix removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEngine;

impl LiteralEngine {
    pub fn new() -> Self {
        Self
    }

    fn target_path(project: &Path, output: &Path, document: &Document) -> PathBuf {
        let base = if project.is_dir() {
            project
        } else {
            project.parent().unwrap_or(Path::new(""))
        };

        let relative = match document.path().strip_prefix(base) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => PathBuf::from(document.path().file_name().unwrap_or_default()),
        };

        let name = relative.to_string_lossy();
        match name.strip_suffix(TEMPLATE_SUFFIX) {
            Some(stripped) => output.join(stripped),
            None => output.join(relative),
        }
    }
}

impl Engine for LiteralEngine {
    fn compile(&self, env: &mut Environment, documents: &[Document]) -> bool {
        let mut success = true;

        for document in documents {
            match document.read_to_string() {
                Ok(source) => {
                    tracing::debug!("Compiled {}", document);
                    env.add_compilation(Compilation::new(document.clone(), source));
                }
                Err(e) => {
                    env.diagnostic_mut().print(
                        Message::error(format!("cannot read document: {e}"))
                            .with_document(document.path()),
                    );
                    success = false;
                }
            }
        }

        success
    }

    fn execute(&self, env: &mut Environment, compilations: &[Compilation]) -> bool {
        let (project, output) = match (env.meta().get(PROJECT), env.meta().get(OUTPUT)) {
            (Some(project), Some(output)) => (project.clone(), output.clone()),
            _ => {
                env.diagnostic_mut()
                    .print(Message::error("project and output locations are not set"));
                return false;
            }
        };

        let mut success = true;

        for compilation in compilations {
            let document = compilation.root_document();
            let target = Self::target_path(&project, &output, document);

            let written = target
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| fs::write(&target, compilation.source()));

            match written {
                Ok(()) => {
                    tracing::info!("Wrote {}", target.display());
                    env.diagnostic_mut().print(
                        Message::note(format!("wrote {}", target.display()))
                            .with_document(document.path()),
                    );
                }
                Err(e) => {
                    env.diagnostic_mut().print(
                        Message::error(format!("cannot write {}: {e}", target.display()))
                            .with_document(document.path()),
                    );
                    success = false;
                }
            }
        }

        success
    }
}
