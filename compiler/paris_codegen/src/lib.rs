//! Java code generation for Paris.
//!
//! ```text
//! StyleablesTree ── emit_appliers ──► one `<Styled>StyleApplier` per local styleable
//!                        │            (every round)
//!                        ▼
//!                   ModuleIndex ── emit ──► `ParisModule_<module>`, `Paris`, manifest
//!                                            (once, on the final round)
//! ```
//!
//! A problem in one applier is logged and the styleable is left out of the
//! index. Its local subclasses are skipped too, since their appliers would
//! delegate to a class that does not exist.

mod applier;
mod context;
mod facade;
mod index;
mod module;
mod problem;
pub mod runtime;

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use paris_diagnostic::ErrorAggregator;
use paris_ir::{DeclArena, DeclId, StyleableInfo};
use paris_model::StyleablesTree;

pub use applier::emit_applier;
pub use context::CodegenContext;
pub use facade::emit_facade;
pub use index::{ModuleIndex, ModuleOutputs};
pub use module::emit_module;
pub use problem::CodegenProblem;

/// One generated Java source file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratedFile {
    pub package: String,
    /// Simple name of the top-level class.
    pub type_name: String,
    pub contents: String,
}

impl GeneratedFile {
    /// Path relative to the source root: `com/example/Avatar.java`.
    pub fn path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.java", self.type_name));
        path
    }

    /// Qualified name of the top-level class.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }
}

/// Emit the appliers of the round's admitted local styleables, ancestors
/// first, and record what was generated in `index`.
///
/// A styleable whose local parent failed to emit is skipped with E2012.
#[tracing::instrument(level = "debug", skip_all)]
pub fn emit_appliers(
    tree: &StyleablesTree,
    arena: &DeclArena,
    index: &mut ModuleIndex,
    errors: &mut ErrorAggregator,
) -> Vec<GeneratedFile> {
    let mut local: Vec<&StyleableInfo> = tree.local().collect();
    local.sort_by_key(|info| tree.ancestors(info.decl).count());

    let mut files = Vec::with_capacity(local.len());
    let mut failed: FxHashSet<DeclId> = FxHashSet::default();
    for info in local {
        let result = match tree.parent(info.decl) {
            Some(parent) if failed.contains(&parent.decl) => {
                Err(CodegenProblem::ParentNotEmitted {
                    styleable: info.element.clone(),
                    parent: parent.element.clone(),
                    location: info.location.clone(),
                })
            }
            _ => emit_applier(tree, arena, info.decl),
        };
        match result {
            Ok(file) => {
                tracing::trace!(file = %file.qualified_name(), "emitted applier");
                index.record_local(arena, info);
                files.push(file);
            }
            Err(problem) => {
                failed.insert(info.decl);
                errors.log(problem.into_diagnostic());
            }
        }
    }

    for info in tree.external() {
        index.record_external(info);
    }

    tracing::debug!(files = files.len(), skipped = failed.len(), "appliers emitted");
    files
}
