//! Run-wide record of generated styleables.
//!
//! Appliers are emitted round by round. The module class, the facade and
//! the manifest describe the whole module, so they are emitted once, from
//! this index, on the final round.

use paris_ir::{DeclArena, ModuleManifest, StyleableDescriptor, StyleableInfo};

use crate::facade::emit_facade;
use crate::module::emit_module;
use crate::GeneratedFile;

/// Styleables generated in this run, plus the dependency styleables seen.
#[derive(Clone, Debug, Default)]
pub struct ModuleIndex {
    local: Vec<StyleableInfo>,
    /// Manifest entries for `local`, in the same order.
    descriptors: Vec<StyleableDescriptor>,
    external: Vec<StyleableInfo>,
}

/// Output emitted once per run.
#[derive(Clone, Debug, Default)]
pub struct ModuleOutputs {
    pub files: Vec<GeneratedFile>,
    /// Present when at least one local applier was generated.
    pub manifest: Option<ModuleManifest>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local styleables whose applier was generated, in emission order.
    pub fn local(&self) -> &[StyleableInfo] {
        &self.local
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// Record a local styleable whose applier was emitted.
    ///
    /// The supertype chain for the manifest comes from `arena`, the
    /// declarations of the round the applier was emitted in.
    pub fn record_local(&mut self, arena: &DeclArena, info: &StyleableInfo) {
        let supertypes = arena.supertypes(&info.styled_type).cloned().collect();
        self.descriptors.push(info.to_descriptor(supertypes));
        self.local.push(info.clone());
    }

    /// Record a dependency styleable. Later rounds repeat the same
    /// manifests; the first copy is kept.
    pub fn record_external(&mut self, info: &StyleableInfo) {
        if self
            .external
            .iter()
            .any(|known| known.styled_type == info.styled_type)
        {
            return;
        }
        self.external.push(info.clone());
    }

    /// Emit the module class, the facade when `facade_package` is set, and
    /// the manifest. Emits nothing when no local applier was generated.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn emit(&self, module: &str, facade_package: Option<&str>) -> ModuleOutputs {
        let mut outputs = ModuleOutputs::default();
        if self.local.is_empty() {
            tracing::debug!("no local styleables to index");
            return outputs;
        }

        let local: Vec<&StyleableInfo> = self.local.iter().collect();
        outputs.files.push(emit_module(module, &local));

        if let Some(package) = facade_package {
            let mut covered = local.clone();
            // A local styleable shadows a dependency's for the same styled type.
            covered.extend(self.external.iter().filter(|external| {
                !self
                    .local
                    .iter()
                    .any(|l| l.styled_type == external.styled_type)
            }));
            outputs.files.push(emit_facade(package, &covered));
        }

        let mut manifest = ModuleManifest::new(module);
        manifest.styleables.clone_from(&self.descriptors);
        outputs.manifest = Some(manifest);

        tracing::debug!(
            local = self.local.len(),
            external = self.external.len(),
            "module outputs emitted"
        );
        outputs
    }
}

#[cfg(test)]
mod tests;
