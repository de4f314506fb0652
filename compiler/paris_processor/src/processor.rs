//! The per-process context and the per-round pipeline.

use paris_codegen::{emit_appliers, GeneratedFile, ModuleIndex};
use paris_diagnostic::{Diagnostic, ErrorAggregator};
use paris_ir::{
    ConfigInfo, DeclArena, ModuleManifest, Record, ResourceIndex, ResourceRef, RoundInput,
    StyleableInfo,
};
use paris_model::{build_tree, fold_external, ModelBuilder};
use paris_resolve::RFinder;

use crate::ProcessorConfig;

/// The config declaration frozen by the first round that carried one.
#[derive(Clone, Debug)]
struct FrozenConfig {
    info: ConfigInfo,
    /// Package of the config declaration; the facade is emitted there.
    package: String,
}

/// Round data every stage reads. Built once per round and discarded at its
/// end.
#[derive(Debug)]
pub struct RoundContext {
    pub arena: DeclArena,
    pub records: Vec<Record>,
    pub resources: ResourceIndex,
    pub known_holders: Vec<String>,
    /// Styleables of dependency modules, bound into `arena`.
    pub external: Vec<StyleableInfo>,
    pub processing_over: bool,
}

impl RoundContext {
    /// Take over a round's input, folding external manifests into the arena.
    pub fn new(input: RoundInput, errors: &mut ErrorAggregator) -> Self {
        let mut arena = input.declarations;
        let external = fold_external(&mut arena, &input.external, errors);
        RoundContext {
            arena,
            records: input.records,
            resources: input.resources,
            known_holders: input.known_holders,
            external,
            processing_over: input.processing_over,
        }
    }

    fn configs(&self) -> impl Iterator<Item = &ConfigInfo> {
        self.records.iter().filter_map(|r| match r {
            Record::Config(config) => Some(config),
            _ => None,
        })
    }

    /// Resources referenced by attributes and child styleables.
    fn references(&self) -> impl Iterator<Item = &ResourceRef> {
        self.records.iter().filter_map(|r| match r {
            Record::Attr(attr) => Some(&attr.resource),
            Record::ChildStyleable(child) => Some(&child.resource),
            _ => None,
        })
    }

    fn styleable_packages(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::Styleable(marker) => Some(self.arena.package_of(marker.decl)),
            _ => None,
        })
    }
}

/// Result of one round.
#[derive(Clone, Debug, Default)]
pub struct RoundOutput {
    pub files: Vec<GeneratedFile>,
    /// Present on the final round when the run generated local appliers.
    pub manifest: Option<ModuleManifest>,
    /// Everything logged so far; only populated on the final round.
    pub diagnostics: Vec<Diagnostic>,
}

/// Processor state that outlives rounds.
pub struct Processor {
    config: ProcessorConfig,
    errors: ErrorAggregator,
    finder: RFinder,
    frozen: Option<FrozenConfig>,
    /// Appliers generated so far; the module outputs are built from it.
    index: ModuleIndex,
    initialized: bool,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Processor {
            config,
            errors: ErrorAggregator::new(),
            finder: RFinder::new(),
            frozen: None,
            index: ModuleIndex::new(),
            initialized: false,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The config declaration in effect, if one has been seen.
    pub fn frozen_config(&self) -> Option<&ConfigInfo> {
        self.frozen.as_ref().map(|f| &f.info)
    }

    pub fn resolver(&self) -> &RFinder {
        &self.finder
    }

    /// Styleables generated so far in this run.
    pub fn generated(&self) -> &ModuleIndex {
        &self.index
    }

    /// Number of errors logged and not yet surfaced.
    pub fn error_count(&self) -> usize {
        self.errors.error_count()
    }

    /// One-time setup. Later calls are ignored.
    pub fn init(&mut self) {
        if self.initialized {
            tracing::debug!("processor already initialized");
            return;
        }
        crate::init_tracing();
        self.initialized = true;
        tracing::debug!(module = %self.config.module_name, "processor initialized");
    }

    /// Run one round.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.config.module_name))]
    pub fn process(&mut self, input: RoundInput) -> RoundOutput {
        if !self.initialized {
            self.init();
        }

        let mut ctx = RoundContext::new(input, &mut self.errors);
        self.freeze_config(&ctx);
        self.finder
            .locate(ctx.references(), ctx.styleable_packages(), &ctx.known_holders);
        tracing::debug!(
            holder = ?self.finder.holder(),
            source = ?self.finder.source(),
            "resource holder"
        );

        let local =
            ModelBuilder::new(&ctx.arena, &ctx.resources, &mut self.finder, &mut self.errors)
                .build(&ctx.records);
        tracing::debug!(
            local = local.len(),
            external = ctx.external.len(),
            "styleables built"
        );

        let external = std::mem::take(&mut ctx.external);
        let tree = build_tree(&ctx.arena, local, external, &mut self.errors);

        let mut output = RoundOutput {
            files: emit_appliers(&tree, &ctx.arena, &mut self.index, &mut self.errors),
            ..RoundOutput::default()
        };

        if ctx.processing_over {
            let facade_package = self.frozen.as_ref().map(|f| f.package.as_str());
            let outputs = self.index.emit(&self.config.module_name, facade_package);
            output.files.extend(outputs.files);
            output.manifest = outputs.manifest;
        }

        output.diagnostics = self
            .errors
            .flush_if_over(ctx.processing_over)
            .unwrap_or_default();
        output
    }

    /// Freeze the first config seen; later ones are ignored.
    fn freeze_config(&mut self, ctx: &RoundContext) {
        for config in ctx.configs() {
            if self.frozen.is_some() {
                tracing::debug!(
                    location = %ctx.arena.location(config.decl),
                    "config already frozen, ignoring"
                );
                continue;
            }
            if let Err(problem) = self.finder.configure(config) {
                self.errors
                    .log(problem.into_diagnostic(ctx.arena.location(config.decl)));
            }
            self.frozen = Some(FrozenConfig {
                info: config.clone(),
                package: ctx.arena.package_of(config.decl).to_string(),
            });
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new(ProcessorConfig::default())
    }
}
