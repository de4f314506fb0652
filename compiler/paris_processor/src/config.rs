//! Processor configuration.

use std::path::PathBuf;

/// Settings for one processor run, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Name of the module being compiled; names the module index class and
    /// the manifest.
    pub module_name: String,
    /// Root directory generated sources and the manifest are written under.
    pub output_dir: PathBuf,
}

impl ProcessorConfig {
    pub const DEFAULT_MODULE: &'static str = "app";
    pub const DEFAULT_OUTPUT_DIR: &'static str = "build/generated/paris";

    pub fn new(module_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        ProcessorConfig {
            module_name: module_name.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig::new(Self::DEFAULT_MODULE, Self::DEFAULT_OUTPUT_DIR)
    }
}
