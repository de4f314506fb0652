//! Writing generated sources and manifests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use paris_codegen::GeneratedFile;
use paris_ir::ModuleManifest;

use crate::RoundOutput;

/// Error writing generated output.
#[derive(Debug, thiserror::Error)]
pub enum FilerError {
    #[error("`{}` was already generated in this run", path.display())]
    AlreadyWritten { path: PathBuf },

    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialize manifest for module `{module}`: {source}")]
    Manifest {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Destination for generated output.
pub trait Filer {
    /// Write one generated source file.
    fn write_source(&mut self, file: &GeneratedFile) -> Result<(), FilerError>;

    /// Write the module manifest.
    fn write_manifest(&mut self, manifest: &ModuleManifest) -> Result<(), FilerError>;

    /// Write everything a round produced.
    fn write_output(&mut self, output: &RoundOutput) -> Result<(), FilerError> {
        for file in &output.files {
            self.write_source(file)?;
        }
        if let Some(manifest) = &output.manifest {
            self.write_manifest(manifest)?;
        }
        Ok(())
    }
}

/// Writes under an output root: sources at `package/as/path/Name.java`,
/// the manifest under `META-INF/paris/`.
///
/// A source path may be written once per run.
pub struct DirectoryFiler {
    root: PathBuf,
    written: FxHashSet<PathBuf>,
}

impl DirectoryFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryFiler {
            root: root.into(),
            written: FxHashSet::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths written so far, relative to the root.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.written.iter().map(PathBuf::as_path)
    }

    fn write(&self, relative: &Path, contents: &str) -> Result<(), FilerError> {
        let path = self.root.join(relative);
        let io_error = |source| FilerError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, contents).map_err(io_error)?;
        tracing::debug!(path = %path.display(), "wrote generated file");
        Ok(())
    }
}

impl Filer for DirectoryFiler {
    fn write_source(&mut self, file: &GeneratedFile) -> Result<(), FilerError> {
        let relative = file.path();
        if self.written.contains(&relative) {
            return Err(FilerError::AlreadyWritten { path: relative });
        }
        self.write(&relative, &file.contents)?;
        self.written.insert(relative);
        Ok(())
    }

    fn write_manifest(&mut self, manifest: &ModuleManifest) -> Result<(), FilerError> {
        let json = serde_json::to_string_pretty(manifest).map_err(|source| FilerError::Manifest {
            module: manifest.module.clone(),
            source,
        })?;
        let relative = PathBuf::from(manifest.relative_path());
        self.write(&relative, &json)?;
        self.written.insert(relative);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
