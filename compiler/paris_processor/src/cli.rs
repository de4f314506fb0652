//! The `parisc` command line: feeds round files to a processor in order.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use paris_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use paris_diagnostic::Severity;
use paris_ir::RoundInput;

use crate::{DirectoryFiler, Filer, FilerError, Processor, ProcessorConfig};

/// Driver failure outside the diagnostics the processor reports.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read round `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed round `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Filer(#[from] FilerError),
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    /// Round files, in processing order. The last one is the final round.
    pub rounds: Vec<PathBuf>,
    pub config: ProcessorConfig,
}

impl CliOptions {
    pub const USAGE: &'static str = "Usage: parisc <round.json>... [-o <dir>] [--module <name>]";

    /// Parse arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Self, DriverError> {
        let mut config = ProcessorConfig::default();
        let mut rounds = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "-o" | "--out" | "--module" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err(DriverError::Usage(format!("missing value for `{arg}`")));
                    };
                    if arg == "--module" {
                        config.module_name.clone_from(value);
                    } else {
                        config.output_dir = PathBuf::from(value);
                    }
                    i += 2;
                }
                _ if arg.starts_with('-') => {
                    return Err(DriverError::Usage(format!("unknown option `{arg}`")));
                }
                _ => {
                    rounds.push(PathBuf::from(arg));
                    i += 1;
                }
            }
        }

        if rounds.is_empty() {
            return Err(DriverError::Usage("no round files given".to_string()));
        }
        Ok(CliOptions { rounds, config })
    }
}

/// Run every round, write the output and print diagnostics.
///
/// Returns the number of errors reported.
pub fn run(options: &CliOptions) -> Result<usize, DriverError> {
    let mut processor = Processor::new(options.config.clone());
    processor.init();
    let mut filer = DirectoryFiler::new(&options.config.output_dir);
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, io::stderr().is_terminal());

    let last = options.rounds.len().saturating_sub(1);
    let mut diagnostics = Vec::new();
    for (i, path) in options.rounds.iter().enumerate() {
        let text = fs::read_to_string(path).map_err(|source| DriverError::Read {
            path: path.clone(),
            source,
        })?;
        let mut input: RoundInput =
            serde_json::from_str(&text).map_err(|source| DriverError::Parse {
                path: path.clone(),
                source,
            })?;
        input.processing_over = i == last;

        tracing::debug!(round = i, path = %path.display(), "processing round");
        let output = processor.process(input);
        filer.write_output(&output)?;
        diagnostics.extend(output.diagnostics);
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(errors, warnings);
    emitter.flush();
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_rounds_and_options() {
        let options = CliOptions::parse(&args(&[
            "round1.json",
            "-o",
            "out",
            "round2.json",
            "--module",
            "feature",
        ]))
        .unwrap();

        assert_eq!(
            options.rounds,
            vec![PathBuf::from("round1.json"), PathBuf::from("round2.json")]
        );
        assert_eq!(options.config, ProcessorConfig::new("feature", "out"));
    }

    #[test]
    fn defaults_apply_without_options() {
        let options = CliOptions::parse(&args(&["round.json"])).unwrap();
        assert_eq!(options.config, ProcessorConfig::default());
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(
            CliOptions::parse(&args(&[])),
            Err(DriverError::Usage(_))
        ));
        assert!(matches!(
            CliOptions::parse(&args(&["round.json", "-o"])),
            Err(DriverError::Usage(_))
        ));
        assert!(matches!(
            CliOptions::parse(&args(&["--verbose", "round.json"])),
            Err(DriverError::Usage(_))
        ));
    }
}
