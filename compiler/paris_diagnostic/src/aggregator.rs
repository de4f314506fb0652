//! Deferred, deduplicated error collection across rounds.
//!
//! Stages log diagnostics as they find them; nothing surfaces until the host
//! marks a round as final. The same report produced again in a later round
//! (same code, message and primary location) is recorded once.

use rustc_hash::FxHashSet;

use paris_ir::Location;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Collects diagnostics for the whole processing run.
#[derive(Clone, Debug, Default)]
pub struct ErrorAggregator {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(ErrorCode, String, Location)>,
    error_count: usize,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and get proof it was recorded.
    ///
    /// Returns the proof even for a duplicate: the original report stands.
    pub fn log(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        let key = (diag.code, diag.message.clone(), diag.primary_location());
        if self.seen.insert(key) {
            if diag.is_error() {
                self.error_count += 1;
            }
            self.diagnostics.push(diag);
        }
        ErrorGuaranteed::new()
    }

    /// Check if any errors were recorded and get proof if so.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Number of distinct errors recorded and not yet surfaced.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of pending diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Pending diagnostics, in recording order.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Surface pending diagnostics, sorted by location, if this is the final
    /// round. Returns `None` (and keeps everything) otherwise.
    pub fn flush_if_over(&mut self, processing_over: bool) -> Option<Vec<Diagnostic>> {
        if !processing_over {
            return None;
        }
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_cached_key(Diagnostic::primary_location);
        self.error_count = 0;
        Some(out)
    }
}
