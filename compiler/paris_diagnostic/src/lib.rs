//! Diagnostic system for the Paris processor.
//!
//! Every problem found while building the styleable model is a structured
//! `Diagnostic`:
//! - Error code for searchability (`E1xxx` resolution, `E2xxx` validation,
//!   `E3xxx` configuration, `E9xxx` internal)
//! - Clear message (what went wrong)
//! - Primary location (the offending declaration)
//! - Secondary locations (e.g. the other half of a conflict)
//!
//! # Deferred Reporting
//!
//! Diagnostics are collected by the `ErrorAggregator` across rounds and only
//! surface once the host signals the final round. Logging an error returns
//! an `ErrorGuaranteed` token, so a stage that drops a styleable can prove
//! the reason was recorded.
//!
//! ```text
//! let guarantee = errors.log(diagnostic);
//! fn build_one(..) -> Result<StyleableInfo, ErrorGuaranteed> { ... }
//! ```

mod aggregator;
mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;

pub use aggregator::ErrorAggregator;
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCode, ErrorKind};
pub use guarantee::ErrorGuaranteed;
