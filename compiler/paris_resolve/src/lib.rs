//! Resource symbol resolution.
//!
//! Generated code must reference the resource holder regenerated for the
//! module being compiled, not the holder a library originally declared its
//! resources against. `RFinder` locates that holder once, then binds every
//! use-site `ResourceRef` to a concrete `ResourceSymbol`.

mod finder;
mod problem;

pub use finder::{HolderSource, RFinder};
pub use problem::ResolveError;
