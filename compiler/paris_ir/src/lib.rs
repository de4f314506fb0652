//! Paris IR - declarations, extracted records and the styleable model.
//!
//! This crate is the contract between the external extraction step and the
//! rest of the processor:
//! - `DeclArena` / `DeclId` for stable declaration identity within a round
//! - Extracted info records (`AttrInfo`, `StyleInfo`, `HookInfo`, ...) as a
//!   closed `Record` variant
//! - Resource references as written (`ResourceRef`) and resolved
//!   (`ResourceSymbol`)
//! - The resolved `StyleableInfo` model and its serialized
//!   `StyleableDescriptor` form carried between modules
//!
//! # Design Philosophy
//!
//! - **Index, don't point**: declarations are addressed by `DeclId(u32)`,
//!   never by reference identity.
//! - **Closed records**: every record kind is a `Record` variant and is
//!   consumed by exhaustive matching.
//! - **Immutable rounds**: records are created once per round and never
//!   mutated afterwards.

mod decl;
mod decl_id;
mod format;
mod info;
mod location;
mod manifest;
pub mod naming;
mod resource;
mod round;
mod styleable;
mod type_name;

pub use decl::{ArenaFull, DeclArena, DeclKind, Declaration, Origin};
pub use decl_id::DeclId;
pub use format::Format;
pub use info::{
    AfterHookInfo, AttrInfo, BeforeHookInfo, ChildStyleableInfo, ConfigInfo, HookInfo, HookPhase,
    Record, StyleInfo, StyleSource, StyleableMarker,
};
pub use location::Location;
pub use manifest::{ModuleManifest, StyleableDescriptor};
pub use resource::{
    HolderRef, HolderSymbol, ResourceIndex, ResourceKind, ResourceRef, ResourceSymbol,
};
pub use round::{RoundBuilder, RoundInput};
pub use styleable::{Attr, Child, Hook, ResolvedStyleSource, Style, StyleableInfo};
pub use type_name::TypeName;
