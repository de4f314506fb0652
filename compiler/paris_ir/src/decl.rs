//! Declaration arena.
//!
//! The extraction step allocates every type, method and field it reports
//! into a `DeclArena`; records then refer to declarations by `DeclId`.
//! External styleables folded in from dependency manifests are allocated
//! into the same arena with `Origin::External`, so the whole type hierarchy
//! of a round is reachable through one index.

use std::ops::Index;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{DeclId, Location, TypeName};

/// Whether a declaration comes from this round's sources or a dependency.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Local,
    External,
}

/// The shape of a declaration.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    /// A class. `supertype` is `None` at a hierarchy root.
    Type {
        ty: TypeName,
        #[serde(default)]
        supertype: Option<TypeName>,
    },
    /// A method declared in `owner`.
    Method {
        owner: DeclId,
        #[serde(default)]
        params: Vec<TypeName>,
        #[serde(default)]
        is_static: bool,
    },
    /// A field declared in `owner`.
    Field {
        owner: DeclId,
        ty: TypeName,
        #[serde(default)]
        is_static: bool,
    },
}

/// One declaration reported by the extraction step.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Declaration {
    /// Simple element name (class simple name, method or field name).
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclKind,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub origin: Origin,
}

impl Declaration {
    /// The declared type, for type declarations.
    pub fn type_name(&self) -> Option<&TypeName> {
        match &self.kind {
            DeclKind::Type { ty, .. } => Some(ty),
            DeclKind::Method { .. } | DeclKind::Field { .. } => None,
        }
    }

    /// The enclosing type declaration, for members.
    pub fn owner(&self) -> Option<DeclId> {
        match &self.kind {
            DeclKind::Method { owner, .. } | DeclKind::Field { owner, .. } => Some(*owner),
            DeclKind::Type { .. } => None,
        }
    }

    /// Check whether this is a type declaration.
    pub fn is_type(&self) -> bool {
        matches!(self.kind, DeclKind::Type { .. })
    }
}

/// Arena of all declarations in a round.
///
/// Type declarations are additionally indexed by `TypeName`. When the same
/// type is allocated twice the first allocation keeps the index, so local
/// declarations (allocated by the extractor) win over external ones
/// (appended by the processor afterwards).
#[derive(Clone, Debug, Default)]
pub struct DeclArena {
    decls: Vec<Declaration>,
    types: FxHashMap<TypeName, DeclId>,
}

impl DeclArena {
    /// Most declarations one arena holds: one per `u32` id.
    pub const CAPACITY: u64 = u32::MAX as u64 + 1;

    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a declaration and return its ID.
    ///
    /// # Panics
    /// Panics if the arena already holds [`DeclArena::CAPACITY`]
    /// declarations. Use [`DeclArena::try_alloc`] where that can happen.
    pub fn alloc(&mut self, decl: Declaration) -> DeclId {
        self.try_alloc(decl)
            .unwrap_or_else(|full| panic!("cannot allocate declaration: {full}"))
    }

    /// Allocate a declaration, failing once every `DeclId` is taken.
    pub fn try_alloc(&mut self, decl: Declaration) -> Result<DeclId, ArenaFull> {
        let id = next_id(self.decls.len())?;
        if let DeclKind::Type { ty, .. } = &decl.kind {
            self.types.entry(ty.clone()).or_insert(id);
        }
        self.decls.push(decl);
        Ok(id)
    }

    /// Get a declaration, or `None` for an ID from another arena.
    #[inline]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Iterate all declarations with their IDs, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        (0..).map(DeclId::new).zip(&self.decls)
    }

    /// Look up the type declaration for a type name.
    pub fn type_decl(&self, ty: &TypeName) -> Option<DeclId> {
        self.types.get(ty).copied()
    }

    /// Check whether a type is known to this round.
    pub fn has_type(&self, ty: &TypeName) -> bool {
        self.types.contains_key(ty)
    }

    /// The declared supertype of a known type.
    pub fn supertype_of(&self, ty: &TypeName) -> Option<&TypeName> {
        let id = self.type_decl(ty)?;
        match &self.decls[id.index()].kind {
            DeclKind::Type { supertype, .. } => supertype.as_ref(),
            DeclKind::Method { .. } | DeclKind::Field { .. } => None,
        }
    }

    /// The type a declaration belongs to: itself for types, the owner's type
    /// for members.
    pub fn enclosing_type(&self, id: DeclId) -> Option<&TypeName> {
        let decl = self.get(id)?;
        match &decl.kind {
            DeclKind::Type { ty, .. } => Some(ty),
            DeclKind::Method { owner, .. } | DeclKind::Field { owner, .. } => {
                self.get(*owner).and_then(Declaration::type_name)
            }
        }
    }

    /// The package a declaration lives in (empty when unknown).
    pub fn package_of(&self, id: DeclId) -> &str {
        self.enclosing_type(id).map_or("", TypeName::package)
    }

    /// The source location of a declaration.
    pub fn location(&self, id: DeclId) -> Location {
        self.get(id)
            .map(|d| d.location.clone())
            .unwrap_or_default()
    }

    /// Walk the supertypes of `ty`, nearest first.
    ///
    /// Stops at the first type unknown to the arena and never yields a type
    /// twice, so a cyclic hierarchy terminates. Use this for membership
    /// questions; cycle *reporting* is done by the inheritance graph.
    pub fn supertypes<'a>(&'a self, ty: &'a TypeName) -> Supertypes<'a> {
        let mut seen = FxHashSet::default();
        seen.insert(ty);
        Supertypes {
            arena: self,
            next: self.supertype_of(ty),
            seen,
        }
    }

    /// Check whether `ancestor` is `ty` itself or one of its supertypes.
    pub fn is_same_or_subtype(&self, ty: &TypeName, ancestor: &TypeName) -> bool {
        ty == ancestor || self.supertypes(ty).any(|t| t == ancestor)
    }
}

/// Iterator over a type's supertypes. See [`DeclArena::supertypes`].
pub struct Supertypes<'a> {
    arena: &'a DeclArena,
    next: Option<&'a TypeName>,
    seen: FxHashSet<&'a TypeName>,
}

impl<'a> Iterator for Supertypes<'a> {
    type Item = &'a TypeName;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.seen.insert(current) {
            return None;
        }
        self.next = self.arena.supertype_of(current);
        Some(current)
    }
}

impl Index<DeclId> for DeclArena {
    type Output = Declaration;

    fn index(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }
}

/// Every `DeclId` of an arena is taken.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("declaration arena is full ({} declarations)", DeclArena::CAPACITY)]
pub struct ArenaFull;

/// The id of the declaration allocated at position `len`.
fn next_id(len: usize) -> Result<DeclId, ArenaFull> {
    u32::try_from(len).map(DeclId::new).map_err(|_| ArenaFull)
}

impl TryFrom<Vec<Declaration>> for DeclArena {
    type Error = ArenaFull;

    fn try_from(decls: Vec<Declaration>) -> Result<Self, ArenaFull> {
        let mut arena = DeclArena::new();
        for decl in decls {
            arena.try_alloc(decl)?;
        }
        Ok(arena)
    }
}

impl From<DeclArena> for Vec<Declaration> {
    fn from(arena: DeclArena) -> Self {
        arena.decls
    }
}

impl Serialize for DeclArena {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.decls.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeclArena {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let decls = Vec::<Declaration>::deserialize(deserializer)?;
        DeclArena::try_from(decls).map_err(serde::de::Error::custom)
    }
}
