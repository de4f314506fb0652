//! Resource references and resolved resource symbols.
//!
//! A `ResourceRef` is a resource as written at its use-site
//! (`R.styleable.Avatar_size`, `android.R.attr.padding`, or a bare integer
//! the extractor could not trace). A `ResourceSymbol` is the same resource
//! bound to the concrete holder class that generated code must reference.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Package of the host framework's own resource holder.
pub const FRAMEWORK_PACKAGE: &str = "android";

/// Resource type namespace (`R.<kind>.<name>`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Anim,
    Array,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Font,
    Fraction,
    Id,
    Integer,
    Layout,
    String,
    Style,
    Styleable,
}

impl ResourceKind {
    /// The nested holder class name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Anim => "anim",
            ResourceKind::Array => "array",
            ResourceKind::Attr => "attr",
            ResourceKind::Bool => "bool",
            ResourceKind::Color => "color",
            ResourceKind::Dimen => "dimen",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Font => "font",
            ResourceKind::Fraction => "fraction",
            ResourceKind::Id => "id",
            ResourceKind::Integer => "integer",
            ResourceKind::Layout => "layout",
            ResourceKind::String => "string",
            ResourceKind::Style => "style",
            ResourceKind::Styleable => "styleable",
        }
    }

    /// Check whether a value of this kind can serve as an attribute default.
    pub fn is_value_kind(self) -> bool {
        !matches!(
            self,
            ResourceKind::Attr | ResourceKind::Style | ResourceKind::Styleable | ResourceKind::Id
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The holder a use-site resource reference was written against.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderRef {
    /// The framework holder (`android.R`).
    Framework,
    /// A module holder declared in the given package (`com.lib.R`).
    Package(String),
    /// No traceable holder, e.g. a raw integer constant.
    Unknown,
}

/// A resource reference as written at its use-site.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ResourceRef {
    pub holder: HolderRef,
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceRef {
    /// A reference against a module holder in `package`.
    pub fn new(package: impl Into<String>, kind: ResourceKind, name: impl Into<String>) -> Self {
        ResourceRef {
            holder: HolderRef::Package(package.into()),
            kind,
            name: name.into(),
        }
    }

    /// A reference against the framework holder.
    pub fn framework(kind: ResourceKind, name: impl Into<String>) -> Self {
        ResourceRef {
            holder: HolderRef::Framework,
            kind,
            name: name.into(),
        }
    }

    /// A reference whose holder could not be traced.
    pub fn unknown(kind: ResourceKind, name: impl Into<String>) -> Self {
        ResourceRef {
            holder: HolderRef::Unknown,
            kind,
            name: name.into(),
        }
    }

    /// The declared holder package, for module references.
    pub fn declared_package(&self) -> Option<&str> {
        match &self.holder {
            HolderRef::Package(package) => Some(package),
            HolderRef::Framework | HolderRef::Unknown => None,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.holder {
            HolderRef::Framework => write!(f, "{FRAMEWORK_PACKAGE}.R.{}.{}", self.kind, self.name),
            HolderRef::Package(p) if p.is_empty() => write!(f, "R.{}.{}", self.kind, self.name),
            HolderRef::Package(p) => write!(f, "{p}.R.{}.{}", self.kind, self.name),
            HolderRef::Unknown => write!(f, "<untraced {}> {}", self.kind, self.name),
        }
    }
}

/// A concrete resource holder class (`<package>.R`).
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderSymbol {
    package: String,
}

impl HolderSymbol {
    /// The holder generated for `package`.
    pub fn new(package: impl Into<String>) -> Self {
        HolderSymbol {
            package: package.into(),
        }
    }

    /// The framework holder.
    pub fn framework() -> Self {
        HolderSymbol::new(FRAMEWORK_PACKAGE)
    }

    /// Package of the holder class.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Check whether this is the framework holder.
    pub fn is_framework(&self) -> bool {
        self.package == FRAMEWORK_PACKAGE
    }

    /// Bind a resource to this holder.
    pub fn symbol(&self, kind: ResourceKind, name: impl Into<String>) -> ResourceSymbol {
        ResourceSymbol {
            holder: self.clone(),
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for HolderSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str("R")
        } else {
            write!(f, "{}.R", self.package)
        }
    }
}

/// A resource bound to a concrete holder; renders as a source reference.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct ResourceSymbol {
    pub holder: HolderSymbol,
    pub kind: ResourceKind,
    pub name: String,
}

impl fmt::Display for ResourceSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.holder, self.kind, self.name)
    }
}

/// Resources known to exist in the module being processed.
///
/// An empty index means "unknown": existence checks are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceIndex {
    resources: FxHashSet<(ResourceKind, String)>,
}

impl ResourceIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resource as existing.
    pub fn insert(&mut self, kind: ResourceKind, name: impl Into<String>) {
        self.resources.insert((kind, name.into()));
    }

    /// Check whether a resource exists.
    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.resources.contains(&(kind, name.to_string()))
    }

    /// Check whether nothing is known.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
