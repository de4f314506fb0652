//! Extracted info records.
//!
//! The extraction step reports one record per annotated element. Records
//! refer to declarations by `DeclId`; locations come from the arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DeclId, Format, ResourceRef, TypeName};

/// Marks a declaration as styleable.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct StyleableMarker {
    pub decl: DeclId,
    /// Name of the styleable resource array (`R.styleable.<name>`).
    #[serde(default)]
    pub styleable_array: Option<String>,
    /// The view type being styled when `decl` is a proxy; `None` means the
    /// declaration styles itself.
    #[serde(default)]
    pub styled_type: Option<TypeName>,
    /// Synthesize an empty default style when none is declared.
    #[serde(default)]
    pub empty_default_style: bool,
}

/// An attribute: a styleable resource bound to a setter.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttrInfo {
    pub owner: DeclId,
    /// The annotated setter.
    pub element: DeclId,
    pub setter: String,
    /// The setter's parameter type.
    pub target_type: TypeName,
    pub format: Format,
    pub resource: ResourceRef,
    /// Resource applied when the style has no value and defaults are on.
    #[serde(default)]
    pub default_value: Option<ResourceRef>,
}

/// Where a named style's values come from.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StyleSource {
    /// A style resource (`R.style.Name`).
    Resource { resource: ResourceRef },
    /// A static method building the style on a `StyleBuilder`.
    Programmatic { method: DeclId },
    /// A style with no values.
    Empty,
}

/// A named style preset.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct StyleInfo {
    pub owner: DeclId,
    /// The annotated field or method; `None` for synthesized styles.
    #[serde(default)]
    pub element: Option<DeclId>,
    /// Declared name, before formatting.
    pub name: String,
    #[serde(flatten)]
    pub source: StyleSource,
    #[serde(default)]
    pub is_default: bool,
}

/// When a hook runs relative to attribute application.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HookPhase {
    Before,
    After,
}

impl HookPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            HookPhase::Before => "before",
            HookPhase::After => "after",
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle hook method.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct HookInfo {
    pub owner: DeclId,
    pub element: DeclId,
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeName>,
}

pub type BeforeHookInfo = HookInfo;
pub type AfterHookInfo = HookInfo;

/// A nested styleable reachable through a field or getter.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ChildStyleableInfo {
    pub owner: DeclId,
    pub element: DeclId,
    /// Field name or getter expression used to reach the child view.
    pub getter: String,
    /// The type declaring the member.
    pub member_owner: TypeName,
    /// The child's styled type.
    pub child_type: TypeName,
    /// The attribute carrying the child's style.
    pub resource: ResourceRef,
    #[serde(default)]
    pub default_value: Option<ResourceRef>,
}

/// Processor configuration declared in source.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub decl: DeclId,
    /// Formats a styleable's simple name into its default style resource
    /// name; must contain exactly one `%s` when non-empty.
    #[serde(default)]
    pub default_style_name_format: String,
    /// Explicit resource holder type.
    #[serde(default)]
    pub r_class: Option<TypeName>,
}

impl ConfigInfo {
    /// Placeholder replaced by the styleable's simple name.
    pub const PLACEHOLDER: &'static str = "%s";

    /// Check the name format: empty, or exactly one placeholder.
    pub fn is_format_valid(&self) -> bool {
        let format = &self.default_style_name_format;
        format.is_empty() || format.matches(Self::PLACEHOLDER).count() == 1
    }
}

/// One extracted record.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Styleable(StyleableMarker),
    Attr(AttrInfo),
    Style(StyleInfo),
    BeforeHook(BeforeHookInfo),
    AfterHook(AfterHookInfo),
    ChildStyleable(ChildStyleableInfo),
    Config(ConfigInfo),
}

impl Record {
    /// The declaration this record belongs to.
    pub fn owner(&self) -> DeclId {
        match self {
            Record::Styleable(m) => m.decl,
            Record::Attr(a) => a.owner,
            Record::Style(s) => s.owner,
            Record::BeforeHook(h) | Record::AfterHook(h) => h.owner,
            Record::ChildStyleable(c) => c.owner,
            Record::Config(c) => c.decl,
        }
    }

    /// The element to report diagnostics against.
    pub fn element(&self) -> DeclId {
        match self {
            Record::Styleable(m) => m.decl,
            Record::Attr(a) => a.element,
            Record::Style(s) => s.element.unwrap_or(s.owner),
            Record::BeforeHook(h) | Record::AfterHook(h) => h.element,
            Record::ChildStyleable(c) => c.element,
            Record::Config(c) => c.decl,
        }
    }
}
