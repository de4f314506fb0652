//! The resolved styleable model.
//!
//! A `StyleableInfo` is what the model builder produces from one styleable
//! marker and its records: every resource already bound to its holder, every
//! style name already formatted. Code generation reads nothing else.

use serde::{Deserialize, Serialize};

use crate::naming::DEFAULT_STYLE_NAME;
use crate::{DeclId, Format, Location, Origin, ResourceSymbol, StyleableDescriptor, TypeName};

/// Suffix of generated applier classes.
pub const APPLIER_SUFFIX: &str = "StyleApplier";

/// A resolved attribute.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Attr {
    pub symbol: ResourceSymbol,
    pub setter: String,
    pub target_type: TypeName,
    pub format: Format,
    #[serde(default)]
    pub default_value: Option<ResourceSymbol>,
    #[serde(default)]
    pub location: Location,
}

/// A resolved style source.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResolvedStyleSource {
    Resource { symbol: ResourceSymbol },
    Programmatic { owner: TypeName, method: String },
    Empty,
}

/// A resolved named style.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Style {
    /// Formatted lowerCamel name.
    pub name: String,
    #[serde(flatten)]
    pub source: ResolvedStyleSource,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub location: Location,
}

/// A resolved hook method.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Hook {
    pub method: String,
    #[serde(default)]
    pub location: Location,
}

/// A resolved child styleable.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Child {
    pub getter: String,
    pub child_type: TypeName,
    pub symbol: ResourceSymbol,
    #[serde(default)]
    pub default_value: Option<ResourceSymbol>,
    #[serde(default)]
    pub location: Location,
}

/// A styleable with all references resolved.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StyleableInfo {
    pub decl: DeclId,
    pub origin: Origin,
    /// The annotated type.
    pub element: TypeName,
    /// The view type being styled (equal to `element` unless proxied).
    pub styled_type: TypeName,
    /// Direct supertype of the styled type.
    pub supertype: Option<TypeName>,
    /// The generated applier type.
    pub applier: TypeName,
    pub styleable_array: Option<ResourceSymbol>,
    pub attrs: Vec<Attr>,
    pub styles: Vec<Style>,
    pub before: Vec<Hook>,
    pub after: Vec<Hook>,
    pub children: Vec<Child>,
    pub location: Location,
}

impl StyleableInfo {
    /// The applier type generated for a styleable declared as `element`
    /// styling `styled_type`.
    pub fn applier_name_for(element: &TypeName, styled_type: &TypeName) -> TypeName {
        element.sibling(format!("{}{APPLIER_SUFFIX}", styled_type.simple()))
    }

    /// Check whether this styleable comes from a dependency module.
    pub fn is_external(&self) -> bool {
        self.origin == Origin::External
    }

    /// Check whether the declaration is a proxy for another view type.
    pub fn is_proxy(&self) -> bool {
        self.element != self.styled_type
    }

    /// The default style, if any.
    pub fn default_style(&self) -> Option<&Style> {
        self.styles.iter().find(|s| s.is_default)
    }

    /// Look up a style by formatted name.
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Check whether the default style is named `default`.
    pub fn has_default_named_default(&self) -> bool {
        self.default_style()
            .is_some_and(|s| s.name == DEFAULT_STYLE_NAME)
    }

    /// Serialize into the manifest form, with the styled type's supertype
    /// chain (nearest first).
    pub fn to_descriptor(&self, supertypes: Vec<TypeName>) -> StyleableDescriptor {
        StyleableDescriptor {
            element: self.element.clone(),
            styled_type: self.styled_type.clone(),
            supertypes,
            applier: self.applier.clone(),
            styleable_array: self.styleable_array.clone(),
            attrs: self.attrs.clone(),
            styles: self.styles.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
            children: self.children.clone(),
            location: self.location.clone(),
        }
    }

    /// Rebuild an external styleable from its manifest form, bound to the
    /// arena declaration `decl`.
    pub fn from_descriptor(descriptor: StyleableDescriptor, decl: DeclId) -> Self {
        StyleableInfo {
            decl,
            origin: Origin::External,
            element: descriptor.element,
            styled_type: descriptor.styled_type,
            supertype: descriptor.supertypes.first().cloned(),
            applier: descriptor.applier,
            styleable_array: descriptor.styleable_array,
            attrs: descriptor.attrs,
            styles: descriptor.styles,
            before: descriptor.before,
            after: descriptor.after,
            children: descriptor.children,
            location: descriptor.location,
        }
    }
}
