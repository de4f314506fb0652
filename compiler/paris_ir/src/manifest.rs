//! Module manifests: the styleables a module exports to its dependents.

use serde::{Deserialize, Serialize};

use crate::{Attr, Child, Hook, Location, ResourceSymbol, Style, TypeName};

/// Serialized form of a styleable, as read by dependent modules.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct StyleableDescriptor {
    pub element: TypeName,
    pub styled_type: TypeName,
    /// Supertypes of the styled type, nearest first.
    #[serde(default)]
    pub supertypes: Vec<TypeName>,
    pub applier: TypeName,
    #[serde(default)]
    pub styleable_array: Option<ResourceSymbol>,
    #[serde(default)]
    pub attrs: Vec<Attr>,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub before: Vec<Hook>,
    #[serde(default)]
    pub after: Vec<Hook>,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub location: Location,
}

/// Everything one module exports.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub module: String,
    #[serde(default)]
    pub styleables: Vec<StyleableDescriptor>,
}

impl ModuleManifest {
    /// Resource directory manifests are written under.
    pub const DIRECTORY: &'static str = "META-INF/paris";

    /// Create an empty manifest for `module`.
    pub fn new(module: impl Into<String>) -> Self {
        ModuleManifest {
            module: module.into(),
            styleables: Vec::new(),
        }
    }

    /// File name of this manifest inside [`Self::DIRECTORY`].
    pub fn file_name(&self) -> String {
        format!("{}.json", self.module)
    }

    /// Path of this manifest relative to the output root.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", Self::DIRECTORY, self.file_name())
    }
}
