//! Qualified type names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A qualified type name, split into package and simple name.
///
/// Serialized as the dotted qualified form (`com.example.Avatar`).
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName {
    package: String,
    simple: String,
}

impl TypeName {
    /// Create a type name from its parts.
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        TypeName {
            package: package.into(),
            simple: simple.into(),
        }
    }

    /// Parse a dotted qualified name. The last segment is the simple name.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, simple)) => TypeName::new(package, simple),
            None => TypeName::new("", qualified),
        }
    }

    /// The package, empty for the default package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple (unqualified) name.
    pub fn simple(&self) -> &str {
        &self.simple
    }

    /// A type with a different simple name in the same package.
    #[must_use]
    pub fn sibling(&self, simple: impl Into<String>) -> TypeName {
        TypeName::new(self.package.clone(), simple)
    }

    /// The dotted qualified name.
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.simple)
        } else {
            write!(f, "{}.{}", self.package, self.simple)
        }
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({self})")
    }
}

impl From<String> for TypeName {
    fn from(qualified: String) -> Self {
        TypeName::parse(&qualified)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.qualified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_splits_on_last_dot() {
        let name = TypeName::parse("com.example.views.Avatar");
        assert_eq!(name.package(), "com.example.views");
        assert_eq!(name.simple(), "Avatar");
        assert_eq!(name.qualified(), "com.example.views.Avatar");
    }

    #[test]
    fn default_package_has_no_dot() {
        let name = TypeName::parse("Avatar");
        assert_eq!(name.package(), "");
        assert_eq!(name.to_string(), "Avatar");
    }

    #[test]
    fn sibling_keeps_package() {
        let name = TypeName::parse("com.example.Avatar");
        assert_eq!(
            name.sibling("AvatarStyleApplier").qualified(),
            "com.example.AvatarStyleApplier"
        );
    }
}
