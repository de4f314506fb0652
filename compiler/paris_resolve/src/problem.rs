//! Resolution problem types.

use paris_diagnostic::{Diagnostic, ErrorCode};
use paris_ir::{Location, ResourceRef};

/// Problem encountered while resolving resources or reading the config.
///
/// Variants map to E1001 (resolution) and E3001 (configuration).
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ResolveError {
    /// The reference was written as a raw value with no traceable holder.
    UntracedHolder { resource: ResourceRef },

    /// The reference names a resource the module does not declare.
    MissingResource { resource: ResourceRef },

    /// The default style name format does not contain exactly one `%s`.
    MalformedNameFormat { format: String },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UntracedHolder { .. } | Self::MissingResource { .. } => ErrorCode::E1001,
            Self::MalformedNameFormat { .. } => ErrorCode::E3001,
        }
    }

    /// Convert this problem into a [`Diagnostic`] reported at `location`.
    pub fn into_diagnostic(&self, location: Location) -> Diagnostic {
        match self {
            Self::UntracedHolder { resource } => Diagnostic::error(self.code())
                .with_message(format!(
                    "cannot resolve resource `{}`: it is not a reference to a resource holder",
                    resource.name
                ))
                .with_label(location, "resource used here")
                .with_note("use a constant from the module's `R` class instead of a raw value"),

            Self::MissingResource { resource } => Diagnostic::error(self.code())
                .with_message(format!("cannot resolve resource `{resource}`"))
                .with_label(location, "resource used here")
                .with_note(format!(
                    "no `{}` resource named `{}` is declared by this module",
                    resource.kind, resource.name
                )),

            Self::MalformedNameFormat { format } => Diagnostic::error(self.code())
                .with_message(format!(
                    "default style name format `{format}` must contain exactly one `%s`"
                ))
                .with_label(location, "config declared here")
                .with_note("the format is ignored and no default style names are derived"),
        }
    }
}
