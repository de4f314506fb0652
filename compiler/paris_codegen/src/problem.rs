//! Emission problem types.

use paris_diagnostic::{Diagnostic, ErrorCode};
use paris_ir::{Location, TypeName};

/// Problem that stops the applier of one styleable from being emitted.
///
/// The other styleables of the round are unaffected.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CodegenProblem {
    /// A child styleable's type has no applier, local or external.
    MissingChildApplier {
        styleable: TypeName,
        child_type: TypeName,
        location: Location,
    },

    /// The parent's applier was not generated, so delegating to it would
    /// reference a missing class.
    ParentNotEmitted {
        styleable: TypeName,
        parent: TypeName,
        location: Location,
    },

    /// The styleable is not part of the admitted inheritance graph.
    NotInTree { location: Location },
}

impl CodegenProblem {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingChildApplier { .. } => ErrorCode::E2011,
            Self::ParentNotEmitted { .. } => ErrorCode::E2012,
            Self::NotInTree { .. } => ErrorCode::E9001,
        }
    }

    /// Convert this problem into a [`Diagnostic`].
    pub fn into_diagnostic(&self) -> Diagnostic {
        match self {
            Self::MissingChildApplier {
                styleable,
                child_type,
                location,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "child `{child_type}` of `{styleable}` has no style applier"
                ))
                .with_label(location.clone(), "child styleable declared here")
                .with_note(format!(
                    "mark `{child_type}` or one of its supertypes as styleable"
                )),

            Self::ParentNotEmitted {
                styleable,
                parent,
                location,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "no style applier for `{styleable}`: its parent `{parent}` failed to generate"
                ))
                .with_label(location.clone(), "styleable declared here")
                .with_note(format!("fix the errors reported for `{parent}` first")),

            Self::NotInTree { location } => Diagnostic::error(self.code())
                .with_message("styleable is missing from the inheritance graph")
                .with_label(location.clone(), "styleable declared here"),
        }
    }
}
