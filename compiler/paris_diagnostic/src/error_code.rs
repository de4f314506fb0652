//! Error codes for all processor diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the error kind.

use std::fmt;

/// Broad classification of a diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// A resource reference could not be bound to a holder.
    Resolution,
    /// The styleable model is inconsistent.
    Validation,
    /// The processor configuration is malformed.
    Config,
    /// Emission or IO failed.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Resolution => write!(f, "resolution error"),
            ErrorKind::Validation => write!(f, "validation error"),
            ErrorKind::Config => write!(f, "config error"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

/// Error codes for all processor diagnostics.
///
/// Format: E#### where first digit indicates kind:
/// - E1xxx: Resolution errors
/// - E2xxx: Validation errors
/// - E3xxx: Configuration errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E1xxx)
    /// Resource reference cannot be resolved
    E1001,

    // Validation Errors (E2xxx)
    /// More than one default style
    E2001,
    /// Cyclic styleable inheritance
    E2002,
    /// Hook signature does not accept the styled type
    E2003,
    /// Child styleable member not declared by the styled type
    E2004,
    /// Resource not named after the styleable array
    E2005,
    /// Attributes declared without a styleable array
    E2006,
    /// Two styleables for one styled type
    E2007,
    /// Duplicate style name
    E2008,
    /// Sibling styleables share a default style name
    E2009,
    /// Record owned by a non-styleable declaration
    E2010,
    /// Child styled type has no applier
    E2011,
    /// Parent styleable's applier was not generated
    E2012,

    // Configuration Errors (E3xxx)
    /// Malformed default style name format
    E3001,

    // Internal Errors (E9xxx)
    /// Emission or output failure
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::E2012,
        ErrorCode::E3001,
        ErrorCode::E9001,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// The kind this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E1001 => ErrorKind::Resolution,
            ErrorCode::E2001
            | ErrorCode::E2002
            | ErrorCode::E2003
            | ErrorCode::E2004
            | ErrorCode::E2005
            | ErrorCode::E2006
            | ErrorCode::E2007
            | ErrorCode::E2008
            | ErrorCode::E2009
            | ErrorCode::E2010
            | ErrorCode::E2011
            | ErrorCode::E2012 => ErrorKind::Validation,
            ErrorCode::E3001 => ErrorKind::Config,
            ErrorCode::E9001 => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
