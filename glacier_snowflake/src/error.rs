//! Error types for statement building

use thiserror::Error;

use crate::sql::IdentifierError;

/// Errors raised while rendering a statement.
///
/// A statement that comes back with one of these must not be executed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A schema-level object was missing part of its name.
    #[error("{kind} must specify a database, a schema, and a name")]
    IncompleteName { kind: &'static str },

    /// Two options that cannot be combined were both set (or neither was).
    #[error("{0}")]
    Conflict(String),

    /// A clause that the object cannot be created without is absent.
    #[error("{kind} requires {clause}")]
    MissingClause {
        kind: &'static str,
        clause: &'static str,
    },

    /// An identifier failed validation.
    #[error("invalid identifier: {}", join_errors(.0))]
    InvalidIdentifier(Vec<IdentifierError>),

    /// A described value does not fit the field it maps to.
    #[error("field {field} is invalid on {value}")]
    InvalidField { field: String, value: String },

    /// A described value could not be written back into the record.
    #[error("can't set field {0}")]
    CannotSet(String),

    /// An ALTER was requested with nothing to set or unset.
    #[error("nothing to change on {0}")]
    Empty(String),
}

fn join_errors(errors: &[IdentifierError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for builder results.
pub type BuildResult<T> = std::result::Result<T, BuilderError>;
