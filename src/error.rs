use thiserror::Error;

/// Every way a model or a query into it can fail.
///
/// Model-level kinds (everything except [`EngineError::Arithmetic`]) are
/// reported once, before the first planning node is ever expanded.
/// [`EngineError::Arithmetic`] is the one kind that surfaces mid-search: it
/// prunes the offending transition rather than aborting the whole query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("malformed value: {0}")]
    MalformedValue(String),

    #[error("malformed argument: {0}")]
    MalformedArgument(String),

    #[error("type mismatch on variable {variable_id:?}: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        variable_id: String,
        expected: crate::value::Type,
        found: crate::value::Type,
    },

    #[error("unsupported operator {operator} for type {value_type:?}")]
    UnsupportedOperator { operator: String, value_type: crate::value::Type },

    #[error("duplicate assignment for variable {0:?}")]
    DuplicateAssignment(String),

    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    #[error("arithmetic error on variable {variable_id:?}: {reason}")]
    Arithmetic { variable_id: String, reason: String },
}
