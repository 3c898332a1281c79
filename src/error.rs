//! Error types for prioritization.

use std::fmt;

use thiserror::Error;

use crate::value::ValueKind;

/// Result type alias for u-priora operations.
pub type Result<T> = std::result::Result<T, PrioraError>;

/// Why a raw priority specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxViolation {
    /// The raw value is not a bare attribute or a single-key mapping/list.
    Shape,

    /// A directional declaration named zero or several attributes.
    MultipleAttributes,

    /// A direction token other than `asc` or `desc`.
    UnknownDirection(String),
}

impl fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxViolation::Shape => f.write_str(
                "priorities must be a bare attribute or a single-key mapping/list for directional priorities",
            ),
            SyntaxViolation::MultipleAttributes => f.write_str(
                "directional priority declaration takes only a single attribute at a time",
            ),
            SyntaxViolation::UnknownDirection(token) => {
                write!(f, "unknown priority direction '{token}' (expected 'asc' or 'desc')")
            }
        }
    }
}

/// Error type for u-priora operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrioraError {
    /// No priorities were supplied and none could be resolved from declarations.
    #[error("prioritization attributes must be declared for the type or supplied manually")]
    UnsuppliedPriorities,

    /// A raw priority specification has an unsupported shape.
    #[error("invalid priority syntax: {0}")]
    InvalidPrioritySyntax(SyntaxViolation),

    /// A conversion requires more than the single raw value.
    #[error("conversions may take only 0 or 1 arguments, got {arity}")]
    InvalidConversionFunction {
        /// Declared input count of the rejected conversion.
        arity: usize,
    },

    /// An object does not expose the attribute a priority reads.
    #[error("'{type_name}' has no attribute '{attribute}'")]
    MissingAttribute {
        /// The attribute that was requested.
        attribute: String,
        /// Type name of the object.
        type_name: &'static str,
    },

    /// A raw value is not numeric and no conversion is registered for its kind.
    #[error("attribute '{attribute}' holds a {kind} value with no registered conversion")]
    NonNumericValue {
        /// The attribute that was read.
        attribute: String,
        /// Kind of the offending value.
        kind: ValueKind,
    },
}

impl From<SyntaxViolation> for PrioraError {
    fn from(violation: SyntaxViolation) -> Self {
        PrioraError::InvalidPrioritySyntax(violation)
    }
}
