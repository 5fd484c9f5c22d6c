//! Extraction failure taxonomy.
//!
//! Every failure is a normal return value carrying the source range of the
//! first offending sub-expression in depth-first, left-to-right order. The
//! caller turns the range into a diagnostic; nothing here formats or emits
//! one. Failures are local to a single annotation attribute: a rejected
//! annotation never disturbs entries committed by earlier annotations on
//! the same declaration.

use outlive_core::SourceRange;
use serde::{Deserialize, Serialize};

/// Why one annotation attribute was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ExtractError {
    /// A declaration reference is neither a recognized sentinel nor a
    /// formal parameter of the enclosing declaration.
    #[error("unresolved reference '{name}' at {range}")]
    UnresolvedReference { name: String, range: SourceRange },

    /// The callee is not `lifetime`/`deref`, or the arity is wrong.
    #[error("malformed call to '{callee}' at {range}")]
    MalformedCall { callee: String, range: SourceRange },

    /// The `lifetime` call's first argument does not resolve to exactly
    /// one variable with no sentinel flags.
    #[error("lifetime lhs at {range} must name exactly one variable")]
    InvalidLhs { range: SourceRange },

    /// A sub-expression outside the recognized annotation grammar.
    #[error("unsupported expression at {range}")]
    UnsupportedShape { range: SourceRange },
}

impl ExtractError {
    /// Source range of the offending sub-expression.
    pub fn range(&self) -> SourceRange {
        match self {
            ExtractError::UnresolvedReference { range, .. }
            | ExtractError::MalformedCall { range, .. }
            | ExtractError::InvalidLhs { range }
            | ExtractError::UnsupportedShape { range } => *range,
        }
    }
}
