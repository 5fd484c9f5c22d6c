//! Source ranges for annotation expressions.
//!
//! A [`SourceRange`] is a half-open byte span into the annotation's source
//! buffer. The host attaches one to every expression node it builds; a
//! failed extraction hands exactly one range back so the caller can point
//! its diagnostic at the offending token span. This crate never formats or
//! emits diagnostics itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open byte span `begin..end` into the annotation source buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourceRange {
    /// Byte offset of the first character covered.
    pub begin: u32,
    /// Byte offset one past the last character covered.
    pub end: u32,
}

impl SourceRange {
    pub fn new(begin: u32, end: u32) -> Self {
        SourceRange { begin, end }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}
