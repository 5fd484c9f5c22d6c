//! Wrapper-peeling canonicalization.
//!
//! The host's semantic analysis wraps the meaningful parts of an annotation
//! in nodes that carry no contract semantics: implicit conversions and
//! temporary materializations, single-argument delegating constructions,
//! and implicit-conversion-operator calls through sentinel-like values.
//! [`canonicalize`] strips them until a fixed point, so leaf resolution
//! only ever sees one meaningful node kind.

use crate::expr::Expr;

/// Class name of the literal-set aggregate type. A construction of this
/// class *is* the set literal -- its arguments are the set elements -- and
/// is never peeled.
pub const SET_AGGREGATE_CLASS: &str = "PSet";

/// Strips semantically transparent wrappers until a fixed point.
///
/// Total and idempotent at the fixed point: always terminates (every peel
/// strictly descends into the tree), and `canonicalize(canonicalize(e))`
/// returns the same node as `canonicalize(e)`.
pub fn canonicalize(mut expr: &Expr) -> &Expr {
    loop {
        let mut changed = false;
        while let Expr::Implicit { child, .. } = expr {
            expr = child.as_ref();
            changed = true;
        }
        if let Expr::Construct { class, args, .. } = expr {
            if class == SET_AGGREGATE_CLASS {
                return expr;
            }
            if args.len() == 1 {
                expr = &args[0];
                changed = true;
            }
        }
        if let Expr::ConversionCall { object, .. } = expr {
            expr = object.as_ref();
            changed = true;
        }
        if !changed {
            return expr;
        }
    }
}
