//! Recursive-descent contract extraction.
//!
//! [`extract_contract`] turns one `lifetime(lhs, rhs)` annotation into a
//! single committed entry of a caller-owned
//! [`ContractMap`](outlive_core::ContractMap), or into an error carrying
//! the source range of the first malformed sub-expression in depth-first,
//! left-to-right order, leaving the map exactly as it was.
//!
//! Extraction is a pure function of `(expression, lookup map)`; no state
//! survives a call. The lookup map is the contract map built so far for
//! the enclosing declaration, passed explicitly so that one annotation can
//! reference a set established by an earlier one.

use outlive_core::{ContractMap, ContractVariable, PSet};

use crate::canon::canonicalize;
use crate::error::ExtractError;
use crate::expr::{DeclKind, Expr};

/// Maximum expression nesting depth the extractor follows. A tree nested
/// deeper fails with an unsupported-shape error instead of exhausting the
/// stack.
pub const MAX_EXPR_DEPTH: usize = 128;

/// Extracts one `lifetime(lhs, rhs)` annotation into `map`.
///
/// The expression must be a call whose callee *name* is `lifetime` -- bound
/// or still pending overload resolution -- with exactly two arguments. The
/// first argument must resolve, without the lookup map, to exactly one
/// variable with no sentinel flags; it becomes the key. The second is
/// collected with `map` as the lookup table, so a parameter already
/// constrained by an earlier annotation substitutes to its recorded set.
///
/// On success exactly one entry is inserted, replacing any existing entry
/// for the same key. On failure `map` is untouched.
pub fn extract_contract(expr: &Expr, map: &mut ContractMap) -> Result<(), ExtractError> {
    let Expr::Call {
        callee,
        args,
        range,
    } = expr
    else {
        return Err(ExtractError::UnsupportedShape {
            range: expr.range(),
        });
    };
    if callee.name() != "lifetime" || args.len() != 2 {
        return Err(ExtractError::MalformedCall {
            callee: callee.name().to_owned(),
            range: *range,
        });
    }

    let lhs = canonicalize(&args[0]);
    let key = match collect_pset(lhs, None) {
        Ok(pset) => match pset.single_var() {
            Some(var) => var.clone(),
            None => return Err(ExtractError::InvalidLhs { range: lhs.range() }),
        },
        Err(_) => return Err(ExtractError::InvalidLhs { range: lhs.range() }),
    };

    let rhs = canonicalize(&args[1]);
    let value = collect_pset(rhs, Some(map))?;

    map.insert(key, value);
    Ok(())
}

/// Collects the points-to set of one canonicalized sub-expression.
///
/// `lookup` is the contract map built so far for the enclosing declaration;
/// a parameter that already has an entry resolves to its stored set. The
/// top-level LHS passes `None` so the key always names the parameter
/// itself.
pub fn collect_pset(expr: &Expr, lookup: Option<&ContractMap>) -> Result<PSet, ExtractError> {
    collect(expr, lookup, 0)
}

fn collect(
    expr: &Expr,
    lookup: Option<&ContractMap>,
    depth: usize,
) -> Result<PSet, ExtractError> {
    if depth > MAX_EXPR_DEPTH {
        return Err(ExtractError::UnsupportedShape {
            range: expr.range(),
        });
    }
    match expr {
        Expr::This { record, .. } => Ok(PSet::singleton(ContractVariable::this(*record))),

        Expr::DeclRef { name, decl, range } => match name.as_str() {
            "Null" => Ok(PSet::null()),
            "Static" | "Global" => Ok(PSet::global()),
            "Invalid" => Ok(PSet::invalid()),
            "Return" => Ok(PSet::singleton(ContractVariable::return_val())),
            _ => match decl {
                DeclKind::Param { index } => {
                    let var = ContractVariable::param(*index);
                    if let Some(map) = lookup {
                        if let Some(stored) = map.get(&var) {
                            return Ok(stored.clone());
                        }
                    }
                    Ok(PSet::singleton(var))
                }
                DeclKind::Other => Err(ExtractError::UnresolvedReference {
                    name: name.clone(),
                    range: *range,
                }),
            },
        },

        Expr::Call {
            callee,
            args,
            range,
        } => {
            if callee.name() != "deref" || args.len() != 1 {
                return Err(ExtractError::MalformedCall {
                    callee: callee.name().to_owned(),
                    range: *range,
                });
            }
            let inner = collect(canonicalize(&args[0]), lookup, depth + 1)?;
            Ok(deref_all(&inner))
        }

        // A brace-init list and a variadic set construction are the same
        // aggregate: the union of their elements, left to right, first
        // failure short-circuiting.
        Expr::InitList { elems: args, .. } | Expr::Construct { args, .. } => {
            let mut result = PSet::new();
            for arg in args {
                let elem = collect(canonicalize(arg), lookup, depth + 1)?;
                result.merge(&elem);
            }
            Ok(result)
        }

        // Unreachable on canonicalized input; matched so a host handing an
        // uncanonicalized tree still fails instead of crashing.
        Expr::Implicit { .. } | Expr::ConversionCall { .. } => Err(ExtractError::UnsupportedShape {
            range: expr.range(),
        }),
    }
}

/// One dereference applied across every disjunct: each member variable
/// gains a deref marker; sentinel flags pass through, since a dereferenced
/// sentinel is still that sentinel under this grammar.
fn deref_all(pset: &PSet) -> PSet {
    PSet::from_parts(
        pset.iter().map(|var| var.clone().deref(1)).collect(),
        pset.contains_null(),
        pset.contains_global(),
        pset.contains_invalid(),
    )
}
