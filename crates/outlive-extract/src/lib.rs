//! Lifetime-contract extraction from annotation expressions.
//!
//! The host's attribute grammar produces an expression tree for each
//! `lifetime(lhs, rhs)` annotation on a declaration. This crate turns one
//! such tree into a single committed entry of the declaration's
//! [`ContractMap`](outlive_core::ContractMap), or into the source range of
//! the first malformed sub-expression, leaving the map untouched.
//!
//! # Architecture
//!
//! - [`Expr`] is the read-only tree view the host hands over: calls with
//!   named callees, declared-name references with their resolution, `this`,
//!   literal-set aggregates, and the transparent wrapper forms the host's
//!   semantic analysis inserts around them.
//! - [`canonicalize`] strips the wrappers to a fixed point, so leaf
//!   resolution only ever sees one meaningful node kind.
//! - [`extract_contract`] matches the top-level `lifetime` call, resolves
//!   its first argument to the contract key, collects the second argument's
//!   points-to set (reading the in-progress map for chained annotations),
//!   and commits exactly one entry -- or returns an [`ExtractError`]
//!   carrying one source range.
//!
//! Extraction is a pure function of the expression tree and the lookup map;
//! nothing persists across calls, and a rejected annotation never disturbs
//! entries committed by earlier annotations.

pub mod canon;
pub mod error;
pub mod expr;
pub mod extract;

pub use canon::{canonicalize, SET_AGGREGATE_CLASS};
pub use error::ExtractError;
pub use expr::{Callee, DeclKind, Expr};
pub use extract::{collect_pset, extract_contract, MAX_EXPR_DEPTH};
