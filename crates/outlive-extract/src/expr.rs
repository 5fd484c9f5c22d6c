//! Annotation expression trees.
//!
//! The host's parser and semantic analysis hand the extractor a read-only
//! [`Expr`] tree for each annotation attribute. The tree keeps only what
//! contract extraction needs: callee names, declared names with their
//! resolution, `this`, literal-set aggregates, and the two transparent
//! wrapper forms that carry no contract meaning. Everything else the host
//! knows about the expression (types, value categories, cast kinds) stays
//! on the host's side of the boundary.

use outlive_core::{RecordId, SourceRange};
use serde::{Deserialize, Serialize};

/// Callee of an [`Expr::Call`].
///
/// Annotation calls are matched by callee *name*: a call still pending
/// overload resolution is accepted the same as one already bound to a
/// concrete declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callee {
    /// Bound to a concrete declaration with this name.
    Bound(String),
    /// Overload resolution pending; only the spelled name is known.
    Unresolved(String),
}

impl Callee {
    /// The spelled name, regardless of resolution state.
    pub fn name(&self) -> &str {
        match self {
            Callee::Bound(name) | Callee::Unresolved(name) => name,
        }
    }
}

/// Host-side resolution of an [`Expr::DeclRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    /// A formal parameter of the enclosing declaration.
    Param { index: u32 },
    /// Any other declaration.
    Other,
}

/// One node of an annotation expression tree.
///
/// Every node carries the source range of the tokens it covers, so a
/// failure anywhere in extraction can point at the exact offending span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Call with a named callee: `lifetime(a, {b})`, `deref(p)`.
    Call {
        callee: Callee,
        args: Vec<Expr>,
        range: SourceRange,
    },
    /// Reference to a declared name.
    DeclRef {
        name: String,
        decl: DeclKind,
        range: SourceRange,
    },
    /// `this` inside a member declaration, with the pointee's record.
    This {
        record: RecordId,
        range: SourceRange,
    },
    /// Brace-initializer list: `{a, b}`.
    InitList {
        elems: Vec<Expr>,
        range: SourceRange,
    },
    /// Construction of a named class type from its arguments.
    Construct {
        class: String,
        args: Vec<Expr>,
        range: SourceRange,
    },
    /// Implicit conversion or temporary materialization around a child.
    Implicit {
        child: Box<Expr>,
        range: SourceRange,
    },
    /// Call of a user-defined conversion operator on an object.
    ConversionCall {
        object: Box<Expr>,
        range: SourceRange,
    },
}

impl Expr {
    pub fn call(callee: Callee, args: Vec<Expr>, range: SourceRange) -> Expr {
        Expr::Call {
            callee,
            args,
            range,
        }
    }

    pub fn decl_ref(name: impl Into<String>, decl: DeclKind, range: SourceRange) -> Expr {
        Expr::DeclRef {
            name: name.into(),
            decl,
            range,
        }
    }

    pub fn this(record: RecordId, range: SourceRange) -> Expr {
        Expr::This { record, range }
    }

    pub fn init_list(elems: Vec<Expr>, range: SourceRange) -> Expr {
        Expr::InitList { elems, range }
    }

    pub fn construct(class: impl Into<String>, args: Vec<Expr>, range: SourceRange) -> Expr {
        Expr::Construct {
            class: class.into(),
            args,
            range,
        }
    }

    pub fn implicit(child: Expr, range: SourceRange) -> Expr {
        Expr::Implicit {
            child: Box::new(child),
            range,
        }
    }

    pub fn conversion_call(object: Expr, range: SourceRange) -> Expr {
        Expr::ConversionCall {
            object: Box::new(object),
            range,
        }
    }

    /// Source range covered by this node.
    pub fn range(&self) -> SourceRange {
        match self {
            Expr::Call { range, .. }
            | Expr::DeclRef { range, .. }
            | Expr::This { range, .. }
            | Expr::InitList { range, .. }
            | Expr::Construct { range, .. }
            | Expr::Implicit { range, .. }
            | Expr::ConversionCall { range, .. } => *range,
        }
    }
}
