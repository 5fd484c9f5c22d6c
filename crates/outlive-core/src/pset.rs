//! Disjunctive points-to sets.
//!
//! A [`PSet`] records every target a pointer-like location may alias: a set
//! of [`ContractVariable`]s plus three independent flags for sentinel
//! membership (null, global storage, invalid). Sentinels are tracked as
//! flags rather than materialized as set elements; the two modelings are
//! interchangeable as long as one is used consistently, and this crate uses
//! flags throughout.
//!
//! `merge` grows a set monotonically and is commutative, associative, and
//! idempotent.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::variable::ContractVariable;

/// A points-to set: the disjunction of targets one location may alias.
///
/// Invariant: [`PSet::is_empty`] holds iff the variable set is empty and
/// all three sentinel flags are false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PSet {
    vars: BTreeSet<ContractVariable>,
    contains_null: bool,
    contains_global: bool,
    contains_invalid: bool,
}

impl PSet {
    /// The empty set: no variables, no sentinel flags.
    pub fn new() -> Self {
        PSet::default()
    }

    /// Constructs a set from an explicit variable set and sentinel flags.
    pub fn from_parts(
        vars: BTreeSet<ContractVariable>,
        contains_null: bool,
        contains_global: bool,
        contains_invalid: bool,
    ) -> Self {
        PSet {
            vars,
            contains_null,
            contains_global,
            contains_invalid,
        }
    }

    /// The singleton set holding one variable.
    pub fn singleton(var: ContractVariable) -> Self {
        let mut set = PSet::new();
        set.vars.insert(var);
        set
    }

    /// The set holding only the null sentinel.
    pub fn null() -> Self {
        PSet {
            contains_null: true,
            ..PSet::default()
        }
    }

    /// The set holding only the global-storage sentinel.
    pub fn global() -> Self {
        PSet {
            contains_global: true,
            ..PSet::default()
        }
    }

    /// The set holding only the invalid sentinel.
    pub fn invalid() -> Self {
        PSet {
            contains_invalid: true,
            ..PSet::default()
        }
    }

    pub fn insert(&mut self, var: ContractVariable) {
        self.vars.insert(var);
    }

    pub fn contains(&self, var: &ContractVariable) -> bool {
        self.vars.contains(var)
    }

    pub fn contains_null(&self) -> bool {
        self.contains_null
    }

    pub fn contains_global(&self) -> bool {
        self.contains_global
    }

    pub fn contains_invalid(&self) -> bool {
        self.contains_invalid
    }

    /// Unions `other` into `self`: flag-wise OR plus set union.
    pub fn merge(&mut self, other: &PSet) {
        self.contains_null |= other.contains_null;
        self.contains_global |= other.contains_global;
        self.contains_invalid |= other.contains_invalid;
        for var in &other.vars {
            self.vars.insert(var.clone());
        }
    }

    /// True iff the variable set is empty and no sentinel flag is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
            && !self.contains_null
            && !self.contains_global
            && !self.contains_invalid
    }

    /// The single member variable, iff the set holds exactly one variable
    /// and no sentinel flags. This is the shape a `lifetime` call's first
    /// argument must have.
    pub fn single_var(&self) -> Option<&ContractVariable> {
        if self.vars.len() == 1
            && !self.contains_null
            && !self.contains_global
            && !self.contains_invalid
        {
            self.vars.iter().next()
        } else {
            None
        }
    }

    /// Member variables in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractVariable> {
        self.vars.iter()
    }

    /// Debug rendering: `{ Null a b }`. Active sentinel flags come first in
    /// the fixed order Null, Global, Invalid, then variables in canonical
    /// order. `param_names` is forwarded to [`ContractVariable::dump`].
    pub fn dump(&self, param_names: &[&str]) -> String {
        let mut parts = Vec::new();
        if self.contains_null {
            parts.push("Null".to_string());
        }
        if self.contains_global {
            parts.push("Global".to_string());
        }
        if self.contains_invalid {
            parts.push("Invalid".to_string());
        }
        for var in &self.vars {
            parts.push(var.dump(param_names));
        }
        if parts.is_empty() {
            "{ }".to_string()
        } else {
            format!("{{ {} }}", parts.join(" "))
        }
    }
}
