//! Canonical identities for abstract memory locations.
//!
//! A [`ContractVariable`] names one abstract memory location participating
//! in a lifetime contract: a formal parameter, the `this` pointer, the
//! return value, or one of the non-variable sentinels (null, global
//! storage, invalid). A variable optionally carries a chain of field
//! accesses and dereferences applied in order to the base identity.
//!
//! Variables are immutable value types with no ownership relationships --
//! the builder methods take and return by value, and extraction copies them
//! freely.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Opaque identity of the record type that owns a `this` pointer.
///
/// Assigned by the host's name resolution; the data model only compares it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RecordId(pub u32);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One element of a variable's access chain, in application order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChainItem {
    /// Access of a named field on the result so far.
    Field(String),
    /// Dereference of the result so far.
    Deref,
}

/// Base identity cases of a [`ContractVariable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VarBase {
    /// A formal parameter of the enclosing declaration, by index.
    Param(u32),
    /// The `this` pointer of a member declaration of the given record.
    This(RecordId),
    /// The declaration's return value.
    Return,
    /// The null sentinel.
    Null,
    /// Global/static storage.
    Global,
    /// Invalid (dangling) storage.
    Invalid,
}

impl VarBase {
    fn tag(&self) -> u8 {
        match self {
            VarBase::Param(_) => 0,
            VarBase::This(_) => 1,
            VarBase::Return => 2,
            VarBase::Null => 3,
            VarBase::Global => 4,
            VarBase::Invalid => 5,
        }
    }
}

/// Canonical identity of one abstract memory location plus its access chain.
///
/// Equality is structural: same base case (including payload) and identical
/// chains element by element. The ordering sorts by base tag, then chain
/// length, then base payload, then pointwise chain comparison; it exists
/// only to give [`ContractMap`](crate::ContractMap) deterministic keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractVariable {
    base: VarBase,
    chain: SmallVec<[ChainItem; 3]>,
}

impl ContractVariable {
    /// A formal parameter of the enclosing declaration.
    pub fn param(index: u32) -> Self {
        ContractVariable {
            base: VarBase::Param(index),
            chain: SmallVec::new(),
        }
    }

    /// The `this` pointer of a member declaration of `record`.
    pub fn this(record: RecordId) -> Self {
        ContractVariable {
            base: VarBase::This(record),
            chain: SmallVec::new(),
        }
    }

    /// The declaration's return value.
    pub fn return_val() -> Self {
        ContractVariable {
            base: VarBase::Return,
            chain: SmallVec::new(),
        }
    }

    /// The null sentinel.
    pub fn null() -> Self {
        ContractVariable {
            base: VarBase::Null,
            chain: SmallVec::new(),
        }
    }

    /// The global-storage sentinel.
    pub fn global() -> Self {
        ContractVariable {
            base: VarBase::Global,
            chain: SmallVec::new(),
        }
    }

    /// The invalid (dangling) sentinel.
    pub fn invalid() -> Self {
        ContractVariable {
            base: VarBase::Invalid,
            chain: SmallVec::new(),
        }
    }

    /// Appends `n` dereference markers to the chain.
    pub fn deref(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.chain.push(ChainItem::Deref);
        }
        self
    }

    /// Appends a named field access to the chain.
    pub fn add_field_ref(mut self, name: impl Into<String>) -> Self {
        self.chain.push(ChainItem::Field(name.into()));
        self
    }

    pub fn base(&self) -> &VarBase {
        &self.base
    }

    /// Chain of field accesses and dereferences, in application order.
    pub fn chain(&self) -> &[ChainItem] {
        &self.chain
    }

    pub fn is_this_pointer(&self) -> bool {
        matches!(self.base, VarBase::This(_))
    }

    pub fn is_return_val(&self) -> bool {
        matches!(self.base, VarBase::Return)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.base, VarBase::Null)
    }

    pub fn is_global(&self) -> bool {
        matches!(self.base, VarBase::Global)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.base, VarBase::Invalid)
    }

    /// Parameter index, if the base identity is a parameter.
    pub fn param_index(&self) -> Option<u32> {
        match self.base {
            VarBase::Param(index) => Some(index),
            _ => None,
        }
    }

    /// Debug rendering of the variable.
    ///
    /// `param_names` supplies the enclosing declaration's parameter names in
    /// index order; a parameter whose index is out of range renders as
    /// `p<index>`. Sentinels render without their chain. A field access
    /// following a dereference parenthesizes the prefix: `(*a).b`.
    pub fn dump(&self, param_names: &[&str]) -> String {
        let mut out = match &self.base {
            VarBase::Null => return "null".to_string(),
            VarBase::Global => return "global".to_string(),
            VarBase::Invalid => return "invalid".to_string(),
            VarBase::This(_) => "this".to_string(),
            VarBase::Return => "(return value)".to_string(),
            VarBase::Param(index) => match param_names.get(*index as usize) {
                Some(name) => (*name).to_string(),
                None => format!("p{}", index),
            },
        };

        for (i, item) in self.chain.iter().enumerate() {
            match item {
                ChainItem::Field(name) => {
                    if i > 0 && self.chain[i - 1] == ChainItem::Deref {
                        out = format!("({})", out);
                    }
                    out.push('.');
                    out.push_str(name);
                }
                ChainItem::Deref => out.insert(0, '*'),
            }
        }
        out
    }
}

impl PartialOrd for ContractVariable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContractVariable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base
            .tag()
            .cmp(&other.base.tag())
            .then_with(|| self.chain.len().cmp(&other.chain.len()))
            // Same tag from here on, so this compares only the payload.
            .then_with(|| self.base.cmp(&other.base))
            // Equal lengths from here on, so this is a pointwise comparison.
            .then_with(|| self.chain.cmp(&other.chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(ContractVariable::param(0), ContractVariable::param(0));
        assert_ne!(ContractVariable::param(0), ContractVariable::param(1));
        assert_ne!(
            ContractVariable::param(0),
            ContractVariable::param(0).deref(1)
        );
        assert_eq!(
            ContractVariable::param(2).deref(1).add_field_ref("next"),
            ContractVariable::param(2).deref(1).add_field_ref("next")
        );
        assert_ne!(
            ContractVariable::this(RecordId(1)),
            ContractVariable::this(RecordId(2))
        );
    }

    #[test]
    fn ordering_compares_chain_length_before_payload() {
        // Same tag: a longer chain sorts after a shorter one even when the
        // shorter one has a larger parameter index.
        let short = ContractVariable::param(9);
        let long = ContractVariable::param(0).deref(1);
        assert!(short < long);
    }

    #[test]
    fn ordering_compares_tag_first() {
        let param = ContractVariable::param(7).deref(2);
        let ret = ContractVariable::return_val();
        assert!(param < ret);
    }

    #[test]
    fn ordering_is_consistent_with_equality() {
        let a = ContractVariable::param(1).deref(1);
        let b = ContractVariable::param(1).deref(1);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a, b);
    }

    #[test]
    fn dump_parameter_and_derefs() {
        let names = ["a", "b"];
        assert_eq!(ContractVariable::param(0).dump(&names), "a");
        assert_eq!(ContractVariable::param(0).deref(1).dump(&names), "*a");
        assert_eq!(ContractVariable::param(0).deref(2).dump(&names), "**a");
        assert_eq!(ContractVariable::param(5).dump(&names), "p5");
    }

    #[test]
    fn dump_field_chains() {
        let names = ["a"];
        assert_eq!(
            ContractVariable::param(0).add_field_ref("b").dump(&names),
            "a.b"
        );
        // A field access after a dereference parenthesizes the prefix.
        assert_eq!(
            ContractVariable::param(0)
                .deref(1)
                .add_field_ref("b")
                .dump(&names),
            "(*a).b"
        );
        assert_eq!(
            ContractVariable::param(0)
                .add_field_ref("b")
                .add_field_ref("c")
                .dump(&names),
            "a.b.c"
        );
    }

    #[test]
    fn dump_special_bases() {
        assert_eq!(ContractVariable::null().dump(&[]), "null");
        assert_eq!(ContractVariable::global().dump(&[]), "global");
        assert_eq!(ContractVariable::invalid().dump(&[]), "invalid");
        assert_eq!(ContractVariable::this(RecordId(3)).dump(&[]), "this");
        assert_eq!(ContractVariable::return_val().dump(&[]), "(return value)");
        assert_eq!(
            ContractVariable::this(RecordId(3)).deref(1).dump(&[]),
            "*this"
        );
    }

    #[test]
    fn predicates() {
        assert!(ContractVariable::this(RecordId(0)).is_this_pointer());
        assert!(ContractVariable::return_val().is_return_val());
        assert!(ContractVariable::null().is_null());
        assert!(ContractVariable::global().is_global());
        assert!(ContractVariable::invalid().is_invalid());
        assert_eq!(ContractVariable::param(4).param_index(), Some(4));
        assert_eq!(ContractVariable::return_val().param_index(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let var = ContractVariable::param(1).deref(1).add_field_ref("next");
        let json = serde_json::to_string(&var).unwrap();
        let back: ContractVariable = serde_json::from_str(&json).unwrap();
        assert_eq!(var, back);
    }
}
