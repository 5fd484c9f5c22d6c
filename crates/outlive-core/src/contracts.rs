//! Per-declaration contract maps.
//!
//! A [`ContractMap`] collects the lifetime contracts declared by one
//! function signature's annotations: an ordered mapping from a pointer-like
//! location to the declared points-to set of its pointee. The host creates
//! an empty map when it begins processing a declaration's annotations,
//! populates it one successfully extracted annotation at a time, and hands
//! the finished map to the downstream flow analysis.
//!
//! [`DeclContracts`] pairs the two maps of a declaration: one for
//! preconditions and one for postconditions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pset::PSet;
use crate::variable::ContractVariable;

/// Ordered mapping from a pointer-like location to its declared pointee
/// lifetime. Keys are ordered by the canonical [`ContractVariable`]
/// ordering, giving deterministic iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMap {
    // Serialized as a sequence of pairs: JSON map keys must be strings,
    // and ContractVariable is a structured value.
    #[serde(with = "entries_as_pairs")]
    entries: BTreeMap<ContractVariable, PSet>,
}

mod entries_as_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::pset::PSet;
    use crate::variable::ContractVariable;

    pub fn serialize<S>(
        map: &BTreeMap<ContractVariable, PSet>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<ContractVariable, PSet>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs: Vec<(ContractVariable, PSet)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl ContractMap {
    pub fn new() -> Self {
        ContractMap::default()
    }

    /// Inserts or replaces the entry for `key`, returning the replaced set.
    /// A later annotation for the same key wins over an earlier one.
    pub fn insert(&mut self, key: ContractVariable, value: PSet) -> Option<PSet> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &ContractVariable) -> Option<&PSet> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &ContractVariable) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContractVariable, &PSet)> {
        self.entries.iter()
    }
}

/// Which side of the declaration an annotation constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractKind {
    /// Holds on entry to the function.
    Pre,
    /// Holds when the function returns.
    Post,
}

/// Pre- and post-condition contract maps of a single declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclContracts {
    pub pre: ContractMap,
    pub post: ContractMap,
}

impl DeclContracts {
    pub fn new() -> Self {
        DeclContracts::default()
    }

    pub fn map(&self, kind: ContractKind) -> &ContractMap {
        match kind {
            ContractKind::Pre => &self.pre,
            ContractKind::Post => &self.post,
        }
    }

    pub fn map_mut(&mut self, kind: ContractKind) -> &mut ContractMap {
        match kind {
            ContractKind::Pre => &mut self.pre,
            ContractKind::Post => &mut self.post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_entry() {
        let mut map = ContractMap::new();
        let key = ContractVariable::param(0);

        let old = map.insert(key.clone(), PSet::singleton(ContractVariable::param(1)));
        assert!(old.is_none());

        let old = map.insert(key.clone(), PSet::singleton(ContractVariable::param(2)));
        assert_eq!(old, Some(PSet::singleton(ContractVariable::param(1))));

        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get(&key),
            Some(&PSet::singleton(ContractVariable::param(2)))
        );
    }

    #[test]
    fn iteration_follows_canonical_key_order() {
        let mut map = ContractMap::new();
        map.insert(ContractVariable::return_val(), PSet::new());
        map.insert(ContractVariable::param(1), PSet::new());
        map.insert(ContractVariable::param(0), PSet::new());

        let keys: Vec<_> = map.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ContractVariable::param(0),
                ContractVariable::param(1),
                ContractVariable::return_val(),
            ]
        );
    }

    #[test]
    fn decl_contracts_keeps_pre_and_post_separate() {
        let mut contracts = DeclContracts::new();
        contracts.map_mut(ContractKind::Pre).insert(
            ContractVariable::param(0),
            PSet::singleton(ContractVariable::param(1)),
        );

        assert_eq!(contracts.map(ContractKind::Pre).len(), 1);
        assert!(contracts.map(ContractKind::Post).is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let mut map = ContractMap::new();
        map.insert(
            ContractVariable::param(0),
            PSet::singleton(ContractVariable::return_val()),
        );
        let json = serde_json::to_string(&map).unwrap();
        let back: ContractMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
