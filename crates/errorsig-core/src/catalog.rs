//! The error catalog: every known ABI error set, validated and frozen.
//!
//! A [`Catalog`] is only obtainable through [`CatalogBuilder::build`], which
//! validates every definition, precomputes its signature and selector, and
//! builds the selector index before handing the catalog out. After that the
//! catalog is never mutated, so it can be shared across threads freely.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::encoder;
use crate::error::CatalogError;
use crate::types::{is_plausible_type, name_problem, AbiErrorSet, ErrorDefinition, Selector};

/// A definition together with its precomputed signature and selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub definition: ErrorDefinition,
    pub signature: String,
    pub selector: Selector,
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// One validated ABI set.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSet {
    name: String,
    entries: Vec<CatalogEntry>,
}

impl CatalogSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Position of an entry: (set index, entry index).
type EntryRef = (usize, usize);

/// The immutable, ordered collection of every known ABI error set.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    sets: Vec<CatalogSet>,
    /// selector → first entry carrying it, in catalog iteration order
    index: HashMap<Selector, EntryRef>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build a catalog from sets with an empty version tag.
    pub fn from_sets(sets: impl IntoIterator<Item = AbiErrorSet>) -> Result<Self, CatalogError> {
        CatalogBuilder::new().sets(sets).build()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sets in search order.
    pub fn sets(&self) -> &[CatalogSet] {
        &self.sets
    }

    pub fn set(&self, name: &str) -> Option<&CatalogSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Every entry in search order: set order, then declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&CatalogSet, &CatalogEntry)> + '_ {
        self.sets
            .iter()
            .flat_map(|set| set.entries.iter().map(move |entry| (set, entry)))
    }

    /// Total number of entries across all sets.
    pub fn len(&self) -> usize {
        self.sets.iter().map(CatalogSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First entry carrying `selector` in search order.
    pub(crate) fn first_with(&self, selector: Selector) -> Option<(&CatalogSet, &CatalogEntry)> {
        let &(set_idx, entry_idx) = self.index.get(&selector)?;
        let set = &self.sets[set_idx];
        Some((set, &set.entries[entry_idx]))
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Collects ABI sets and validates them into a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    version: String,
    sets: Vec<AbiErrorSet>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version tag of the catalog data (e.g. the release the ABIs came from).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a set. Sets are searched in the order they are added.
    pub fn set(mut self, set: AbiErrorSet) -> Self {
        self.sets.push(set);
        self
    }

    pub fn sets(mut self, sets: impl IntoIterator<Item = AbiErrorSet>) -> Self {
        self.sets.extend(sets);
        self
    }

    /// Validate every set and freeze the catalog.
    ///
    /// Within one set, an exact repeat of an earlier signature is dropped;
    /// overloads (same name, different types) are kept.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut seen_sets = HashSet::new();
        let mut sets = Vec::with_capacity(self.sets.len());
        let mut index = HashMap::new();

        for (set_idx, abi_set) in self.sets.into_iter().enumerate() {
            if abi_set.name.trim().is_empty() {
                return Err(CatalogError::EmptySetName);
            }
            if !seen_sets.insert(abi_set.name.clone()) {
                return Err(CatalogError::DuplicateSet { set: abi_set.name });
            }

            let mut signatures = HashSet::new();
            let mut entries = Vec::with_capacity(abi_set.errors.len());
            for def in abi_set.errors {
                validate_definition(&abi_set.name, &def)?;

                let signature = encoder::canonical_signature(&def);
                if !signatures.insert(signature.clone()) {
                    tracing::debug!(
                        set = %abi_set.name,
                        %signature,
                        "dropping repeated error signature"
                    );
                    continue;
                }
                let selector = encoder::selector_of_signature(&signature);
                if let Entry::Vacant(slot) = index.entry(selector) {
                    slot.insert((set_idx, entries.len()));
                }
                entries.push(CatalogEntry {
                    definition: def,
                    signature,
                    selector,
                });
            }

            tracing::debug!(set = %abi_set.name, errors = entries.len(), "catalog set loaded");
            sets.push(CatalogSet {
                name: abi_set.name,
                entries,
            });
        }

        let catalog = Catalog {
            version: self.version,
            sets,
            index,
        };
        tracing::debug!(
            version = %catalog.version,
            sets = catalog.sets.len(),
            errors = catalog.len(),
            "catalog built"
        );
        Ok(catalog)
    }
}

fn validate_definition(set: &str, def: &ErrorDefinition) -> Result<(), CatalogError> {
    if let Some(reason) = name_problem(&def.name) {
        return Err(CatalogError::InvalidName {
            set: set.to_string(),
            name: def.name.clone(),
            reason,
        });
    }
    for (index, param) in def.inputs.iter().enumerate() {
        if !is_plausible_type(&param.ty) {
            return Err(CatalogError::InvalidType {
                set: set.to_string(),
                error: def.name.clone(),
                index,
                ty: param.ty.clone(),
            });
        }
    }
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorParameter;

    fn def(name: &str, types: &[&str]) -> ErrorDefinition {
        ErrorDefinition::new(
            name,
            types.iter().map(|t| ErrorParameter::unnamed(*t)).collect(),
        )
    }

    #[test]
    fn build_precomputes_signatures() {
        let catalog = Catalog::builder()
            .version("v1")
            .set(AbiErrorSet::new("Pool", vec![def("EnforcedPause", &[])]))
            .build()
            .unwrap();
        assert_eq!(catalog.version(), "v1");
        assert_eq!(catalog.len(), 1);
        let (set, entry) = catalog.entries().next().unwrap();
        assert_eq!(set.name(), "Pool");
        assert_eq!(entry.signature, "EnforcedPause()");
        assert_eq!(entry.selector.to_string(), "0xd93c0665");
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_sets([]).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.sets().is_empty());
    }

    #[test]
    fn rejects_empty_set_name() {
        let err = Catalog::from_sets([AbiErrorSet::new(" ", vec![])]).unwrap_err();
        assert_eq!(err, CatalogError::EmptySetName);
    }

    #[test]
    fn rejects_duplicate_set() {
        let err = Catalog::from_sets([
            AbiErrorSet::new("Pool", vec![]),
            AbiErrorSet::new("Pool", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSet { ref set } if set == "Pool"));
    }

    #[test]
    fn rejects_empty_error_name() {
        let err = Catalog::from_sets([AbiErrorSet::new("Pool", vec![def("", &["address"])])])
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidName { .. }));
    }

    #[test]
    fn rejects_malformed_type() {
        let err = Catalog::from_sets([AbiErrorSet::new(
            "Pool",
            vec![def("Pool__ZeroParticipation", &["uint 256"])],
        )])
        .unwrap_err();
        match err {
            CatalogError::InvalidType { set, error, index, ty } => {
                assert_eq!(set, "Pool");
                assert_eq!(error, "Pool__ZeroParticipation");
                assert_eq!(index, 0);
                assert_eq!(ty, "uint 256");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn collapses_repeated_signature_within_set() {
        let catalog = Catalog::from_sets([AbiErrorSet::new(
            "ZoraNFT",
            vec![
                ErrorDefinition::new("CallFailed", vec![ErrorParameter::new("reason", "bytes")]),
                ErrorDefinition::new(
                    "CallFailed",
                    vec![ErrorParameter::new("lowLevelData", "bytes")],
                ),
                def("CallFailed", &[]),
            ],
        )])
        .unwrap();
        let set = catalog.set("ZoraNFT").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].definition.inputs[0].name, "reason");
        assert_eq!(set.entries()[1].signature, "CallFailed()");
    }

    #[test]
    fn keeps_same_signature_across_sets() {
        let catalog = Catalog::from_sets([
            AbiErrorSet::new("HoneyPot", vec![def("AddressEmptyCode", &["address"])]),
            AbiErrorSet::new("CWallet", vec![def("AddressEmptyCode", &["address"])]),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        let (set, _) = catalog
            .first_with("0x9996b315".parse().unwrap())
            .unwrap();
        assert_eq!(set.name(), "HoneyPot");
    }

    #[test]
    fn entries_follow_catalog_order() {
        let catalog = Catalog::from_sets([
            AbiErrorSet::new("A", vec![def("A1", &[]), def("A2", &[])]),
            AbiErrorSet::new("B", vec![def("B1", &[])]),
        ])
        .unwrap();
        let names: Vec<&str> = catalog.entries().map(|(_, e)| e.name()).collect();
        assert_eq!(names, ["A1", "A2", "B1"]);
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
