//! Selector resolution: map an observed 4-byte selector back to the error
//! definition that produced it.
//!
//! Search order is catalog order: sets in the order they were added, then
//! entries in declaration order. The first entry whose selector matches wins.
//! Collisions beyond that are not disambiguated; [`candidates`] lists them.

use serde::Serialize;
use std::fmt;

use crate::catalog::{Catalog, CatalogEntry, CatalogSet};
use crate::error::SelectorError;
use crate::types::{ErrorDefinition, Selector};

/// A catalog entry matched by a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match<'a> {
    /// Name of the ABI set the entry belongs to.
    pub set: &'a str,
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
}

impl<'a> Match<'a> {
    fn new(set: &'a CatalogSet, entry: &'a CatalogEntry) -> Self {
        Self {
            set: set.name(),
            entry,
        }
    }

    pub fn definition(&self) -> &'a ErrorDefinition {
        &self.entry.definition
    }

    pub fn name(&self) -> &'a str {
        &self.entry.definition.name
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.entry.selector, self.set, self.entry.signature)
    }
}

/// Outcome of resolving one selector. `NotFound` is a normal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution<'a> {
    Found(Match<'a>),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<Match<'a>> {
        match self {
            Self::Found(m) => Some(m),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(m) => write!(f, "Matching Error: {}", m.name()),
            Self::NotFound => write!(f, "No matching error found"),
        }
    }
}

/// Resolve through the precomputed selector index.
pub fn resolve(catalog: &Catalog, observed: Selector) -> Resolution<'_> {
    let resolution = match catalog.first_with(observed) {
        Some((set, entry)) => Resolution::Found(Match::new(set, entry)),
        None => Resolution::NotFound,
    };
    tracing::trace!(selector = %observed, found = resolution.is_found(), "resolved selector");
    resolution
}

/// Linear scan over the catalog in search order. Always agrees with
/// [`resolve`].
pub fn scan(catalog: &Catalog, observed: Selector) -> Resolution<'_> {
    catalog
        .entries()
        .find(|(_, entry)| entry.selector == observed)
        .map_or(Resolution::NotFound, |(set, entry)| {
            Resolution::Found(Match::new(set, entry))
        })
}

/// Every entry carrying `observed`, in search order. More than one element
/// means the selector is ambiguous within the catalog.
pub fn candidates(catalog: &Catalog, observed: Selector) -> Vec<Match<'_>> {
    catalog
        .entries()
        .filter(|(_, entry)| entry.selector == observed)
        .map(|(set, entry)| Match::new(set, entry))
        .collect()
}

/// Resolve a hex selector (`0x` prefix optional, any case). Malformed input
/// is rejected before the catalog is touched.
pub fn resolve_hex<'a>(catalog: &'a Catalog, observed: &str) -> Result<Resolution<'a>, SelectorError> {
    let selector: Selector = observed.parse()?;
    Ok(resolve(catalog, selector))
}

/// Resolve a raw selector that must be exactly 4 bytes long.
pub fn resolve_bytes<'a>(catalog: &'a Catalog, observed: &[u8]) -> Result<Resolution<'a>, SelectorError> {
    let selector = Selector::try_from(observed)?;
    Ok(resolve(catalog, selector))
}

/// Anything that can answer "which error has this selector?".
///
/// [`Catalog`] is the bundled implementation. Implementations must be
/// `Send + Sync` so they can be shared between threads.
pub trait SelectorResolver: Send + Sync {
    fn resolve(&self, observed: Selector) -> Resolution<'_>;

    /// Convenience: resolve from a hex string (with or without `0x` prefix).
    fn resolve_hex(&self, observed: &str) -> Result<Resolution<'_>, SelectorError> {
        let selector: Selector = observed.parse()?;
        Ok(self.resolve(selector))
    }
}

impl SelectorResolver for Catalog {
    fn resolve(&self, observed: Selector) -> Resolution<'_> {
        resolve(self, observed)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
