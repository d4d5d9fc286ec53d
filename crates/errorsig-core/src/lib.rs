//! errorsig-core: error catalog, signature encoder and selector resolver.
//!
//! This crate defines:
//! - [`ErrorDefinition`] / [`ErrorParameter`] / [`AbiErrorSet`]: the data model
//! - [`encoder`]: canonical signatures and keccak256 selectors
//! - [`Catalog`]: the validated, immutable set of known errors
//! - [`resolver`]: selector → definition lookup
//!
//! ```rust
//! use errorsig_core::{resolver, AbiErrorSet, Catalog, ErrorDefinition};
//!
//! let def: ErrorDefinition = "AddressEmptyCode(address target)".parse().unwrap();
//! let catalog = Catalog::from_sets([AbiErrorSet::new("Collective", vec![def])]).unwrap();
//!
//! let res = resolver::resolve_hex(&catalog, "0x9996b315").unwrap();
//! assert_eq!(res.to_string(), "Matching Error: AddressEmptyCode");
//! ```

pub mod catalog;
pub mod encoder;
pub mod error;
pub mod resolver;
pub mod types;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, CatalogSet};
pub use encoder::{canonical_signature, canonical_type, selector_of};
pub use error::{CatalogError, SelectorError};
pub use resolver::{Match, Resolution, SelectorResolver};
pub use types::{AbiErrorSet, ErrorDefinition, ErrorParameter, Selector};
