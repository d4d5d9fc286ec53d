//! errorsig-evm: EVM error catalogs and revert decoding, built on alloy-rs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use errorsig_core::resolver;
//! use errorsig_evm::bundled_catalog;
//!
//! let catalog = bundled_catalog().unwrap();
//! let res = resolver::resolve_hex(&catalog, "0xd9f55f13").unwrap();
//! println!("{res}");  // "Matching Error: CWallet__OnlyWhitelistedTargets"
//! ```

pub mod abi;
pub mod bundled;
pub mod decode;
pub mod panic;

pub use abi::{error_set_from_abi_json, error_set_from_path, AbiLoadError};
pub use bundled::{bundled_builder, bundled_catalog, bundled_sets};
pub use decode::{decode_revert, decode_revert_hex, DecodeError, DecodedRevert};
