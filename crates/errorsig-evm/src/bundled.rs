//! The bundled catalog: the error ABIs of the deployed contract suite,
//! compiled into the binary.
//!
//! Sets are searched in the order listed in [`BUNDLED_ABIS`]. The built-in
//! Solidity errors come last so a contract-specific definition always wins.

use errorsig_core::{AbiErrorSet, Catalog, CatalogBuilder};

use crate::abi::{error_set_from_abi_json, AbiLoadError};

/// Version tag recorded on catalogs built from the bundled ABIs.
pub const BUNDLED_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `(set name, ABI JSON)` in search order.
pub const BUNDLED_ABIS: &[(&str, &str)] = &[
    ("Collective", include_str!("../abis/collective.json")),
    ("MockToken", include_str!("../abis/mock_token.json")),
    ("HoneyPot", include_str!("../abis/honey_pot.json")),
    ("Pool", include_str!("../abis/pool.json")),
    ("CWallet", include_str!("../abis/c_wallet.json")),
    ("ZoraNFT", include_str!("../abis/zora_nft.json")),
    ("ERC20Minter", include_str!("../abis/erc20_minter.json")),
    ("Solidity", include_str!("../abis/solidity.json")),
];

/// Parse every bundled ABI into an error set.
pub fn bundled_sets() -> Result<Vec<AbiErrorSet>, AbiLoadError> {
    BUNDLED_ABIS
        .iter()
        .map(|(name, json)| error_set_from_abi_json(name, json))
        .collect()
}

/// A builder pre-loaded with the bundled sets, for callers that want to
/// append their own.
pub fn bundled_builder() -> Result<CatalogBuilder, AbiLoadError> {
    Ok(Catalog::builder()
        .version(BUNDLED_VERSION)
        .sets(bundled_sets()?))
}

/// The bundled catalog on its own.
pub fn bundled_catalog() -> Result<Catalog, AbiLoadError> {
    Ok(bundled_builder()?.build()?)
}
