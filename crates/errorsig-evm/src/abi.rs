//! Load error sets from standard Ethereum ABI JSON.
//!
//! Only `"type": "error"` items are kept, in declaration order. Each
//! parameter contributes its canonical selector type (tuples expanded to
//! `(t1,t2)`), validated with alloy's type parser.

use alloy_core::dyn_abi::DynSolType;
use alloy_json_abi::Param;
use errorsig_core::{encoder, AbiErrorSet, CatalogError, ErrorDefinition, ErrorParameter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning ABI JSON into an [`AbiErrorSet`].
#[derive(Debug, Error)]
pub enum AbiLoadError {
    #[error("Invalid ABI JSON for {set}: {reason}")]
    InvalidJson { set: String, reason: String },

    #[error("Invalid ABI item {index} in {set}: {reason}")]
    InvalidItem {
        set: String,
        index: usize,
        reason: String,
    },

    #[error("Invalid type {ty:?} in {set}.{error}: {reason}")]
    InvalidType {
        set: String,
        error: String,
        ty: String,
        reason: String,
    },

    #[error("Failed to read ABI file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Build an error set from an ABI JSON string.
///
/// Accepts a bare ABI array or a compiler artifact object with an `"abi"`
/// field (Hardhat / Foundry output).
pub fn error_set_from_abi_json(set: &str, json: &str) -> Result<AbiErrorSet, AbiLoadError> {
    let invalid_json = |reason: String| AbiLoadError::InvalidJson {
        set: set.to_string(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| invalid_json(e.to_string()))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("abi") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(invalid_json("expected an array or an object with an \"abi\" array".into())),
        },
        _ => return Err(invalid_json("expected an array or an object with an \"abi\" array".into())),
    };

    let mut errors = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if item.get("type").and_then(|t| t.as_str()) != Some("error") {
            continue;
        }
        errors.push(parse_error_item(set, index, item)?);
    }

    tracing::debug!(set, errors = errors.len(), "parsed ABI error set");
    Ok(AbiErrorSet::new(set, errors))
}

/// Read and parse an ABI JSON file.
pub fn error_set_from_path(set: &str, path: &Path) -> Result<AbiErrorSet, AbiLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| AbiLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    error_set_from_abi_json(set, &json)
}

fn parse_error_item(
    set: &str,
    index: usize,
    item: serde_json::Value,
) -> Result<ErrorDefinition, AbiLoadError> {
    let invalid_item = |reason: String| AbiLoadError::InvalidItem {
        set: set.to_string(),
        index,
        reason,
    };

    let name = item
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| invalid_item("error item has no name".into()))?
        .to_string();

    let inputs: Vec<Param> = match item.get("inputs") {
        Some(raw) => serde_json::from_value(raw.clone())
            .map_err(|e| invalid_item(format!("bad inputs for {name}: {e}")))?,
        None => Vec::new(),
    };

    let params = inputs
        .iter()
        .map(|param| {
            let ty = canonical_type(param);
            validate_type(&ty).map_err(|reason| AbiLoadError::InvalidType {
                set: set.to_string(),
                error: name.clone(),
                ty: ty.clone(),
                reason,
            })?;
            Ok(ErrorParameter::new(param.name.clone(), ty))
        })
        .collect::<Result<Vec<_>, AbiLoadError>>()?;

    Ok(ErrorDefinition::new(name, params))
}

/// `tuple[2]` with components `(address,uint)` → `(address,uint256)[2]`.
fn canonical_type(param: &Param) -> String {
    match param.ty.strip_prefix("tuple") {
        Some(suffix) => {
            let inner: Vec<String> = param.components.iter().map(canonical_type).collect();
            format!("({}){suffix}", inner.join(","))
        }
        None => encoder::canonical_type(&param.ty),
    }
}

/// Check that `ty` is a Solidity type alloy can encode and decode.
pub fn validate_type(ty: &str) -> Result<DynSolType, String> {
    DynSolType::parse(ty).map_err(|e| e.to_string())
}
