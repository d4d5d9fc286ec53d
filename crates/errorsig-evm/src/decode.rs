//! Decode full revert payloads against a catalog.
//!
//! Custom errors are ABI-encoded as:
//! `selector(4 bytes)` ++ `ABI-encoded arguments`
//!
//! The selector is resolved first; the arguments are then decoded with the
//! parameter types of the matched definition.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::U256;
use errorsig_core::{resolver, Catalog, CatalogEntry, Selector};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::abi::validate_type;
use crate::panic::{panic_meaning, PANIC_SELECTOR};

/// Errors that can occur while decoding revert data.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid revert data: invalid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("Revert data too short: {len} bytes (need at least 4 for selector)")]
    TooShort { len: usize },

    #[error("Unsupported type {ty:?} in {signature}: {reason}")]
    InvalidType {
        signature: String,
        ty: String,
        reason: String,
    },

    #[error("ABI decode failed for {signature}: {reason}")]
    AbiDecodeFailed { signature: String, reason: String },
}

/// A decoded argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ArgValue {
    Uint(u128),
    BigUint(String),
    Int(i128),
    BigInt(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    Address(String),
    List(Vec<ArgValue>),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::BigUint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Address(a) => write!(f, "{a}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// One decoded argument with its display name and type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedArg {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: ArgValue,
}

/// A catalog error recognised in revert data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedCustomError {
    pub set: String,
    pub name: String,
    pub signature: String,
    pub args: Vec<DecodedArg>,
    /// Description of the code when the error is `Panic(uint256)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic: Option<String>,
}

/// Result of decoding one revert payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRevert {
    pub selector: Selector,
    /// `None` when no catalog entry carries the selector.
    pub error: Option<DecodedCustomError>,
}

impl fmt::Display for DecodedRevert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(err) = &self.error else {
            return write!(f, "No matching error found for selector {}", self.selector);
        };
        let args: Vec<String> = err
            .args
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if a.name.is_empty() {
                    format!("arg{i}={}", a.value)
                } else {
                    format!("{}={}", a.name, a.value)
                }
            })
            .collect();
        write!(f, "{}({})", err.name, args.join(", "))?;
        if let Some(meaning) = &err.panic {
            write!(f, ": {meaning}")?;
        }
        Ok(())
    }
}

/// Decode revert data (selector ++ ABI-encoded arguments).
///
/// An unknown selector is not an error: the result carries `error: None`.
pub fn decode_revert(catalog: &Catalog, data: &[u8]) -> Result<DecodedRevert, DecodeError> {
    let selector =
        Selector::from_revert_data(data).ok_or(DecodeError::TooShort { len: data.len() })?;

    let Some(found) = resolver::resolve(catalog, selector).found() else {
        tracing::debug!(%selector, "no catalog entry for revert selector");
        return Ok(DecodedRevert {
            selector,
            error: None,
        });
    };

    let args = decode_args(found.entry, &data[4..])?;
    let panic = if selector == PANIC_SELECTOR {
        match args.first().map(|a| &a.value) {
            Some(ArgValue::Uint(code)) => {
                Some(panic_meaning(u64::try_from(*code).unwrap_or(u64::MAX)).to_string())
            }
            _ => Some(panic_meaning(u64::MAX).to_string()),
        }
    } else {
        None
    };

    Ok(DecodedRevert {
        selector,
        error: Some(DecodedCustomError {
            set: found.set.to_string(),
            name: found.name().to_string(),
            signature: found.entry.signature.clone(),
            args,
            panic,
        }),
    })
}

/// Convenience: decode from a hex string (`0x`/`0X` prefix optional).
pub fn decode_revert_hex(catalog: &Catalog, hex_str: &str) -> Result<DecodedRevert, DecodeError> {
    let trimmed = hex_str.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(stripped).map_err(|e| DecodeError::InvalidHex {
        reason: e.to_string(),
    })?;
    decode_revert(catalog, &bytes)
}

fn decode_args(entry: &CatalogEntry, payload: &[u8]) -> Result<Vec<DecodedArg>, DecodeError> {
    let inputs = &entry.definition.inputs;
    if inputs.is_empty() {
        return Ok(vec![]);
    }

    let types = inputs
        .iter()
        .map(|p| {
            validate_type(&p.ty).map_err(|reason| DecodeError::InvalidType {
                signature: entry.signature.clone(),
                ty: p.ty.clone(),
                reason,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(payload)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            signature: entry.signature.clone(),
            reason: e.to_string(),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        single => vec![single],
    };

    Ok(inputs
        .iter()
        .zip(values.iter())
        .map(|(param, val)| DecodedArg {
            name: param.name.clone(),
            ty: param.ty.clone(),
            value: to_arg_value(val),
        })
        .collect())
}

fn to_arg_value(val: &DynSolValue) -> ArgValue {
    match val {
        DynSolValue::Uint(v, _) => {
            if *v <= U256::from(u128::MAX) {
                ArgValue::Uint(v.to::<u128>())
            } else {
                ArgValue::BigUint(v.to_string())
            }
        }
        DynSolValue::Int(v, _) => match i128::try_from(*v) {
            Ok(i) => ArgValue::Int(i),
            Err(_) => ArgValue::BigInt(v.to_string()),
        },
        DynSolValue::Bool(b) => ArgValue::Bool(*b),
        DynSolValue::Address(a) => ArgValue::Address(format!("{a:#x}")),
        DynSolValue::String(s) => ArgValue::Str(s.clone()),
        DynSolValue::Bytes(b) => ArgValue::Bytes(b.clone()),
        DynSolValue::FixedBytes(word, size) => ArgValue::Bytes(word[..*size].to_vec()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            ArgValue::List(items.iter().map(to_arg_value).collect())
        }
        other => ArgValue::Str(format!("{other:?}")),
    }
}
