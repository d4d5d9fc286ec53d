//! Error types for selector parsing and catalog construction.

use thiserror::Error;

/// An observed selector that could not be normalized to exactly 4 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Malformed selector: invalid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("Malformed selector: expected 4 bytes, got {len}")]
    WrongLength { len: usize },
}

/// A catalog input that is internally inconsistent.
///
/// Raised by [`CatalogBuilder::build`](crate::catalog::CatalogBuilder::build)
/// and by the signature parser, never during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("ABI set name must not be empty")]
    EmptySetName,

    #[error("Duplicate ABI set: {set}")]
    DuplicateSet { set: String },

    #[error("Invalid error name {name:?} in set {set}: {reason}")]
    InvalidName {
        set: String,
        name: String,
        reason: String,
    },

    #[error("Invalid type {ty:?} for parameter {index} of {error} in set {set}")]
    InvalidType {
        set: String,
        error: String,
        index: usize,
        ty: String,
    },

    #[error("Invalid error signature {input:?}: {reason}")]
    InvalidSignature { input: String, reason: String },
}
