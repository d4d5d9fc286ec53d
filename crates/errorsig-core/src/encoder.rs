//! Signature encoder.
//!
//! The selector of a custom error is the keccak256 hash of its canonical
//! signature string, truncated to 4 bytes:
//!   keccak256("AddressEmptyCode(address)")[..4] → 0x9996b315

use tiny_keccak::{Hasher, Keccak};

use crate::types::{ErrorDefinition, Selector};

/// `"Name(type1,type2,...)"`, types in declaration order, no spaces.
/// Display names never appear. Type aliases are expanded with
/// [`canonical_type`].
pub fn canonical_signature(def: &ErrorDefinition) -> String {
    let types: Vec<String> = def.inputs.iter().map(|p| canonical_type(&p.ty)).collect();
    format!("{}({})", def.name, types.join(","))
}

/// Expand Solidity type aliases anywhere in `ty`, including tuple
/// components and array element types: `(uint,byte)[2]` → `(uint256,bytes1)[2]`.
pub fn canonical_type(ty: &str) -> String {
    let mut out = String::with_capacity(ty.len() + 8);
    let mut word_start = None;
    for (i, c) in ty.char_indices() {
        if c.is_ascii_alphanumeric() {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            out.push_str(expand_alias(&ty[start..i]));
        }
        out.push(c);
    }
    if let Some(start) = word_start {
        out.push_str(expand_alias(&ty[start..]));
    }
    out
}

fn expand_alias(word: &str) -> &str {
    match word {
        "uint" => "uint256",
        "int" => "int256",
        "byte" => "bytes1",
        "fixed" => "fixed128x18",
        "ufixed" => "ufixed128x18",
        other => other,
    }
}

/// First 4 bytes of `keccak256(canonical_signature(def))`.
pub fn selector_of(def: &ErrorDefinition) -> Selector {
    selector_of_signature(&canonical_signature(def))
}

/// Selector of an already-canonical signature string.
pub fn selector_of_signature(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::new([hash[0], hash[1], hash[2], hash[3]])
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}
