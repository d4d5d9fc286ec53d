//! Core data model: selectors, parameters, error definitions and ABI sets.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::encoder;
use crate::error::{CatalogError, SelectorError};

// ─── Selector ─────────────────────────────────────────────────────────────────

/// A 4-byte error selector: `keccak256(signature)[..4]`.
///
/// Displays as `0x` followed by 8 lowercase hex digits. Parsing accepts an
/// optional `0x`/`0X` prefix and hex digits in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Hex without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Take the selector from the first 4 bytes of revert data.
    pub fn from_revert_data(data: &[u8]) -> Option<Self> {
        let head: [u8; 4] = data.get(..4)?.try_into().ok()?;
        Some(Self(head))
    }
}

impl From<[u8; 4]> for Selector {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<Selector> for [u8; 4] {
    fn from(sel: Selector) -> Self {
        sel.0
    }
}

impl TryFrom<&[u8]> for Selector {
    type Error = SelectorError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 4] = bytes
            .try_into()
            .map_err(|_| SelectorError::WrongLength { len: bytes.len() })?;
        Ok(Self(arr))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| SelectorError::InvalidHex {
            reason: e.to_string(),
        })?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ─── ErrorParameter ───────────────────────────────────────────────────────────

/// A single typed input of a custom error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorParameter {
    /// Display name (may be empty). Never part of the signature.
    #[serde(default)]
    pub name: String,
    /// Canonical Solidity type (e.g. `"address"`, `"uint256"`, `"bytes16"`).
    #[serde(rename = "type")]
    pub ty: String,
}

impl ErrorParameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A parameter with no display name.
    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self::new(String::new(), ty)
    }
}

// ─── ErrorDefinition ──────────────────────────────────────────────────────────

/// A named custom error with its ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDefinition {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ErrorParameter>,
}

impl ErrorDefinition {
    pub fn new(name: impl Into<String>, inputs: Vec<ErrorParameter>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }

    /// See [`encoder::canonical_signature`].
    pub fn signature(&self) -> String {
        encoder::canonical_signature(self)
    }

    /// See [`encoder::selector_of`].
    pub fn selector(&self) -> Selector {
        encoder::selector_of(self)
    }
}

impl fmt::Display for ErrorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .inputs
            .iter()
            .map(|p| {
                if p.name.is_empty() {
                    p.ty.clone()
                } else {
                    format!("{} {}", p.ty, p.name)
                }
            })
            .collect();
        write!(f, "{}({})", self.name, args.join(", "))
    }
}

/// Parses `"Name(type1,type2)"`. Each parameter may carry a display name
/// after its type (`"Name(address owner, uint256)"`). Tuple types keep their
/// inner commas.
impl FromStr for ErrorDefinition {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CatalogError::InvalidSignature {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let open = trimmed.find('(').ok_or_else(|| invalid("missing '('"))?;
        let body = trimmed[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing closing ')'"))?;
        let name = trimmed[..open].trim();
        if let Some(reason) = name_problem(name) {
            return Err(invalid(&reason));
        }

        let mut inputs = Vec::new();
        if !body.trim().is_empty() {
            for piece in split_top_level(body).ok_or_else(|| invalid("unbalanced parentheses"))? {
                let piece = piece.trim();
                if piece.is_empty() {
                    return Err(invalid("empty parameter"));
                }
                let (ty, display) = split_type_and_name(piece);
                if !is_plausible_type(&ty) {
                    return Err(invalid(&format!("invalid type {ty:?}")));
                }
                inputs.push(ErrorParameter::new(display, encoder::canonical_type(&ty)));
            }
        }

        Ok(Self::new(name, inputs))
    }
}

/// Split on commas at parenthesis depth zero.
fn split_top_level(body: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}

/// `"(uint256, address) pair"` → (`"(uint256,address)"`, `"pair"`).
fn split_type_and_name(piece: &str) -> (String, String) {
    let mut depth = 0usize;
    for (i, c) in piece.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                let ty: String = piece[..i].chars().filter(|c| !c.is_whitespace()).collect();
                return (ty, piece[i..].trim().to_string());
            }
            _ => {}
        }
    }
    let ty = piece.chars().filter(|c| !c.is_whitespace()).collect();
    (ty, String::new())
}

/// Returns the reason `name` is not a valid Solidity identifier.
pub(crate) fn name_problem(name: &str) -> Option<String> {
    let mut chars = name.chars();
    match chars.next() {
        None => Some("name is empty".into()),
        Some(c) if c.is_ascii_digit() => Some("name starts with a digit".into()),
        Some(_) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') => {
            Some("name contains characters outside [A-Za-z0-9_$]".into())
        }
        Some(_) => None,
    }
}

/// Syntactic check only: alphanumerics, `[]` and balanced `(),` with no
/// whitespace. Semantic validation belongs to the ABI layer.
pub(crate) fn is_plausible_type(ty: &str) -> bool {
    if ty.is_empty() {
        return false;
    }
    let mut depth = 0i32;
    for c in ty.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            ',' if depth == 0 => return false,
            c if c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | ',') => {}
            _ => return false,
        }
    }
    depth == 0
}

// ─── AbiErrorSet ──────────────────────────────────────────────────────────────

/// The custom errors declared by one source contract, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiErrorSet {
    pub name: String,
    pub errors: Vec<ErrorDefinition>,
}

impl AbiErrorSet {
    pub fn new(name: impl Into<String>, errors: Vec<ErrorDefinition>) -> Self {
        Self {
            name: name.into(),
            errors,
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
