//! The two revert payloads every Solidity contract can emit without
//! declaring them: `Error(string)` from `require`/`revert("...")` and
//! `Panic(uint256)` from compiler-inserted checks. Both live in the bundled
//! `Solidity` set, searched after every contract set.

use errorsig_core::Selector;

/// `Panic(uint256)` → `0x4e487b71`.
pub const PANIC_SELECTOR: Selector = Selector::new([0x4e, 0x48, 0x7b, 0x71]);

/// `Error(string)` → `0x08c379a0`.
pub const ERROR_STRING_SELECTOR: Selector = Selector::new([0x08, 0xc3, 0x79, 0xa0]);

/// Panic codes emitted by solc >= 0.8, ascending.
const PANIC_CODES: &[(u64, &str)] = &[
    (0x00, "generic compiler panic"),
    (0x01, "assert condition was false"),
    (0x11, "arithmetic overflow or underflow"),
    (0x12, "division or modulo by zero"),
    (0x21, "conversion to an out-of-range enum value"),
    (0x22, "storage byte array is incorrectly encoded"),
    (0x31, "pop on an empty array"),
    (0x32, "array index out of bounds"),
    (0x41, "memory allocation too large"),
    (0x51, "call to an uninitialized internal function"),
];

/// What a `Panic(uint256)` code means. Codes solc does not emit map to
/// `"unknown panic code"`.
pub fn panic_meaning(code: u64) -> &'static str {
    PANIC_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("unknown panic code", |&(_, meaning)| meaning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use errorsig_core::encoder::selector_of_signature;
    use errorsig_core::resolver;

    #[test]
    fn constants_are_builtin_selectors() {
        assert_eq!(selector_of_signature("Panic(uint256)"), PANIC_SELECTOR);
        assert_eq!(selector_of_signature("Error(string)"), ERROR_STRING_SELECTOR);
        assert_eq!(PANIC_SELECTOR.to_string(), "0x4e487b71");
        assert_eq!(ERROR_STRING_SELECTOR.to_string(), "0x08c379a0");
    }

    #[test]
    fn constants_resolve_in_bundled_solidity_set() {
        let catalog = crate::bundled_catalog().unwrap();
        for (sel, name) in [(PANIC_SELECTOR, "Panic"), (ERROR_STRING_SELECTOR, "Error")] {
            let found = resolver::resolve(&catalog, sel).found().unwrap();
            assert_eq!(found.set, "Solidity");
            assert_eq!(found.name(), name);
        }
    }

    #[test]
    fn code_table_is_ascending() {
        assert!(PANIC_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn meanings() {
        assert_eq!(panic_meaning(0x12), "division or modulo by zero");
        assert_eq!(panic_meaning(0x32), "array index out of bounds");
        assert_eq!(panic_meaning(0x02), "unknown panic code");
        assert_eq!(panic_meaning(u64::MAX), "unknown panic code");
    }
}
