//! Golden fixture integration tests for errorsig-evm.
//!
//! Each test loads a fixture JSON from `fixtures/evm/` and checks selector
//! resolution or revert decoding against the bundled catalog.

use errorsig_core::{resolver, Catalog, Resolution, Selector};
use errorsig_evm::{bundled_catalog, decode_revert_hex};

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/evm");
    p.push(name);
    p
}

fn load_fixture(name: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(fixture_path(name)).expect("fixture not found");
    serde_json::from_str(&content).expect("invalid fixture JSON")
}

fn catalog() -> Catalog {
    bundled_catalog().expect("bundled catalog must build")
}

fn check_resolve_fixture(name: &str) {
    let f = load_fixture(name);
    let catalog = catalog();
    let observed = f["selector"].as_str().unwrap();
    let res = resolver::resolve_hex(&catalog, observed).unwrap();

    match f["expectedName"].as_str() {
        Some(expected) => {
            let found = res.found().unwrap_or_else(|| panic!("{name}: expected a match"));
            assert_eq!(found.name(), expected, "{name}: name mismatch");
            assert_eq!(found.set, f["expectedSet"].as_str().unwrap(), "{name}: set mismatch");
            assert_eq!(
                found.entry.signature,
                f["expectedSignature"].as_str().unwrap(),
                "{name}: signature mismatch"
            );
        }
        None => assert_eq!(res, Resolution::NotFound, "{name}: expected no match"),
    }

    let selector: Selector = observed.parse().unwrap();
    let sets: Vec<&str> = resolver::candidates(&catalog, selector)
        .iter()
        .map(|m| m.set)
        .collect();
    let expected: Vec<&str> = f["expectedCandidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(sets, expected, "{name}: candidate sets mismatch");
}

fn check_decode_fixture(name: &str) -> errorsig_evm::DecodedRevert {
    let f = load_fixture(name);
    let decoded = decode_revert_hex(&catalog(), f["revertData"].as_str().unwrap())
        .expect("decode_revert_hex failed");
    let err = decoded
        .error
        .as_ref()
        .unwrap_or_else(|| panic!("{name}: expected a decoded error"));
    assert_eq!(err.name, f["expectedName"].as_str().unwrap());
    assert_eq!(err.set, f["expectedSet"].as_str().unwrap());
    for (field, expected) in f["expectedFields"].as_object().unwrap() {
        let arg = err
            .args
            .iter()
            .find(|a| &a.name == field)
            .unwrap_or_else(|| panic!("{name}: missing field {field}"));
        assert_eq!(arg.value.to_string(), expected.as_str().unwrap(), "{name}: {field}");
    }
    decoded
}

// ─── Resolution ───────────────────────────────────────────────────────────────

#[test]
fn golden_address_empty_code() {
    check_resolve_fixture("resolve-address-empty-code.json");
}

#[test]
fn golden_cwallet_whitelisted_targets() {
    check_resolve_fixture("resolve-cwallet-whitelisted-targets.json");
}

#[test]
fn golden_reentrant_call_mixed_case() {
    check_resolve_fixture("resolve-reentrant-call-mixed-case.json");
}

#[test]
fn golden_unknown_selector() {
    check_resolve_fixture("resolve-unknown.json");
}

#[test]
fn every_bundled_entry_round_trips() {
    let catalog = catalog();
    for (set, entry) in catalog.entries() {
        let found = resolver::resolve(&catalog, entry.definition.selector())
            .found()
            .unwrap_or_else(|| panic!("{} in {} did not resolve", entry.signature, set.name()));
        assert_eq!(found.entry.signature, entry.signature);
        assert_eq!(
            resolver::resolve(&catalog, entry.selector),
            resolver::scan(&catalog, entry.selector)
        );
    }
}

#[test]
fn bundled_catalog_has_no_true_collisions() {
    let catalog = catalog();
    for (_, entry) in catalog.entries() {
        for m in resolver::candidates(&catalog, entry.selector) {
            assert_eq!(m.entry.signature, entry.signature);
        }
    }
}

#[test]
fn malformed_selectors_rejected() {
    let catalog = catalog();
    for bad in ["0x9996b3", "0x9996b31500", "", "0xgg96b315"] {
        assert!(
            resolver::resolve_hex(&catalog, bad).is_err(),
            "{bad:?} should be rejected"
        );
    }
}

// ─── Revert decoding ──────────────────────────────────────────────────────────

#[test]
fn golden_erc721_nonexistent_token() {
    check_decode_fixture("decode-erc721-nonexistent-token.json");
}

#[test]
fn golden_panic_division_by_zero() {
    let f = load_fixture("decode-panic-division-by-zero.json");
    let decoded = check_decode_fixture("decode-panic-division-by-zero.json");
    assert_eq!(
        decoded.error.unwrap().panic.as_deref(),
        f["expectedPanic"].as_str()
    );
}

#[test]
fn golden_revert_string() {
    check_decode_fixture("decode-revert-string.json");
}
