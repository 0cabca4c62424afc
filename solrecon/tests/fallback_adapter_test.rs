//! Test suite for the coarse (fallback indexer) adapter.

use serde_json::json;
use solrecon::backend::fallback::{self, RawIndexedContract};
use solrecon::model::{ContractKind, Mutability, Visibility};
use std::path::PathBuf;

fn index_from_json(value: serde_json::Value) -> Vec<RawIndexedContract> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn contracts_group_by_file_in_first_seen_order() {
    let index = index_from_json(json!([
        { "name": "B", "kind": "contract", "file": "b.sol", "functions": [] },
        { "name": "A1", "kind": "contract", "file": "a.sol", "functions": [] },
        { "name": "A2", "kind": "library", "file": "a.sol", "functions": [] },
    ]));
    let outcome = fallback::translate(&index);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.units.len(), 2);
    assert_eq!(outcome.units[0].path, PathBuf::from("b.sol"));
    assert_eq!(outcome.units[1].contracts.len(), 2);
    assert_eq!(outcome.units[1].contracts[1].kind, ContractKind::Library);
}

#[test]
fn unknown_kinds_are_dropped_silently() {
    let index = index_from_json(json!([
        { "name": "E", "kind": "enum", "file": "a.sol", "functions": [] },
    ]));
    let outcome = fallback::translate(&index);
    assert!(outcome.units.is_empty());
    assert!(outcome.failures.is_empty());
}

#[test]
fn functions_carry_coarse_metadata_and_no_span() {
    let index = index_from_json(json!([
        { "name": "Vault", "kind": "contract", "file": "a.sol", "functions": [
            {
                "name": "sweep",
                "signature": "sweep(address)",
                "visibility": "public",
                "mutability": "nonpayable",
                "modifiers": ["onlyOwner"],
                "line": 42,
            },
            {
                "name": "receive",
                "signature": "receive()",
                "visibility": "",
                "mutability": "payable",
            },
        ] },
    ]));
    let outcome = fallback::translate(&index);
    let funcs = &outcome.units[0].contracts[0].functions;

    assert_eq!(funcs[0].signature, "sweep(address)");
    assert_eq!(funcs[0].visibility, Visibility::Public);
    assert_eq!(funcs[0].applied_modifiers, vec!["onlyOwner".to_owned()]);
    assert_eq!(funcs[0].source_line, 42);
    assert!(funcs[0].source_span.is_none());
    assert!(funcs[0].body.is_empty());

    // receive gets external visibility and the empty name convention.
    assert_eq!(funcs[1].visibility, Visibility::External);
    assert_eq!(funcs[1].mutability, Mutability::Payable);
    assert!(funcs[1].name.is_empty());
    assert!(funcs[1].is_entrypoint());
}

#[test]
fn inherited_functions_are_flagged_by_declaring_file() {
    let index = index_from_json(json!([
        { "name": "Derived", "kind": "contract", "file": "b.sol", "functions": [
            {
                "name": "ownedOp",
                "signature": "ownedOp()",
                "visibility": "public",
                "declared_file": "a.sol",
            },
            {
                "name": "localOp",
                "signature": "localOp()",
                "visibility": "public",
                "declared_file": "b.sol",
            },
        ] },
    ]));
    let outcome = fallback::translate(&index);
    let funcs = &outcome.units[0].contracts[0].functions;
    assert!(funcs[0].declared_in_inherited_file);
    assert!(!funcs[1].declared_in_inherited_file);
}

#[test]
fn nameless_contract_fails_its_file_only() {
    let index = index_from_json(json!([
        { "name": "Good", "kind": "contract", "file": "good.sol", "functions": [] },
        { "name": "", "kind": "contract", "file": "bad.sol", "functions": [] },
    ]));
    let outcome = fallback::translate(&index);
    assert_eq!(outcome.units.len(), 1);
    assert_eq!(outcome.units[0].contracts[0].name, "Good");
    assert_eq!(outcome.failures.len(), 1);
}
