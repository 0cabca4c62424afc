//! End-to-end pipeline tests: determinism, classifier defaults, and
//! graceful sink-phase degradation.

mod common;

use common::{contract, function, member_call, only_owner, source_unit, with_modifier};
use solrecon::model::{CallKind, ContractKind, Mutability, SourceTexts, Span, StatementUnit, Visibility};
use solrecon::report;
use solrecon::Pipeline;

fn fixture_units() -> Vec<solrecon::model::SourceUnit> {
    let source = "token.balanceOf(address(this))";

    let mut sweep = function("sweep(address)", Visibility::Public);
    sweep.applied_modifiers.push("onlyOwner".to_owned());
    sweep.source_line = 10;

    let mut deposit = function("deposit()", Visibility::External);
    deposit.mutability = Mutability::Payable;
    deposit.source_line = 20;

    let mut raw = function("raw(bytes)", Visibility::External);
    raw.source_line = 30;
    raw.body.push(StatementUnit::Expr(member_call(
        "target",
        "delegatecall",
        CallKind::LowLevelDelegateCall,
        Some(Span::from_len(0, source.len())),
    )));

    let vault = with_modifier(
        contract("Vault", "a.sol", vec![sweep, deposit, raw]),
        only_owner(),
    );

    let mut lib_fn = function("helper()", Visibility::Public);
    lib_fn.source_line = 5;
    let mut lib = contract("Helpers", "b.sol", vec![lib_fn]);
    lib.kind = ContractKind::Library;
    lib.file = "b.sol".into();

    vec![
        source_unit("a.sol", vec![vault]),
        source_unit("b.sol", vec![lib]),
    ]
}

fn fixture_texts() -> SourceTexts {
    let mut texts = SourceTexts::new();
    texts.insert("a.sol".into(), "token.balanceOf(address(this))".to_owned());
    texts
}

#[test]
fn identical_input_renders_byte_identical_reports() {
    let units = fixture_units();
    let texts = fixture_texts();
    let pipeline = Pipeline::new();

    let first = pipeline.analyze(&units, &texts, Vec::new());
    let second = pipeline.analyze(&units, &texts, Vec::new());

    assert_eq!(
        report::md::render(&first.tree),
        report::md::render(&second.tree)
    );
    assert_eq!(
        report::json::render(&first.tree),
        report::json::render(&second.tree)
    );
}

#[test]
fn libraries_are_excluded_by_default_and_admitted_by_flag() {
    let units = fixture_units();
    let texts = fixture_texts();

    let default_run = Pipeline::new().analyze(&units, &texts, Vec::new());
    assert!(default_run
        .entrypoints
        .iter()
        .all(|r| r.id.contract == "Vault"));

    let with_libs = Pipeline::new()
        .with_libraries(true)
        .analyze(&units, &texts, Vec::new());
    assert!(with_libs
        .entrypoints
        .iter()
        .any(|r| r.id.contract == "Helpers"));
}

#[test]
fn sink_phase_degrades_to_note_on_coarse_input() {
    let mut f = function("sweep()", Visibility::Public);
    f.source_span = None;
    let units = vec![source_unit("a.sol", vec![contract("C", "a.sol", vec![f])])];

    let output = Pipeline::new().analyze(&units, &SourceTexts::new(), Vec::new());
    // The entrypoint phase is unaffected.
    assert_eq!(output.entrypoints.len(), 1);
    assert!(output.sinks.is_empty());
    let note = output.sink_note.unwrap();
    assert!(note.contains("exact byte offsets"));

    let md = report::md::render(&output.tree);
    assert!(md.contains(&note));
}

#[test]
fn report_groups_in_supplied_and_declaration_order() {
    let units = fixture_units();
    let output = Pipeline::new()
        .with_libraries(true)
        .analyze(&units, &fixture_texts(), Vec::new());

    let tree = &output.tree;
    assert_eq!(tree.files.len(), 2);
    assert_eq!(tree.files[0].path, "a.sol");
    assert_eq!(tree.files[1].path, "b.sol");

    let vault = &tree.files[0].contracts[0];
    let signatures: Vec<&str> = vault
        .functions
        .iter()
        .map(|f| f.signature.as_str())
        .collect();
    assert_eq!(signatures, vec!["sweep(address)", "deposit()", "raw(bytes)"]);

    // TOC anchors are derived from contract + signature.
    assert_eq!(tree.toc[0].anchor, "vault-sweep-address-");
}

#[test]
fn markdown_contains_tags_and_sink_snippets() {
    let units = fixture_units();
    let output = Pipeline::new().analyze(&units, &fixture_texts(), Vec::new());
    let md = report::md::render(&output.tree);

    assert!(md.contains("`sweep(address)` [public nonpayable], line 10"));
    assert!(md.contains("tags: for-all, guarded, admin-ish"));
    assert!(md.contains("tags: for-all, value"));
    assert!(md.contains("tags: for-all, delegatecall"));
    assert!(md.contains("sink [low-level-delegatecall]"));
    // The sink snippet is sliced from the original source text.
    assert!(md.contains("`token.balanceOf(address(this))`"));
}

#[test]
fn warnings_seed_the_report_tree() {
    let units = fixture_units();
    let output = Pipeline::new().analyze(
        &units,
        &fixture_texts(),
        vec!["bad.sol: malformed tree".to_owned()],
    );
    assert!(output.tree.warnings.contains(&"bad.sol: malformed tree".to_owned()));
    let md = report::md::render(&output.tree);
    assert!(md.contains("## Warnings"));
}
