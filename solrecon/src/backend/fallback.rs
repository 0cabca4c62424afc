//! Coarse adapter over the fallback indexer's JSON output.
//!
//! The fallback indexer compiles whole projects (remappings and all) where
//! bare solc cannot, but it reports only line-level locations and no
//! statement bodies. Its output therefore yields a canonical model with
//! `source_span = None` throughout: good enough for entrypoint analysis,
//! rejected by the sink analyzer.

use super::TranslationOutcome;
use crate::errors::ReconError;
use crate::model::{
    ContractKind, ContractUnit, FunctionUnit, Mutability, SourceUnit, Visibility,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::path::PathBuf;

/// One indexed contract as emitted by the fallback indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIndexedContract {
    /// Contract name.
    pub name: String,
    /// `contract` / `library` / `interface`; anything else is dropped.
    pub kind: String,
    /// File the contract is declared in.
    pub file: PathBuf,
    /// Functions, including inherited ones.
    #[serde(default)]
    pub functions: Vec<RawIndexedFunction>,
}

/// One indexed function.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIndexedFunction {
    /// Function name; `receive` / `fallback` / `constructor` for the
    /// special kinds.
    pub name: String,
    /// Full signature, e.g. `transfer(address,uint256)`.
    pub signature: String,
    /// `public` / `external` / `internal` / `private`.
    pub visibility: String,
    /// `nonpayable` / `payable` / `view` / `pure`.
    #[serde(default)]
    pub mutability: String,
    /// Applied modifier names in declaration order.
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// 1-based declaration line (engine-reported, approximate).
    #[serde(default = "default_line")]
    pub line: u32,
    /// File the function is textually declared in, when the engine knows
    /// it differs from the contract's file (inherited functions).
    #[serde(default)]
    pub declared_file: Option<PathBuf>,
}

const fn default_line() -> u32 {
    1
}

/// Translates the fallback index into canonical units.
///
/// Files appear in first-seen order of the index; contracts keep the
/// engine's order within each file. A contract entry without a name is
/// malformed and fails its file; unknown kinds are dropped silently.
#[must_use]
pub fn translate(index: &[RawIndexedContract]) -> TranslationOutcome {
    let mut outcome = TranslationOutcome::default();
    let mut unit_by_file: FxHashMap<PathBuf, usize> = FxHashMap::default();
    let mut failed: FxHashSet<PathBuf> = FxHashSet::default();

    for raw in index {
        if failed.contains(&raw.file) {
            continue;
        }
        let kind = match raw.kind.as_str() {
            "contract" => ContractKind::Contract,
            "library" => ContractKind::Library,
            "interface" => ContractKind::Interface,
            // Out of scope declaration kinds.
            _ => continue,
        };
        if raw.name.is_empty() {
            outcome.failures.push((
                raw.file.clone(),
                ReconError::MalformedTree {
                    file: raw.file.clone(),
                    detail: "indexed contract has no name".to_owned(),
                },
            ));
            // Drop whatever this file already contributed.
            if let Some(idx) = unit_by_file.remove(&raw.file) {
                outcome.units.remove(idx);
                reindex(&outcome.units, &mut unit_by_file);
            }
            failed.insert(raw.file.clone());
            continue;
        }

        let contract = ContractUnit {
            name: raw.name.clone(),
            kind,
            file: raw.file.clone(),
            functions: raw.functions.iter().map(|f| translate_function(f, raw)).collect(),
            // The fallback index carries no modifier bodies, so the guard
            // detector has nothing to resolve against.
            modifiers: FxHashMap::default(),
        };

        match unit_by_file.get(&raw.file) {
            Some(&idx) => outcome.units[idx].contracts.push(contract),
            None => {
                unit_by_file.insert(raw.file.clone(), outcome.units.len());
                outcome.units.push(SourceUnit {
                    path: raw.file.clone(),
                    contracts: vec![contract],
                });
            }
        }
    }

    outcome
}

fn translate_function(raw: &RawIndexedFunction, owner: &RawIndexedContract) -> FunctionUnit {
    let special = matches!(raw.name.as_str(), "constructor" | "receive" | "fallback");
    let visibility = if matches!(raw.name.as_str(), "receive" | "fallback") {
        Visibility::External
    } else {
        match raw.visibility.as_str() {
            "public" => Visibility::Public,
            "external" => Visibility::External,
            "private" => Visibility::Private,
            _ => Visibility::Internal,
        }
    };
    let mutability = match raw.mutability.as_str() {
        "payable" => Mutability::Payable,
        "view" => Mutability::View,
        "pure" => Mutability::Pure,
        _ => Mutability::NonPayable,
    };

    let declared_in_inherited_file = raw
        .declared_file
        .as_ref()
        .is_some_and(|declared| declared != &owner.file);

    FunctionUnit {
        name: if special { String::new() } else { raw.name.clone() },
        signature: raw.signature.clone(),
        visibility,
        mutability,
        applied_modifiers: raw.modifiers.clone(),
        source_line: raw.line,
        source_span: None,
        body: Vec::new(),
        declared_in_inherited_file,
    }
}

fn reindex(units: &[SourceUnit], map: &mut FxHashMap<PathBuf, usize>) {
    map.clear();
    for (idx, unit) in units.iter().enumerate() {
        map.insert(unit.path.clone(), idx);
    }
}
