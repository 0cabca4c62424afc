//! Entrypoint analyzer.
//!
//! Labels externally reachable functions and attaches lightweight
//! security-relevant tags. Tags are signals for prioritizing manual
//! review, not authorization guarantees.

use super::guards::{is_fixed_target, modifier_guard, sender_comparison_target};
use crate::classify::ClassifiedUnit;
use crate::model::{
    walk_statements, CallKind, ContractKind, ContractUnit, EntityId, ExpressionUnit, FunctionUnit,
    Mutability, Visibility,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Entrypoint tags, declared in canonical render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrypointTag {
    /// Baseline: reachable by anyone.
    ForAll,
    /// A same-file modifier checks `msg.sender` in a `require`.
    Guarded,
    /// The function body itself checks `msg.sender` in a `require`.
    GuardedInline,
    /// Payable: accepts ether.
    Value,
    /// Guarded against a single fixed identifier (owner/admin style).
    AdminIsh,
    /// Makes an ordinary call on an external contract reference.
    CallsOut,
    /// Contains a low-level `delegatecall`.
    Delegatecall,
}

impl EntrypointTag {
    /// Tag name as rendered in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForAll => "for-all",
            Self::Guarded => "guarded",
            Self::GuardedInline => "guarded-inline",
            Self::Value => "value",
            Self::AdminIsh => "admin-ish",
            Self::CallsOut => "calls-out",
            Self::Delegatecall => "delegatecall",
        }
    }
}

/// One tagged entrypoint.
#[derive(Debug, Clone)]
pub struct EntrypointRecord {
    /// Stable identity of the function.
    pub id: EntityId,
    /// Kind of the declaring contract.
    pub contract_kind: ContractKind,
    /// Function visibility.
    pub visibility: Visibility,
    /// Function mutability.
    pub mutability: Mutability,
    /// Applied modifier names, resolved or not.
    pub modifiers: Vec<String>,
    /// Deduplicated tags in canonical order.
    pub tags: Vec<EntrypointTag>,
}

/// Collects entrypoint records over the classified contract set.
///
/// Returns the records plus soft warnings (modifier names that resolved to
/// no same-file declaration). Records follow the classified order: file,
/// then contract, then function declaration order.
#[must_use]
pub fn collect_entrypoints(
    classified: &[ClassifiedUnit<'_>],
) -> (Vec<EntrypointRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for entry in classified {
        for contract in &entry.contracts {
            for func in &contract.functions {
                if !func.is_entrypoint() {
                    continue;
                }
                // MVP cross-file exclusion: inherited declarations from
                // other files would dominate output in large codebases.
                if func.declared_in_inherited_file {
                    continue;
                }
                records.push(analyze_function(contract, func, &mut warnings));
            }
        }
    }

    (records, warnings)
}

fn analyze_function(
    contract: &ContractUnit,
    func: &FunctionUnit,
    warnings: &mut Vec<String>,
) -> EntrypointRecord {
    // BTreeSet gives dedup plus canonical order for free.
    let mut tags = BTreeSet::new();
    tags.insert(EntrypointTag::ForAll);

    let via_modifier = modifier_guard(contract, func);
    for name in &via_modifier.unresolved {
        warnings.push(format!(
            "{}: modifier `{name}` on `{}` has no declaration in this file; not counted as a guard",
            contract.name, func.signature
        ));
    }
    if via_modifier.target.is_some() {
        tags.insert(EntrypointTag::Guarded);
    }

    let inline_target = sender_comparison_target(&func.body);
    if inline_target.is_some() {
        tags.insert(EntrypointTag::GuardedInline);
    }

    if func.mutability == Mutability::Payable {
        tags.insert(EntrypointTag::Value);
    }

    // Admin-ish needs a guard whose comparison target names one fixed
    // reference; anything ambiguous stays untagged.
    if via_modifier
        .target
        .or(inline_target)
        .is_some_and(is_fixed_target)
    {
        tags.insert(EntrypointTag::AdminIsh);
    }

    let mut calls_out = false;
    let mut delegatecall = false;
    walk_statements(&func.body, &mut |expr| {
        if let ExpressionUnit::Call { target, kind, .. } = expr {
            match kind {
                CallKind::LowLevelDelegateCall => delegatecall = true,
                CallKind::Ordinary => calls_out |= is_external_call_target(target),
                CallKind::LowLevelCall | CallKind::LowLevelStaticCall => {}
            }
        }
    });
    if calls_out {
        tags.insert(EntrypointTag::CallsOut);
    }
    if delegatecall {
        tags.insert(EntrypointTag::Delegatecall);
    }

    EntrypointRecord {
        id: contract.entity_id(func),
        contract_kind: contract.kind,
        visibility: func.visibility,
        mutability: func.mutability,
        modifiers: func.applied_modifiers.clone(),
        tags: tags.into_iter().collect(),
    }
}

/// Builtin namespaces whose member calls never leave the contract.
const BUILTIN_BASES: &[&str] = &["this", "abi", "msg", "block", "tx", "super", "type"];

/// True when an ordinary call's target looks like a member call on an
/// external contract reference rather than on `this` or a builtin.
fn is_external_call_target(target: &ExpressionUnit) -> bool {
    let ExpressionUnit::MemberAccess { base, .. } = target else {
        return false;
    };
    match &**base {
        ExpressionUnit::Identifier(name) => !BUILTIN_BASES.contains(&name.as_str()),
        // Casts and chained accesses (`IToken(addr).f()`, `a.b.f()`) still
        // reference something other than this contract.
        ExpressionUnit::Call { .. } | ExpressionUnit::MemberAccess { .. } => true,
        _ => false,
    }
}
