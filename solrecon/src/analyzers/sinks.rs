//! Sink analyzer.
//!
//! Emits one record per matched expression: low-level message calls and
//! `balanceOf` reads. Every record carries the exact byte span of the match
//! and its source slice, which is why this analyzer refuses coarse adapter
//! output outright instead of emitting imprecise slices.

use crate::classify::ClassifiedUnit;
use crate::errors::ReconError;
use crate::model::{
    walk_statements, CallKind, ContractUnit, EntityId, ExpressionUnit, FunctionUnit, SourceTexts,
    Span,
};
use serde::Serialize;

/// Sink tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkTag {
    /// Raw `.call(...)`.
    LowLevelCall,
    /// Raw `.delegatecall(...)`.
    LowLevelDelegatecall,
    /// Raw `.staticcall(...)`.
    LowLevelStaticcall,
    /// `balanceOf(...)` on some contract.
    ExternalBalanceRead,
    /// `balanceOf(address(this))`: the contract reads its own balance.
    SelfBalanceRead,
}

impl SinkTag {
    /// Tag name as rendered in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowLevelCall => "low-level-call",
            Self::LowLevelDelegatecall => "low-level-delegatecall",
            Self::LowLevelStaticcall => "low-level-staticcall",
            Self::ExternalBalanceRead => "external-balance-read",
            Self::SelfBalanceRead => "self-balance-read",
        }
    }
}

/// One matched sink expression.
#[derive(Debug, Clone)]
pub struct SinkRecord {
    /// Identity of the enclosing function.
    pub id: EntityId,
    /// Tags for this match, in canonical order.
    pub tags: Vec<SinkTag>,
    /// Exact byte span of the matched expression.
    pub span: Span,
    /// Source text of the matched expression.
    pub snippet: String,
}

/// Collects sink records over the classified contract set.
///
/// # Errors
///
/// Returns [`ReconError::PrecisionUnavailable`] when any processed function
/// lacks an exact byte span (coarse adapter output). The check runs before
/// any record is emitted, so a failed invocation yields zero records.
pub fn collect_sinks(
    classified: &[ClassifiedUnit<'_>],
    texts: &SourceTexts,
) -> Result<Vec<SinkRecord>, ReconError> {
    for entry in classified {
        for contract in &entry.contracts {
            if contract
                .functions
                .iter()
                .any(|f| f.source_span.is_none())
            {
                return Err(ReconError::PrecisionUnavailable);
            }
        }
    }

    let mut records = Vec::new();
    for entry in classified {
        for contract in &entry.contracts {
            for func in &contract.functions {
                scan_function(contract, func, texts, &mut records);
            }
        }
    }
    Ok(records)
}

fn scan_function(
    contract: &ContractUnit,
    func: &FunctionUnit,
    texts: &SourceTexts,
    records: &mut Vec<SinkRecord>,
) {
    walk_statements(&func.body, &mut |expr| {
        let ExpressionUnit::Call {
            target,
            args,
            kind,
            span,
        } = expr
        else {
            return;
        };

        let mut tags = Vec::new();
        match kind {
            CallKind::LowLevelCall => tags.push(SinkTag::LowLevelCall),
            CallKind::LowLevelDelegateCall => tags.push(SinkTag::LowLevelDelegatecall),
            CallKind::LowLevelStaticCall => tags.push(SinkTag::LowLevelStaticcall),
            CallKind::Ordinary => {
                if is_balance_of(target) {
                    tags.push(SinkTag::ExternalBalanceRead);
                    if let [arg] = args.as_slice() {
                        if is_address_this(arg) {
                            tags.push(SinkTag::SelfBalanceRead);
                        }
                    }
                }
            }
        }
        if tags.is_empty() {
            return;
        }

        // The precision gate above guarantees spans on every function the
        // offset-exact adapter produced; an expression without one would
        // mean a hole in the adapter, so skip rather than fabricate.
        let Some(span) = *span else {
            return;
        };
        let snippet = texts
            .slice(&contract.file, span)
            .unwrap_or_default()
            .to_owned();

        records.push(SinkRecord {
            id: contract.entity_id(func),
            tags,
            span,
            snippet,
        });
    });
}

fn is_balance_of(target: &ExpressionUnit) -> bool {
    matches!(target, ExpressionUnit::MemberAccess { member, .. } if member == "balanceOf")
}

/// Matches `address(this)`: a call of the `address` type conversion applied
/// to the `this` identifier.
fn is_address_this(arg: &ExpressionUnit) -> bool {
    let ExpressionUnit::Call { target, args, .. } = arg else {
        return false;
    };
    matches!(&**target, ExpressionUnit::Identifier(name) if name == "address")
        && matches!(
            args.as_slice(),
            [ExpressionUnit::Identifier(name)] if name == "this"
        )
}
