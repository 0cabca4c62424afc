//! Guard-pattern predicates.
//!
//! A "guard" here is the specific shape `require(msg.sender == X)` or
//! `require(msg.sender != X)`, found either in an applied modifier's body
//! or inline in the function body. Custom ACL schemes that do not compare
//! `msg.sender` directly are invisible to these predicates; that loss of
//! recall is accepted, false guard tags are not.

use crate::model::{
    walk_requires, CompareOp, ContractUnit, ExpressionUnit, FunctionUnit, StatementUnit,
};

/// Finds a `require(msg.sender ==/!= X)` in a statement sequence and
/// returns the expression `msg.sender` is compared against.
#[must_use]
pub fn sender_comparison_target(stmts: &[StatementUnit]) -> Option<&ExpressionUnit> {
    let mut found = None;
    walk_requires(stmts, &mut |cond| {
        if found.is_some() {
            return;
        }
        if let ExpressionUnit::Comparison { lhs, op, rhs } = cond {
            if !matches!(op, CompareOp::Eq | CompareOp::NotEq) {
                return;
            }
            let sender = ExpressionUnit::Identifier("msg.sender".to_owned());
            if **lhs == sender {
                found = Some(&**rhs);
            } else if **rhs == sender {
                found = Some(&**lhs);
            }
        }
    });
    found
}

/// Outcome of resolving a function's applied modifiers against the
/// same-file modifier map.
#[derive(Debug, Default)]
pub struct ModifierGuard<'a> {
    /// Comparison target from the first guarding modifier, if any.
    pub target: Option<&'a ExpressionUnit>,
    /// Applied modifier names with no same-file declaration. These keep
    /// their listing on the function but contribute no guard tag.
    pub unresolved: Vec<String>,
}

/// Checks every applied modifier for the sender-comparison guard shape.
///
/// Only modifiers declared in the same contract (and hence the same file)
/// are visible; inherited modifier shadowing is not resolved.
#[must_use]
pub fn modifier_guard<'a>(contract: &'a ContractUnit, func: &FunctionUnit) -> ModifierGuard<'a> {
    let mut result = ModifierGuard::default();
    for name in &func.applied_modifiers {
        match contract.modifiers.get(name) {
            Some(modifier) => {
                if result.target.is_none() {
                    result.target = sender_comparison_target(&modifier.body);
                }
            }
            None => result.unresolved.push(name.clone()),
        }
    }
    result
}

/// True when a comparison target is a single fixed identifier or a state
/// variable read, i.e. not a dynamically computed expression. Ambiguous
/// shapes are not fixed: the admin-ish tag prefers false negatives over
/// false positives.
#[must_use]
pub fn is_fixed_target(expr: &ExpressionUnit) -> bool {
    match expr {
        ExpressionUnit::Identifier(name) => name != "msg.sender",
        // `this.owner`-style state reads still name a single storage slot.
        ExpressionUnit::MemberAccess { base, .. } => {
            matches!(&**base, ExpressionUnit::Identifier(name) if name == "this")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallKind, Span};

    fn sender() -> ExpressionUnit {
        ExpressionUnit::Identifier("msg.sender".to_owned())
    }

    fn ident(name: &str) -> ExpressionUnit {
        ExpressionUnit::Identifier(name.to_owned())
    }

    fn require_cmp(lhs: ExpressionUnit, op: CompareOp, rhs: ExpressionUnit) -> StatementUnit {
        StatementUnit::Require(ExpressionUnit::Comparison {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    #[test]
    fn finds_sender_comparison_on_either_side() {
        let body = vec![require_cmp(sender(), CompareOp::Eq, ident("owner"))];
        assert_eq!(sender_comparison_target(&body), Some(&ident("owner")));

        let flipped = vec![require_cmp(ident("owner"), CompareOp::NotEq, sender())];
        assert_eq!(sender_comparison_target(&flipped), Some(&ident("owner")));
    }

    #[test]
    fn ignores_ordering_comparisons_and_other_requires() {
        let body = vec![
            require_cmp(sender(), CompareOp::Other, ident("owner")),
            StatementUnit::Require(ExpressionUnit::Literal),
        ];
        assert!(sender_comparison_target(&body).is_none());
    }

    #[test]
    fn finds_requires_nested_in_blocks() {
        let body = vec![StatementUnit::Nested(vec![require_cmp(
            sender(),
            CompareOp::Eq,
            ident("owner"),
        )])];
        assert!(sender_comparison_target(&body).is_some());
    }

    #[test]
    fn fixed_target_is_conservative() {
        assert!(is_fixed_target(&ident("owner")));
        assert!(!is_fixed_target(&sender()));
        assert!(!is_fixed_target(&ExpressionUnit::Literal));
        // A computed target is not a fixed reference.
        assert!(!is_fixed_target(&ExpressionUnit::Call {
            target: Box::new(ident("ownerOf")),
            args: Vec::new(),
            kind: CallKind::Ordinary,
            span: Some(Span::from_len(0, 1)),
        }));
    }
}
