//! Minimal recursive statement/expression tree.
//!
//! Only the node shapes the detectors pattern-match on are modeled; every
//! other construct degrades to `Other`, which detectors treat as "no match",
//! never as an error.

use serde::Serialize;

/// Byte range into the original source text, half-open (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Builds a span from a start offset and a length.
    #[must_use]
    pub const fn from_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }
}

/// How a call is performed at the message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Typed interface or builtin call.
    Ordinary,
    /// Raw `.call(...)` / `.call{...}(...)`.
    LowLevelCall,
    /// Raw `.delegatecall(...)`.
    LowLevelDelegateCall,
    /// Raw `.staticcall(...)`.
    LowLevelStaticCall,
}

/// Comparison operator, collapsed to what guard detection distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// Any other binary comparison (`<`, `>=`, ...).
    Other,
}

/// One expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionUnit {
    /// A call; `kind` distinguishes low-level message calls. `span` is
    /// populated only by the offset-exact adapter.
    Call {
        /// Callee expression.
        target: Box<ExpressionUnit>,
        /// Arguments in source order.
        args: Vec<ExpressionUnit>,
        /// Message-level call kind.
        kind: CallKind,
        /// Exact byte span of the whole call expression, when known.
        span: Option<Span>,
    },
    /// `base.member` access.
    MemberAccess {
        /// Expression the member is read from.
        base: Box<ExpressionUnit>,
        /// Member name.
        member: String,
    },
    /// Binary comparison.
    Comparison {
        /// Left operand.
        lhs: Box<ExpressionUnit>,
        /// Operator.
        op: CompareOp,
        /// Right operand.
        rhs: Box<ExpressionUnit>,
    },
    /// Plain identifier. Adapters normalize `msg.sender` into
    /// `Identifier("msg.sender")` so guard detection has one shape to match.
    Identifier(String),
    /// Any literal value.
    Literal,
    /// Unmodeled construct; detectors must not match on it.
    Other,
}

/// One statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementUnit {
    /// `require(cond, ...)` with the condition expression.
    Require(ExpressionUnit),
    /// Expression statement.
    Expr(ExpressionUnit),
    /// Block-bearing construct (if/for/while/unchecked/nested block),
    /// flattened to its contained statements so recursive descent reaches
    /// every reachable statement.
    Nested(Vec<StatementUnit>),
    /// Unmodeled statement.
    Other,
}

impl StatementUnit {
    /// Visits every expression reachable from this statement, depth first.
    pub fn walk_expressions<'a>(&'a self, visit: &mut impl FnMut(&'a ExpressionUnit)) {
        match self {
            Self::Require(expr) | Self::Expr(expr) => walk_expr(expr, visit),
            Self::Nested(stmts) => {
                for stmt in stmts {
                    stmt.walk_expressions(visit);
                }
            }
            Self::Other => {}
        }
    }
}

fn walk_expr<'a>(expr: &'a ExpressionUnit, visit: &mut impl FnMut(&'a ExpressionUnit)) {
    visit(expr);
    match expr {
        ExpressionUnit::Call { target, args, .. } => {
            walk_expr(target, visit);
            for arg in args {
                walk_expr(arg, visit);
            }
        }
        ExpressionUnit::MemberAccess { base, .. } => walk_expr(base, visit),
        ExpressionUnit::Comparison { lhs, rhs, .. } => {
            walk_expr(lhs, visit);
            walk_expr(rhs, visit);
        }
        ExpressionUnit::Identifier(_) | ExpressionUnit::Literal | ExpressionUnit::Other => {}
    }
}

/// Visits every expression in a statement sequence, depth first.
pub fn walk_statements<'a>(
    stmts: &'a [StatementUnit],
    visit: &mut impl FnMut(&'a ExpressionUnit),
) {
    for stmt in stmts {
        stmt.walk_expressions(visit);
    }
}

/// Visits the condition of every `require` statement in a sequence,
/// including those nested inside block-bearing constructs.
pub fn walk_requires<'a>(
    stmts: &'a [StatementUnit],
    visit: &mut impl FnMut(&'a ExpressionUnit),
) {
    for stmt in stmts {
        match stmt {
            StatementUnit::Require(cond) => visit(cond),
            StatementUnit::Nested(inner) => walk_requires(inner, visit),
            StatementUnit::Expr(_) | StatementUnit::Other => {}
        }
    }
}
