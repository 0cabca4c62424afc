//! Shared builders for canonical-model test fixtures.
#![allow(dead_code)] // not every test file uses every builder

use rustc_hash::FxHashMap;
use solrecon::model::{
    CallKind, CompareOp, ContractKind, ContractUnit, ExpressionUnit, FunctionUnit, ModifierUnit,
    Mutability, SourceUnit, Span, StatementUnit, Visibility,
};
use std::path::PathBuf;

pub fn ident(name: &str) -> ExpressionUnit {
    ExpressionUnit::Identifier(name.to_owned())
}

pub fn sender_eq(target: ExpressionUnit) -> StatementUnit {
    StatementUnit::Require(ExpressionUnit::Comparison {
        lhs: Box::new(ident("msg.sender")),
        op: CompareOp::Eq,
        rhs: Box::new(target),
    })
}

pub fn member_call(base: &str, member: &str, kind: CallKind, span: Option<Span>) -> ExpressionUnit {
    ExpressionUnit::Call {
        target: Box::new(ExpressionUnit::MemberAccess {
            base: Box::new(ident(base)),
            member: member.to_owned(),
        }),
        args: Vec::new(),
        kind,
        span,
    }
}

pub fn function(signature: &str, visibility: Visibility) -> FunctionUnit {
    let name = signature.split('(').next().unwrap_or_default();
    FunctionUnit {
        name: name.to_owned(),
        signature: signature.to_owned(),
        visibility,
        mutability: Mutability::NonPayable,
        applied_modifiers: Vec::new(),
        source_line: 1,
        source_span: Some(Span::from_len(0, 1)),
        body: Vec::new(),
        declared_in_inherited_file: false,
    }
}

pub fn contract(name: &str, file: &str, functions: Vec<FunctionUnit>) -> ContractUnit {
    ContractUnit {
        name: name.to_owned(),
        kind: ContractKind::Contract,
        file: PathBuf::from(file),
        functions,
        modifiers: FxHashMap::default(),
    }
}

pub fn with_modifier(mut contract: ContractUnit, modifier: ModifierUnit) -> ContractUnit {
    contract.modifiers.insert(modifier.name.clone(), modifier);
    contract
}

pub fn only_owner() -> ModifierUnit {
    ModifierUnit {
        name: "onlyOwner".to_owned(),
        params: Vec::new(),
        body: vec![sender_eq(ident("owner"))],
    }
}

pub fn source_unit(file: &str, contracts: Vec<ContractUnit>) -> SourceUnit {
    SourceUnit {
        path: PathBuf::from(file),
        contracts,
    }
}
