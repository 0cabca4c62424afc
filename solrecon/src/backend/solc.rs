//! Offset-exact adapter over solc standard-json AST output.
//!
//! Translates `ContractDefinition` / `FunctionDefinition` /
//! `ModifierDefinition` nodes into the canonical model, preserving exact
//! byte spans from the `src` fields. Statement and expression nodes outside
//! the detectors' vocabulary degrade to `Other` without error; only a
//! structurally malformed node (a contract without a name, a function
//! without a `src`) fails, and then only for its own file.

use super::{offset_to_line, TranslationOutcome};
use crate::errors::ReconError;
use crate::model::{
    CallKind, CompareOp, ContractKind, ContractUnit, ExpressionUnit, FunctionUnit, ModifierUnit,
    Mutability, SourceTexts, SourceUnit, Span, StatementUnit, Visibility,
};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Translates solc ASTs for a batch of files, in the supplied file order.
///
/// Files without an AST entry are skipped silently: solc already reported
/// why they did not compile, and the caller surfaces those diagnostics.
#[must_use]
pub fn translate(
    files: &[PathBuf],
    ast_by_file: &FxHashMap<PathBuf, Value>,
    texts: &SourceTexts,
) -> TranslationOutcome {
    let mut outcome = TranslationOutcome::default();
    for file in files {
        let Some(ast) = ast_by_file.get(file) else {
            continue;
        };
        let text = texts.get(file).unwrap_or("");
        match translate_file(file, ast, text) {
            Ok(unit) => outcome.units.push(unit),
            Err(err) => outcome.failures.push((file.clone(), err)),
        }
    }
    outcome
}

fn translate_file(path: &Path, ast: &Value, text: &str) -> Result<SourceUnit, ReconError> {
    let nodes = ast
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(path, "source unit has no `nodes` array"))?;

    let mut contracts = Vec::new();
    for node in nodes {
        if node_type(node) != Some("ContractDefinition") {
            // Pragmas, imports, file-level functions etc. are out of scope.
            continue;
        }
        contracts.push(translate_contract(path, node, text)?);
    }

    Ok(SourceUnit {
        path: path.to_path_buf(),
        contracts,
    })
}

fn translate_contract(path: &Path, node: &Value, text: &str) -> Result<ContractUnit, ReconError> {
    let name = str_field(node, "name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| malformed(path, "contract definition has no name"))?;

    let kind = match str_field(node, "contractKind") {
        Some("library") => ContractKind::Library,
        Some("interface") => ContractKind::Interface,
        // Abstract contracts report `contract` as well.
        _ => ContractKind::Contract,
    };

    let members = node
        .get("nodes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut functions = Vec::new();
    let mut modifiers = FxHashMap::default();
    for member in members {
        match node_type(member) {
            Some("FunctionDefinition") => {
                functions.push(translate_function(path, member, text)?);
            }
            Some("ModifierDefinition") => {
                if let Some(modifier) = translate_modifier(member) {
                    modifiers.insert(modifier.name.clone(), modifier);
                }
            }
            // State variables, events, structs, enums: not modeled.
            _ => {}
        }
    }

    Ok(ContractUnit {
        name: name.to_owned(),
        kind,
        file: path.to_path_buf(),
        functions,
        modifiers,
    })
}

fn translate_function(path: &Path, node: &Value, text: &str) -> Result<FunctionUnit, ReconError> {
    let span = parse_src(node)
        .ok_or_else(|| malformed(path, "function definition has no usable `src` field"))?;

    let kind = str_field(node, "kind").unwrap_or("function");
    let declared_name = str_field(node, "name").unwrap_or("");

    let (name, signature) = match kind {
        "constructor" => (String::new(), format!("constructor({})", param_types(node))),
        "receive" => (String::new(), "receive()".to_owned()),
        "fallback" => (String::new(), "fallback()".to_owned()),
        _ => (
            declared_name.to_owned(),
            format!("{declared_name}({})", param_types(node)),
        ),
    };

    let visibility = match kind {
        // receive/fallback are externally reachable by their ABI rules,
        // whatever the node says.
        "receive" | "fallback" => Visibility::External,
        _ => match str_field(node, "visibility") {
            Some("public") => Visibility::Public,
            Some("external") => Visibility::External,
            Some("internal") => Visibility::Internal,
            Some("private") => Visibility::Private,
            _ => return Err(malformed(path, "function definition has no visibility")),
        },
    };

    let mutability = match str_field(node, "stateMutability") {
        Some("payable") => Mutability::Payable,
        Some("view") => Mutability::View,
        Some("pure") => Mutability::Pure,
        _ => Mutability::NonPayable,
    };

    let applied_modifiers = node
        .get("modifiers")
        .and_then(Value::as_array)
        .map(|mods| {
            mods.iter()
                .filter_map(|m| {
                    m.get("modifierName")
                        .and_then(|n| str_field(n, "name"))
                        .map(str::to_owned)
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(FunctionUnit {
        name,
        signature,
        visibility,
        mutability,
        applied_modifiers,
        source_line: offset_to_line(text, span.start),
        source_span: Some(span),
        body: body_statements(node),
        // Per-file solc ASTs contain only the file's own declarations, so
        // everything translated here is locally declared.
        declared_in_inherited_file: false,
    })
}

fn translate_modifier(node: &Value) -> Option<ModifierUnit> {
    let name = str_field(node, "name")?;
    let params = node
        .get("parameters")
        .and_then(|p| p.get("parameters"))
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| str_field(p, "name").map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();
    Some(ModifierUnit {
        name: name.to_owned(),
        params,
        body: body_statements(node),
    })
}

fn body_statements(node: &Value) -> Vec<StatementUnit> {
    node.get("body")
        .and_then(|b| b.get("statements"))
        .and_then(Value::as_array)
        .map(|stmts| stmts.iter().map(translate_statement).collect())
        .unwrap_or_default()
}

fn translate_statement(node: &Value) -> StatementUnit {
    match node_type(node) {
        Some("ExpressionStatement") => {
            let Some(expr) = node.get("expression") else {
                return StatementUnit::Other;
            };
            if let Some(cond) = require_condition(expr) {
                StatementUnit::Require(cond)
            } else {
                StatementUnit::Expr(translate_expression(expr))
            }
        }
        Some("Block" | "UncheckedBlock") => StatementUnit::Nested(
            node.get("statements")
                .and_then(Value::as_array)
                .map(|stmts| stmts.iter().map(translate_statement).collect())
                .unwrap_or_default(),
        ),
        Some("IfStatement") => {
            let mut inner = Vec::new();
            if let Some(cond) = node.get("condition") {
                inner.push(StatementUnit::Expr(translate_expression(cond)));
            }
            for key in ["trueBody", "falseBody"] {
                if let Some(branch) = node.get(key).filter(|b| !b.is_null()) {
                    inner.push(translate_statement(branch));
                }
            }
            StatementUnit::Nested(inner)
        }
        Some("ForStatement" | "WhileStatement" | "DoWhileStatement") => {
            let mut inner = Vec::new();
            if let Some(cond) = node.get("condition").filter(|c| !c.is_null()) {
                inner.push(StatementUnit::Expr(translate_expression(cond)));
            }
            if let Some(body) = node.get("body").filter(|b| !b.is_null()) {
                inner.push(translate_statement(body));
            }
            StatementUnit::Nested(inner)
        }
        Some("Return") => node
            .get("expression")
            .filter(|e| !e.is_null())
            .map_or(StatementUnit::Other, |e| {
                StatementUnit::Expr(translate_expression(e))
            }),
        Some("VariableDeclarationStatement") => node
            .get("initialValue")
            .filter(|e| !e.is_null())
            .map_or(StatementUnit::Other, |e| {
                StatementUnit::Expr(translate_expression(e))
            }),
        Some("EmitStatement") => node
            .get("eventCall")
            .map_or(StatementUnit::Other, |e| {
                StatementUnit::Expr(translate_expression(e))
            }),
        _ => StatementUnit::Other,
    }
}

/// Recognizes `require(cond, ...)` and returns the translated condition.
fn require_condition(expr: &Value) -> Option<ExpressionUnit> {
    if node_type(expr) != Some("FunctionCall") {
        return None;
    }
    let callee = expr.get("expression")?;
    if node_type(callee) != Some("Identifier") || str_field(callee, "name") != Some("require") {
        return None;
    }
    let args = expr.get("arguments").and_then(Value::as_array)?;
    args.first().map(translate_expression)
}

fn translate_expression(node: &Value) -> ExpressionUnit {
    match node_type(node) {
        Some("FunctionCall") => translate_call(node),
        Some("MemberAccess") => {
            let member = str_field(node, "memberName").unwrap_or_default().to_owned();
            let base = node
                .get("expression")
                .map_or(ExpressionUnit::Other, translate_expression);
            // `msg.sender` is normalized to a single identifier so the guard
            // detector has one shape to match across backends.
            if member == "sender" && base == ExpressionUnit::Identifier("msg".to_owned()) {
                return ExpressionUnit::Identifier("msg.sender".to_owned());
            }
            ExpressionUnit::MemberAccess {
                base: Box::new(base),
                member,
            }
        }
        Some("BinaryOperation") => {
            let op = match str_field(node, "operator") {
                Some("==") => CompareOp::Eq,
                Some("!=") => CompareOp::NotEq,
                Some("<" | ">" | "<=" | ">=") => CompareOp::Other,
                // Arithmetic and logical operators are not modeled.
                _ => return ExpressionUnit::Other,
            };
            let lhs = node
                .get("leftExpression")
                .map_or(ExpressionUnit::Other, translate_expression);
            let rhs = node
                .get("rightExpression")
                .map_or(ExpressionUnit::Other, translate_expression);
            ExpressionUnit::Comparison {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }
        Some("Identifier") => str_field(node, "name")
            .map_or(ExpressionUnit::Other, |n| {
                ExpressionUnit::Identifier(n.to_owned())
            }),
        // The `address` in `address(this)` parses as a type-name expression.
        Some("ElementaryTypeNameExpression") => elementary_type_name(node)
            .map_or(ExpressionUnit::Other, |n| {
                ExpressionUnit::Identifier(n.to_owned())
            }),
        Some("Literal") => ExpressionUnit::Literal,
        // `(ok, ) = target.call(...)`: keep the interesting right-hand side.
        Some("Assignment") => node
            .get("rightHandSide")
            .map_or(ExpressionUnit::Other, translate_expression),
        Some("TupleExpression") => {
            let components: Vec<&Value> = node
                .get("components")
                .and_then(Value::as_array)
                .map(|c| c.iter().filter(|v| !v.is_null()).collect())
                .unwrap_or_default();
            match components.as_slice() {
                [single] => translate_expression(single),
                _ => ExpressionUnit::Other,
            }
        }
        _ => ExpressionUnit::Other,
    }
}

fn translate_call(node: &Value) -> ExpressionUnit {
    let raw_target = node.get("expression");

    // `.call{value: v}(...)` wraps the member access in FunctionCallOptions.
    let effective_target = raw_target.map(|t| {
        if node_type(t) == Some("FunctionCallOptions") {
            t.get("expression").unwrap_or(t)
        } else {
            t
        }
    });

    let kind = effective_target
        .filter(|t| node_type(t) == Some("MemberAccess"))
        .and_then(|t| str_field(t, "memberName"))
        .map_or(CallKind::Ordinary, |member| match member {
            "call" => CallKind::LowLevelCall,
            "delegatecall" => CallKind::LowLevelDelegateCall,
            "staticcall" => CallKind::LowLevelStaticCall,
            _ => CallKind::Ordinary,
        });

    let target = effective_target.map_or(ExpressionUnit::Other, translate_expression);
    let args = node
        .get("arguments")
        .and_then(Value::as_array)
        .map(|args| args.iter().map(translate_expression).collect())
        .unwrap_or_default();

    ExpressionUnit::Call {
        target: Box::new(target),
        args,
        kind,
        span: parse_src(node),
    }
}

fn elementary_type_name(node: &Value) -> Option<&str> {
    let type_name = node.get("typeName")?;
    // Newer ASTs nest an ElementaryTypeName node; very old ones inline a string.
    type_name
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| type_name.as_str())
}

fn param_types(node: &Value) -> String {
    let params = node
        .get("parameters")
        .and_then(|p| p.get("parameters"))
        .and_then(Value::as_array);
    let Some(params) = params else {
        return String::new();
    };
    let types: Vec<&str> = params
        .iter()
        .map(|p| {
            p.get("typeDescriptions")
                .and_then(|t| t.get("typeString"))
                .and_then(Value::as_str)
                .or_else(|| {
                    p.get("typeName")
                        .and_then(|t| t.get("name"))
                        .and_then(Value::as_str)
                })
                .unwrap_or("unknown")
        })
        .collect();
    types.join(", ")
}

/// Parses a solc `src` field (`"start:length:fileIndex"`) into a byte span.
fn parse_src(node: &Value) -> Option<Span> {
    let src = str_field(node, "src")?;
    let mut parts = src.split(':');
    let start = parts.next()?.parse::<usize>().ok()?;
    let len = parts.next()?.parse::<usize>().ok()?;
    Some(Span::from_len(start, len))
}

fn node_type(node: &Value) -> Option<&str> {
    node.get("nodeType").and_then(Value::as_str)
}

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

fn malformed(path: &Path, detail: &str) -> ReconError {
    ReconError::MalformedTree {
        file: path.to_path_buf(),
        detail: detail.to_owned(),
    }
}
