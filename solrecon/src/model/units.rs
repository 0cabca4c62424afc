//! Declaration-level units of the canonical model.

use super::tree::{Span, StatementUnit};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::PathBuf;

/// Kind of a contract-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    /// `contract C { ... }`
    Contract,
    /// `library L { ... }`
    Library,
    /// `interface I { ... }`
    Interface,
}

impl ContractKind {
    /// Lower-case display name as used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Library => "library",
            Self::Interface => "interface",
        }
    }
}

/// Function visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Callable externally and internally.
    Public,
    /// Callable only from outside.
    External,
    /// Callable only from this contract and derived contracts.
    Internal,
    /// Callable only from this contract.
    Private,
}

impl Visibility {
    /// Lower-case display name as used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::External => "external",
            Self::Internal => "internal",
            Self::Private => "private",
        }
    }

    /// True for visibilities reachable from outside the contract.
    #[must_use]
    pub const fn is_externally_reachable(self) -> bool {
        matches!(self, Self::Public | Self::External)
    }
}

/// Function state mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Default mutability.
    NonPayable,
    /// Accepts ether.
    Payable,
    /// Reads state, no writes.
    View,
    /// No state access.
    Pure,
}

impl Mutability {
    /// Lower-case display name as used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonPayable => "nonpayable",
            Self::Payable => "payable",
            Self::View => "view",
            Self::Pure => "pure",
        }
    }
}

/// Stable identifier for a function entity across record sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityId {
    /// Owning source file path.
    pub file: PathBuf,
    /// Contract name.
    pub contract: String,
    /// Function signature (`name(type, type, ...)`).
    pub signature: String,
    /// 1-based declaration line.
    pub line: u32,
}

/// One function, constructor, `receive` or `fallback` declaration.
#[derive(Debug, Clone)]
pub struct FunctionUnit {
    /// Declared name; empty for constructor/receive/fallback.
    pub name: String,
    /// Name plus ordered parameter type list, e.g. `transfer(address, uint256)`.
    /// Constructor/receive/fallback use their keyword as the display name.
    pub signature: String,
    /// Visibility; receive/fallback are `External` per their implicit ABI rules.
    pub visibility: Visibility,
    /// State mutability.
    pub mutability: Mutability,
    /// Modifier names referenced at the declaration site, in source order.
    pub applied_modifiers: Vec<String>,
    /// 1-based declaration line.
    pub source_line: u32,
    /// Exact byte span of the declaration; `None` from the coarse adapter.
    pub source_span: Option<Span>,
    /// Body statements; empty for interface/abstract declarations and for
    /// coarse-adapter output.
    pub body: Vec<StatementUnit>,
    /// True when the textual declaration lives in a different file than the
    /// contract that inherits it. Used to suppress cross-file inherited
    /// entrypoints (MVP limitation, not a completeness guarantee).
    pub declared_in_inherited_file: bool,
}

impl FunctionUnit {
    /// True for functions reachable from outside: public/external
    /// visibility, or the implicit `receive`/`fallback` surface.
    #[must_use]
    pub fn is_entrypoint(&self) -> bool {
        self.visibility.is_externally_reachable()
            || matches!(self.signature.as_str(), "receive()" | "fallback()")
    }
}

/// One modifier declaration; used only for guard-pattern detection.
#[derive(Debug, Clone)]
pub struct ModifierUnit {
    /// Modifier name.
    pub name: String,
    /// Parameter names in source order.
    pub params: Vec<String>,
    /// Body statements.
    pub body: Vec<StatementUnit>,
}

/// One contract, library, or interface declaration.
#[derive(Debug, Clone)]
pub struct ContractUnit {
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: ContractKind,
    /// Owning file path (lookup only, not ownership).
    pub file: PathBuf,
    /// Functions in declaration order.
    pub functions: Vec<FunctionUnit>,
    /// Modifiers declared in this contract, by name. Only modifiers from
    /// the same file are visible to the guard detector; inherited shadowing
    /// is not resolved.
    pub modifiers: FxHashMap<String, ModifierUnit>,
}

impl ContractUnit {
    /// Stable identity for one of this contract's functions.
    #[must_use]
    pub fn entity_id(&self, func: &FunctionUnit) -> EntityId {
        EntityId {
            file: self.file.clone(),
            contract: self.name.clone(),
            signature: func.signature.clone(),
            line: func.source_line,
        }
    }
}

/// One input file and its contract-like declarations, in declaration order.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File path as supplied by the scope resolver.
    pub path: PathBuf,
    /// Contracts in declaration order.
    pub contracts: Vec<ContractUnit>,
}
