//! Report assembly and rendering.
//!
//! [`assemble`] merges analyzer record sets into one format-agnostic
//! document tree; [`md`] and [`json`] render that tree. Ordering and
//! anchors come entirely from the tree, so both renderers are
//! byte-identical across runs on identical input.

pub mod assemble;
pub mod json;
pub mod md;

pub use assemble::{
    anchor_id, assemble, ContractSection, FileSection, FunctionEntry, ReportTree, SinkEntry,
    TocEntry,
};
