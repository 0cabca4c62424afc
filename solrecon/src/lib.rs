//! solrecon: structural reconnaissance over Solidity source files.
//!
//! Classifies externally reachable functions ("entrypoints") and
//! external-influence points ("sinks") to accelerate manual security
//! review. It surfaces triage signals; it does not prove or disprove
//! vulnerabilities.
//!
//! The pipeline: a backend adapter (solc standard-json or the fallback
//! indexer) produces the canonical model, the classifier filters
//! contract kinds, the two analyzers tag findings, and the report
//! assembler merges everything into one deterministically ordered
//! document tree that the Markdown/JSON renderers serialize.

pub mod analyzers;
pub mod backend;
pub mod classify;
pub mod cli;
pub mod config;
pub mod entry_point;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scope;

pub use errors::ReconError;
pub use pipeline::{Pipeline, PipelineOutput};
