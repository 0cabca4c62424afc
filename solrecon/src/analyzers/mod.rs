//! Structural analyzers over the canonical model.
//!
//! Each detector is an independent predicate over the tree; tags are
//! cumulative and deduplicated into one canonical order so reports stay
//! diff-stable regardless of detection order. All of this is heuristic
//! pattern matching for triage, not sound static analysis.

pub mod entrypoints;
pub mod guards;
pub mod sinks;

pub use entrypoints::{collect_entrypoints, EntrypointRecord, EntrypointTag};
pub use sinks::{collect_sinks, SinkRecord, SinkTag};
