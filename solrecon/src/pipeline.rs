//! Pipeline orchestration.
//!
//! Single-threaded, synchronous, and pure over already-acquired tree data:
//! classify, run both analyzers, assemble the document tree. The sink
//! phase failing with `PrecisionUnavailable` degrades to a user-facing
//! note; the entrypoint phase always proceeds.

use crate::analyzers::{collect_entrypoints, collect_sinks, EntrypointRecord, SinkRecord};
use crate::classify::{classify, ClassifierConfig};
use crate::model::{SourceTexts, SourceUnit};
use crate::report::{assemble, ReportTree};

/// Reconnaissance pipeline configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    classifier: ClassifierConfig,
}

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Tagged entrypoints in classified order.
    pub entrypoints: Vec<EntrypointRecord>,
    /// Sink matches; empty when the sink phase was skipped.
    pub sinks: Vec<SinkRecord>,
    /// Set when the sink phase was skipped for lack of exact offsets.
    pub sink_note: Option<String>,
    /// Assembled document tree, ready for rendering.
    pub tree: ReportTree,
}

impl Pipeline {
    /// Creates a pipeline with default classification (contracts only).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally analyze `library` declarations.
    #[must_use]
    pub const fn with_libraries(mut self, include: bool) -> Self {
        self.classifier.include_libraries = include;
        self
    }

    /// Additionally analyze `interface` declarations.
    #[must_use]
    pub const fn with_interfaces(mut self, include: bool) -> Self {
        self.classifier.include_interfaces = include;
        self
    }

    /// Runs both analyzers over the canonical model and assembles the
    /// document tree. `warnings` seeds the tree's warning list (adapter
    /// failures collected by the caller); analyzer warnings are appended.
    #[must_use]
    pub fn analyze(
        &self,
        units: &[SourceUnit],
        texts: &SourceTexts,
        mut warnings: Vec<String>,
    ) -> PipelineOutput {
        let classified = classify(units, self.classifier);

        let (entrypoints, modifier_warnings) = collect_entrypoints(&classified);
        warnings.extend(modifier_warnings);

        // A sink-phase failure (PrecisionUnavailable) aborts that phase
        // only; the entrypoint records above are unaffected.
        let (sinks, sink_note) = match collect_sinks(&classified, texts) {
            Ok(records) => (records, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };

        let tree = assemble(&classified, &entrypoints, &sinks, sink_note.clone(), warnings);

        PipelineOutput {
            entrypoints,
            sinks,
            sink_note,
            tree,
        }
    }
}
