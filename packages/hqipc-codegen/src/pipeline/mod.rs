//! Generation pipeline: extract → report → memoized emit.
//!
//! One `Generator` serves any number of interfaces across any number of
//! triggers; interfaces share nothing but the cache, so the host may process
//! them in any order.

mod cache;
mod fingerprint;

use std::sync::Arc;

use crate::errors::Result;
use crate::features::diagnostics::DiagnosticSink;
use crate::features::emission::GeneratedStubs;
use crate::features::extraction::{extract, InterfaceDescriptor, InterfaceMetadata};

pub use cache::EmitCache;
pub use fingerprint::Fingerprint;

/// What one pipeline run did for one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Text was rendered and registered.
    Emitted,
    /// Structurally unchanged descriptor; cached text was registered.
    Reused,
    /// No valid member survived extraction; nothing was registered.
    Skipped,
}

/// Port through which generated text is registered with the host build.
pub trait SourceSink {
    fn add_source(&mut self, hint_name: &str, contents: &str);
}

/// Collects registered sources; the test-side sink.
#[derive(Debug, Default)]
pub struct CollectingSourceSink {
    pub sources: Vec<(String, String)>,
}

impl CollectingSourceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, hint_name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|(name, _)| name == hint_name)
            .map(|(_, text)| text.as_str())
    }
}

impl SourceSink for CollectingSourceSink {
    fn add_source(&mut self, hint_name: &str, contents: &str) {
        self.sources.push((hint_name.to_string(), contents.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct Generator {
    cache: EmitCache,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the pipeline for one annotated interface.
    ///
    /// Diagnostics are always reported, even when emission is skipped; an
    /// invalid member never blocks generation for the valid remainder.
    pub fn run(
        &mut self,
        metadata: &InterfaceMetadata,
        diagnostics: &mut dyn DiagnosticSink,
        sources: &mut dyn SourceSink,
    ) -> Result<GenerationOutcome> {
        let descriptor = extract(metadata);
        for diagnostic in &descriptor.diagnostics {
            diagnostics.report(diagnostic);
        }

        if descriptor.member_count() == 0 {
            tracing::debug!(
                interface = %descriptor.interface_name,
                "no valid members; skipping emission"
            );
            return Ok(GenerationOutcome::Skipped);
        }

        let fingerprint = Fingerprint::of_descriptor(&descriptor)?;
        let (stubs, reused) = self.cache.get_or_emit(fingerprint, &descriptor);
        self.register(&descriptor, &stubs, sources);

        Ok(if reused {
            GenerationOutcome::Reused
        } else {
            GenerationOutcome::Emitted
        })
    }

    pub fn cache(&self) -> &EmitCache {
        &self.cache
    }

    fn register(
        &self,
        descriptor: &InterfaceDescriptor,
        stubs: &Arc<GeneratedStubs>,
        sources: &mut dyn SourceSink,
    ) {
        let base = format!(
            "{}.{}",
            descriptor.containing_module, descriptor.interface_name
        );
        sources.add_source(&format!("{base}.provider.generated.rs"), &stubs.provider);
        sources.add_source(&format!("{base}.consumer.generated.rs"), &stubs.consumer);
    }
}
