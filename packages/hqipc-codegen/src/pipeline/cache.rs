//! Fingerprint-keyed memo cache for emitted text.
//!
//! Given byte-identical descriptors across two generation triggers, emission
//! must be skippable; the host exploits this for incremental rebuilds, so
//! the hit path is a correctness contract, not just an optimization.

use std::collections::HashMap;
use std::sync::Arc;

use crate::features::emission::{emit, GeneratedStubs};
use crate::features::extraction::InterfaceDescriptor;
use crate::pipeline::Fingerprint;

#[derive(Debug, Default)]
pub struct EmitCache {
    entries: HashMap<Fingerprint, Arc<GeneratedStubs>>,
    hits: u64,
    misses: u64,
}

impl EmitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached text for `fingerprint`, rendering the descriptor
    /// only on a miss. The boolean is true on a hit.
    pub fn get_or_emit(
        &mut self,
        fingerprint: Fingerprint,
        descriptor: &InterfaceDescriptor,
    ) -> (Arc<GeneratedStubs>, bool) {
        if let Some(stubs) = self.entries.get(&fingerprint) {
            self.hits += 1;
            tracing::debug!(
                interface = %descriptor.interface_name,
                fingerprint = %fingerprint.to_hex(),
                "emit cache hit"
            );
            return (Arc::clone(stubs), true);
        }

        self.misses += 1;
        tracing::debug!(
            interface = %descriptor.interface_name,
            fingerprint = %fingerprint.to_hex(),
            "emit cache miss"
        );
        let stubs = Arc::new(emit(descriptor));
        self.entries.insert(fingerprint, Arc::clone(&stubs));
        (stubs, false)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
