//! HQIPC stub compiler.
//!
//! Turns an interface description (methods and events with typed parameters
//! and returns, annotated with a channel namespace) into two generated Rust
//! artifacts: a server-side provider adapter and a client-side consumer
//! proxy, wired over named channels.
//!
//! Architecture (vertical slices):
//! - `shared/`     : common value types (Span)
//! - `features/`   : extraction → naming → emission, plus diagnostics
//! - `pipeline/`   : orchestration with a fingerprint-memoized emit step
//!
//! The whole pipeline is pure and deterministic: equal inputs produce
//! structurally equal descriptors, and equal descriptors produce
//! byte-identical output text. The pipeline exploits that by caching emitted
//! text under a blake3 fingerprint of the descriptor, so an unchanged
//! interface is never re-rendered.

pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use errors::{CodegenError, Result};
pub use features::diagnostics::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticSink, Severity, TracingSink,
};
pub use features::emission::{emit, GeneratedStubs};
pub use features::extraction::{
    extract, DelegateSignature, EventMetadata, InterfaceDescriptor, InterfaceMetadata,
    MemberDescriptor, MethodMetadata, ParamMetadata, ParameterDescriptor,
};
pub use features::naming;
pub use pipeline::{
    CollectingSourceSink, EmitCache, Fingerprint, GenerationOutcome, Generator, SourceSink,
};
pub use shared::models::Span;
