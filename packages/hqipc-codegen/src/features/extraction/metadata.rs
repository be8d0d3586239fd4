//! Host-facing input surface.
//!
//! The host front-end describes one annotated interface as a plain metadata
//! tree: name, containing module path, channel namespace, and the member
//! declarations in source order. Type references are opaque strings holding
//! resolved Rust type paths; extraction never interprets them beyond
//! equality. The channel namespace is an explicit configuration value — a
//! missing one degrades to the empty string during extraction rather than
//! failing.

use serde::{Deserialize, Serialize};

use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamMetadata {
    pub name: String,
    pub type_name: String,
}

impl ParamMetadata {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Resolved call signature of an event's delegate type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelegateSignature {
    pub parameters: Vec<ParamMetadata>,
    /// `None` means void. Anything else is rejected during extraction.
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    pub parameters: Vec<ParamMetadata>,
    /// `None` means void.
    pub return_type: Option<String>,
    pub span: Span,
}

impl MethodMetadata {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParamMetadata>,
        return_type: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: return_type.map(str::to_string),
            span: Span::zero(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventMetadata {
    pub name: String,
    /// Resolved delegate type reference, e.g. `Fn(String)`.
    pub delegate_type: String,
    pub signature: DelegateSignature,
    pub span: Span,
}

impl EventMetadata {
    pub fn new(
        name: impl Into<String>,
        delegate_type: impl Into<String>,
        signature: DelegateSignature,
    ) -> Self {
        Self {
            name: name.into(),
            delegate_type: delegate_type.into(),
            signature,
            span: Span::zero(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// One annotated interface as supplied by the host front-end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceMetadata {
    /// Module path the interface trait lives under, e.g. `crate::sample_api`.
    pub containing_module: String,
    pub interface_name: String,
    /// The annotation's single argument; `None` when absent.
    pub channel_namespace: Option<String>,
    pub methods: Vec<MethodMetadata>,
    pub events: Vec<EventMetadata>,
}

impl InterfaceMetadata {
    pub fn new(containing_module: impl Into<String>, interface_name: impl Into<String>) -> Self {
        Self {
            containing_module: containing_module.into(),
            interface_name: interface_name.into(),
            channel_namespace: None,
            methods: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_channel_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.channel_namespace = Some(namespace.into());
        self
    }

    pub fn with_method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_event(mut self, event: EventMetadata) -> Self {
        self.events.push(event);
        self
    }
}
