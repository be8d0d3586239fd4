//! Descriptor model — the immutable value representation of an extracted
//! interface.
//!
//! Built once per extraction pass and read thereafter. Deep equality is the
//! contract the memoized emission step relies on: two descriptors are equal
//! iff all fields are equal, so a structurally unchanged interface hashes to
//! the same fingerprint and is never re-emitted.

use serde::{Deserialize, Serialize};

use crate::features::diagnostics::Diagnostic;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_name: String,
}

/// One method or event. Both kinds share shape; events additionally carry
/// the resolved delegate type and always have a void return (a non-void
/// delegate never reaches the descriptor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    /// `None` means void.
    pub return_type: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Present for events only.
    pub delegate_type: Option<String>,
}

impl MemberDescriptor {
    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn is_event(&self) -> bool {
        self.delegate_type.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub containing_module: String,
    pub interface_name: String,
    pub channel_namespace: String,
    /// Declaration order, preserved through emission.
    pub methods: Vec<MemberDescriptor>,
    /// Declaration order; invalid events are excluded, not represented.
    pub events: Vec<MemberDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl InterfaceDescriptor {
    pub fn member_count(&self) -> usize {
        self.methods.len() + self.events.len()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
