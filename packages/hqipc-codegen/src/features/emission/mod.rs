//! Stub emitter: renders the provider and consumer artifacts from a
//! validated descriptor.
//!
//! Both artifacts are Rust source text targeting `hqipc_runtime`. The
//! provider side is included by the implementing component, the consumer
//! side by the calling component; each defines a module named after the
//! host type (interface name with the `I` prefix stripped) so the two texts
//! never meet in one crate. Emission is deterministic: structurally equal
//! descriptors render to byte-identical text.

mod consumer;
mod provider;
mod writer;

use serde::{Deserialize, Serialize};

use crate::features::extraction::{InterfaceDescriptor, MemberDescriptor};
use crate::features::naming;

pub use writer::SourceWriter;

/// The two generated artifacts for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStubs {
    pub provider: String,
    pub consumer: String,
}

/// Renders both artifacts for a validated descriptor.
pub fn emit(descriptor: &InterfaceDescriptor) -> GeneratedStubs {
    GeneratedStubs {
        provider: provider::emit_provider(descriptor),
        consumer: consumer::emit_consumer(descriptor),
    }
}

pub(crate) fn header() -> String {
    format!(
        "// Generated by hqipc-codegen {}. Do not edit.",
        env!("CARGO_PKG_VERSION")
    )
}

/// Fully qualified path of the source interface trait.
pub(crate) fn interface_path(descriptor: &InterfaceDescriptor) -> String {
    format!(
        "{}::{}",
        descriptor.containing_module, descriptor.interface_name
    )
}

/// Rust tuple type for an ordered type list: `()`, `(T,)`, `(T1, T2)`.
pub(crate) fn tuple_type(types: &[String]) -> String {
    match types.len() {
        0 => "()".to_string(),
        1 => format!("({},)", types[0]),
        _ => format!("({})", types.join(", ")),
    }
}

/// Generic arguments of a member's call gate: parameter tuple, return slot.
pub(crate) fn gate_generics(member: &MemberDescriptor) -> String {
    let mut arity = naming::channel_arity(member);
    let return_slot = arity.pop().unwrap_or_else(|| naming::VOID_PLACEHOLDER.to_string());
    format!("{}, {}", tuple_type(&arity), return_slot)
}

/// Closure pattern binding a member's parameter tuple: `()`, `(a,)`,
/// `(a, b)`.
pub(crate) fn tuple_pattern(member: &MemberDescriptor) -> String {
    let names: Vec<&str> = member.parameters.iter().map(|p| p.name.as_str()).collect();
    match names.len() {
        0 => "()".to_string(),
        1 => format!("({},)", names[0]),
        _ => format!("({})", names.join(", ")),
    }
}

/// Comma-separated argument names for forwarding a call.
pub(crate) fn call_args(member: &MemberDescriptor) -> String {
    member
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `name: Type` declarations for a trait method signature.
pub(crate) fn param_decls(member: &MemberDescriptor) -> String {
    member
        .parameters
        .iter()
        .map(|p| format!("{}: {}", p.name, p.type_name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extraction::ParameterDescriptor;
    use pretty_assertions::assert_eq;

    fn member(params: &[(&str, &str)], return_type: Option<&str>) -> MemberDescriptor {
        MemberDescriptor {
            name: "X".to_string(),
            return_type: return_type.map(str::to_string),
            parameters: params
                .iter()
                .map(|(n, t)| ParameterDescriptor {
                    name: n.to_string(),
                    type_name: t.to_string(),
                })
                .collect(),
            delegate_type: None,
        }
    }

    #[test]
    fn test_gate_generics() {
        assert_eq!(
            gate_generics(&member(&[("a", "i32"), ("b", "i32")], Some("i32"))),
            "(i32, i32), i32"
        );
        assert_eq!(
            gate_generics(&member(&[("s", "String")], None)),
            "(String,), ()"
        );
        assert_eq!(gate_generics(&member(&[], None)), "(), ()");
    }

    #[test]
    fn test_tuple_pattern() {
        assert_eq!(tuple_pattern(&member(&[], None)), "()");
        assert_eq!(tuple_pattern(&member(&[("a", "i32")], None)), "(a,)");
        assert_eq!(
            tuple_pattern(&member(&[("a", "i32"), ("b", "i32")], None)),
            "(a, b)"
        );
    }

    #[test]
    fn test_param_decls() {
        assert_eq!(
            param_decls(&member(&[("first", "i32"), ("second", "String")], None)),
            "first: i32, second: String"
        );
    }
}
