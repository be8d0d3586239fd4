//! Naming rules for generated identifiers and channel names.
//!
//! All functions here are pure and total. The channel name is the wire-level
//! contract between the generated provider and consumer; both sides derive
//! it with the same function and must match exactly.

use crate::features::extraction::MemberDescriptor;

/// Placeholder type occupying the return slot of a void channel. The
/// transport requires a concrete type per slot even for no-result calls.
pub const VOID_PLACEHOLDER: &str = "()";

/// Derives the generated host type name from the interface name: exactly one
/// leading `I` is stripped when the name is longer than one character.
pub fn host_type_name(interface_name: &str) -> &str {
    if interface_name.len() > 1 && interface_name.starts_with('I') {
        &interface_name[1..]
    } else {
        interface_name
    }
}

/// Derives a field identifier from a member name by lower-casing its first
/// character only.
pub fn field_ident(member_name: &str) -> String {
    let mut chars = member_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `namespace.member` — identical on the provider and consumer sides.
pub fn channel_name(namespace: &str, member_name: &str) -> String {
    format!("{namespace}.{member_name}")
}

/// Ordered parameter types followed by the return slot, with the void
/// placeholder substituted for a void return.
pub fn channel_arity(member: &MemberDescriptor) -> Vec<String> {
    member
        .parameters
        .iter()
        .map(|p| p.type_name.clone())
        .chain(std::iter::once(
            member
                .return_type
                .clone()
                .unwrap_or_else(|| VOID_PLACEHOLDER.to_string()),
        ))
        .collect()
}
