//! Member walk that turns host metadata into a descriptor.
//!
//! Pure and side-effect free: equal metadata yields structurally equal
//! descriptors. A single invalid member never blocks the rest of the
//! interface — it is excluded and replaced by a diagnostic.

use std::collections::HashSet;

use crate::features::diagnostics::Diagnostic;
use crate::features::extraction::{
    InterfaceDescriptor, InterfaceMetadata, MemberDescriptor, ParameterDescriptor,
};
use crate::features::naming;

/// Extracts the immutable descriptor for one annotated interface.
///
/// Methods are walked first, then events, each in declaration order.
/// Validation per member:
/// - an event whose delegate returns non-void is excluded with HQIPC01;
/// - a member whose derived field identifier collides with an earlier
///   member's (which covers exact duplicates and names differing only in
///   the case of their first character) is excluded with HQIPC02.
pub fn extract(metadata: &InterfaceMetadata) -> InterfaceDescriptor {
    let channel_namespace = metadata.channel_namespace.clone().unwrap_or_default();

    let mut methods = Vec::with_capacity(metadata.methods.len());
    let mut events = Vec::with_capacity(metadata.events.len());
    let mut diagnostics = Vec::new();
    let mut taken_idents: HashSet<String> = HashSet::new();

    for method in &metadata.methods {
        if !taken_idents.insert(naming::field_ident(&method.name)) {
            diagnostics.push(Diagnostic::member_name_collision(method.span));
            continue;
        }
        methods.push(MemberDescriptor {
            name: method.name.clone(),
            return_type: method.return_type.clone(),
            parameters: to_parameters(&method.parameters),
            delegate_type: None,
        });
    }

    for event in &metadata.events {
        if event.signature.return_type.is_some() {
            diagnostics.push(Diagnostic::non_void_event_delegate(event.span));
            continue;
        }
        if !taken_idents.insert(naming::field_ident(&event.name)) {
            diagnostics.push(Diagnostic::member_name_collision(event.span));
            continue;
        }
        events.push(MemberDescriptor {
            name: event.name.clone(),
            return_type: None,
            parameters: to_parameters(&event.signature.parameters),
            delegate_type: Some(event.delegate_type.clone()),
        });
    }

    InterfaceDescriptor {
        containing_module: metadata.containing_module.clone(),
        interface_name: metadata.interface_name.clone(),
        channel_namespace,
        methods,
        events,
        diagnostics,
    }
}

fn to_parameters(params: &[crate::features::extraction::ParamMetadata]) -> Vec<ParameterDescriptor> {
    params
        .iter()
        .map(|p| ParameterDescriptor {
            name: p.name.clone(),
            type_name: p.type_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::diagnostics::DiagnosticCode;
    use crate::features::extraction::{
        DelegateSignature, EventMetadata, MethodMetadata, ParamMetadata,
    };
    use crate::shared::models::Span;
    use pretty_assertions::assert_eq;

    fn sample_metadata() -> InterfaceMetadata {
        InterfaceMetadata::new("crate::sample_api", "ISampleAPI")
            .with_channel_namespace("HQIPCSample")
            .with_event(EventMetadata::new(
                "SampleEventOneArg",
                "Fn(String)",
                DelegateSignature {
                    parameters: vec![ParamMetadata::new("message", "String")],
                    return_type: None,
                },
            ))
            .with_event(EventMetadata::new(
                "SampleEvent",
                "Fn()",
                DelegateSignature {
                    parameters: vec![],
                    return_type: None,
                },
            ))
            .with_method(MethodMetadata::new(
                "SampleFunction",
                vec![
                    ParamMetadata::new("first", "i32"),
                    ParamMetadata::new("second", "i32"),
                ],
                Some("i32"),
            ))
            .with_method(MethodMetadata::new(
                "SampleAction",
                vec![
                    ParamMetadata::new("first", "String"),
                    ParamMetadata::new("second", "String"),
                ],
                None,
            ))
    }

    #[test]
    fn test_sample_interface_extracts_cleanly() {
        let descriptor = extract(&sample_metadata());

        assert_eq!(descriptor.channel_namespace, "HQIPCSample");
        assert_eq!(descriptor.methods.len(), 2);
        assert_eq!(descriptor.events.len(), 2);
        assert!(descriptor.diagnostics.is_empty());

        // Declaration order is preserved.
        assert_eq!(descriptor.methods[0].name, "SampleFunction");
        assert_eq!(descriptor.methods[1].name, "SampleAction");
        assert_eq!(descriptor.events[0].name, "SampleEventOneArg");
        assert_eq!(descriptor.events[1].name, "SampleEvent");

        assert_eq!(descriptor.methods[0].return_type.as_deref(), Some("i32"));
        assert!(descriptor.methods[1].is_void());
        assert_eq!(descriptor.events[0].delegate_type.as_deref(), Some("Fn(String)"));
        assert_eq!(descriptor.events[0].parameters[0].name, "message");
    }

    #[test]
    fn test_non_void_delegate_is_excluded_with_hqipc01() {
        let metadata = sample_metadata().with_event(
            EventMetadata::new(
                "SampleEventReturnValue",
                "Fn(i32) -> f32",
                DelegateSignature {
                    parameters: vec![ParamMetadata::new("value", "i32")],
                    return_type: Some("f32".to_string()),
                },
            )
            .with_span(Span::new(12, 4, 12, 48)),
        );

        let descriptor = extract(&metadata);

        assert_eq!(descriptor.methods.len(), 2);
        assert_eq!(descriptor.events.len(), 2);
        assert_eq!(descriptor.diagnostics.len(), 1);
        assert_eq!(descriptor.diagnostics[0].code, DiagnosticCode::Hqipc01);
        assert_eq!(descriptor.diagnostics[0].span, Span::new(12, 4, 12, 48));
        assert!(descriptor
            .events
            .iter()
            .all(|e| e.name != "SampleEventReturnValue"));
    }

    #[test]
    fn test_counting_property() {
        // N methods, M events of which k are invalid: N methods, M - k
        // events, k diagnostics.
        let mut metadata = InterfaceMetadata::new("crate::api", "IExample");
        for i in 0..4 {
            metadata = metadata.with_method(MethodMetadata::new(
                format!("Method{i}"),
                vec![],
                Some("i32"),
            ));
        }
        for i in 0..5 {
            let bad = i % 2 == 0; // 3 of 5 invalid
            metadata = metadata.with_event(EventMetadata::new(
                format!("Event{i}"),
                "Fn()",
                DelegateSignature {
                    parameters: vec![],
                    return_type: bad.then(|| "i32".to_string()),
                },
            ));
        }

        let descriptor = extract(&metadata);
        assert_eq!(descriptor.methods.len(), 4);
        assert_eq!(descriptor.events.len(), 2);
        assert_eq!(descriptor.diagnostics.len(), 3);
    }

    #[test]
    fn test_missing_namespace_degrades_to_empty() {
        let metadata = InterfaceMetadata::new("crate::api", "IExample")
            .with_method(MethodMetadata::new("Ping", vec![], None));
        let descriptor = extract(&metadata);
        assert_eq!(descriptor.channel_namespace, "");
        assert_eq!(descriptor.methods.len(), 1);
    }

    #[test]
    fn test_duplicate_member_names_rejected_with_hqipc02() {
        let metadata = InterfaceMetadata::new("crate::api", "IExample")
            .with_method(MethodMetadata::new("Ping", vec![], None))
            .with_method(MethodMetadata::new("Ping", vec![], Some("i32")));

        let descriptor = extract(&metadata);
        assert_eq!(descriptor.methods.len(), 1);
        assert!(descriptor.methods[0].is_void());
        assert_eq!(descriptor.diagnostics.len(), 1);
        assert_eq!(descriptor.diagnostics[0].code, DiagnosticCode::Hqipc02);
    }

    #[test]
    fn test_first_char_case_collision_rejected() {
        // "Ping" and "ping" both derive the field identifier "ping".
        let metadata = InterfaceMetadata::new("crate::api", "IExample")
            .with_method(MethodMetadata::new("Ping", vec![], None))
            .with_event(EventMetadata::new(
                "ping",
                "Fn()",
                DelegateSignature {
                    parameters: vec![],
                    return_type: None,
                },
            ));

        let descriptor = extract(&metadata);
        assert_eq!(descriptor.methods.len(), 1);
        assert!(descriptor.events.is_empty());
        assert_eq!(descriptor.diagnostics[0].code, DiagnosticCode::Hqipc02);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let metadata = sample_metadata();
        assert_eq!(extract(&metadata), extract(&metadata));
    }
}
