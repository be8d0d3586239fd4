//! Provider artifact: the server-side adapter that binds one implementation
//! of the interface to its channels.
//!
//! Construction opens every event's broadcast channel and forwards native
//! firings onto it, then registers every method under its channel name with
//! the action- or func-shaped variant matching the return kind. Disposal
//! detaches the event relays first, then unregisters the method channels,
//! and is idempotent.

use crate::features::emission::{
    call_args, gate_generics, header, interface_path, tuple_type, SourceWriter,
};
use crate::features::extraction::{InterfaceDescriptor, MemberDescriptor};
use crate::features::naming;

pub(crate) fn emit_provider(descriptor: &InterfaceDescriptor) -> String {
    let host = naming::host_type_name(&descriptor.interface_name);
    let iface = interface_path(descriptor);
    let ns = &descriptor.channel_namespace;

    let mut w = SourceWriter::new();
    w.line(&header());
    w.blank();
    w.line("#[allow(non_snake_case)]");
    w.open(&format!("pub mod {host}"));
    w.line("use std::sync::Arc;");
    w.blank();

    emit_struct(&mut w, descriptor, &iface);
    w.blank();
    emit_factory(&mut w, descriptor, &iface, ns);
    w.blank();
    emit_dispose(&mut w, descriptor);

    w.close();
    w.finish()
}

fn emit_struct(w: &mut SourceWriter, descriptor: &InterfaceDescriptor, iface: &str) {
    w.line(&format!(
        "/// Binds one implementation of `{iface}` to its channels."
    ));
    w.open("pub struct Provider");
    w.line(&format!("implementation: Arc<dyn {iface} + Send + Sync>,"));
    w.line("disposed: bool,");
    for event in &descriptor.events {
        let field = naming::field_ident(&event.name);
        w.line(&format!(
            "{field}_relay: hqipc_runtime::SubscriptionToken,"
        ));
    }
    for method in &descriptor.methods {
        let field = naming::field_ident(&method.name);
        w.line(&format!(
            "{field}: hqipc_runtime::CallGateProvider<{}>,",
            gate_generics(method)
        ));
    }
    w.close();
}

fn emit_factory(w: &mut SourceWriter, descriptor: &InterfaceDescriptor, iface: &str, ns: &str) {
    w.line("/// Opens every channel and returns the registration handle;");
    w.line("/// dropping the handle tears the registration down.");
    w.open(&format!(
        "pub fn RegisterIpcProvider(implementation: Arc<dyn {iface} + Send + Sync>, hub: &hqipc_runtime::ChannelHub) -> Provider"
    ));

    for event in &descriptor.events {
        emit_event_binding(w, event, ns);
        w.blank();
    }
    for method in &descriptor.methods {
        emit_method_binding(w, method, ns);
        w.blank();
    }

    w.open("Provider");
    w.line("implementation,");
    w.line("disposed: false,");
    for event in &descriptor.events {
        w.line(&format!("{}_relay,", naming::field_ident(&event.name)));
    }
    for method in &descriptor.methods {
        w.line(&format!("{},", naming::field_ident(&method.name)));
    }
    w.close();
    w.close();
}

fn emit_event_binding(w: &mut SourceWriter, event: &MemberDescriptor, ns: &str) {
    let field = naming::field_ident(&event.name);
    let channel = naming::channel_name(ns, &event.name);
    let param_types: Vec<String> = event.parameters.iter().map(|p| p.type_name.clone()).collect();
    let args_type = tuple_type(&param_types);

    w.line(&format!(
        "let {field} = hub.get_ipc_provider::<{}>(\"{channel}\");",
        gate_generics(event)
    ));
    w.open(&format!("let {field}_relay ="));
    w.line(&format!("let gate = {field}.clone();"));
    w.line(&format!(
        "implementation.{}_subscribe(Arc::new(move |args: &{args_type}| gate.send_message(args.clone())))",
        event.name
    ));
    w.close_with("};");
}

fn emit_method_binding(w: &mut SourceWriter, method: &MemberDescriptor, ns: &str) {
    let field = naming::field_ident(&method.name);
    let channel = naming::channel_name(ns, &method.name);
    let register = if method.is_void() {
        "register_action"
    } else {
        "register_func"
    };

    w.line(&format!(
        "let {field} = hub.get_ipc_provider::<{}>(\"{channel}\");",
        gate_generics(method)
    ));
    w.open_call(&format!("{field}.{register}("));
    w.line("let implementation = Arc::clone(&implementation);");
    w.line(&format!(
        "move |{}| implementation.{}({})",
        super::tuple_pattern(method),
        method.name,
        call_args(method)
    ));
    w.close_with("});");
}

fn emit_dispose(w: &mut SourceWriter, descriptor: &InterfaceDescriptor) {
    w.open("impl Provider");
    w.line("/// Detaches every event relay from the implementation, then");
    w.line("/// unregisters every method channel. Safe to call more than once.");
    w.open("pub fn dispose(&mut self)");
    w.open("if self.disposed");
    w.line("return;");
    w.close();
    w.line("self.disposed = true;");
    for event in &descriptor.events {
        let field = naming::field_ident(&event.name);
        w.line(&format!(
            "self.implementation.{}_unsubscribe(self.{field}_relay);",
            event.name
        ));
    }
    for method in &descriptor.methods {
        w.line(&format!(
            "self.{}.unregister();",
            naming::field_ident(&method.name)
        ));
    }
    w.close();
    w.close();
    w.blank();
    w.open("impl Drop for Provider");
    w.open("fn drop(&mut self)");
    w.line("self.dispose();");
    w.close();
    w.close();
}
