//! Consumer artifact: the client-side proxy implementing the original
//! interface over channels.
//!
//! Every channel binding is created lazily on first use and cached in a
//! `OnceLock` slot. For events, the first external subscriber triggers both
//! the channel binding and an internal relay into a local aggregate; later
//! subscribe/unsubscribe cycles only touch the aggregate, and the relay is
//! torn down at disposal.

use crate::features::emission::{
    gate_generics, header, interface_path, param_decls, tuple_pattern, SourceWriter,
};
use crate::features::extraction::{InterfaceDescriptor, MemberDescriptor};
use crate::features::naming;

pub(crate) fn emit_consumer(descriptor: &InterfaceDescriptor) -> String {
    let host = naming::host_type_name(&descriptor.interface_name);
    let iface = interface_path(descriptor);
    let ns = &descriptor.channel_namespace;
    let consumer_trait = format!("{}Consumer", descriptor.interface_name);

    let mut w = SourceWriter::new();
    w.line(&header());
    w.blank();
    w.line(&format!("/// `{iface}` plus disposal."));
    w.open(&format!("pub trait {consumer_trait}: {iface}"));
    w.line("fn dispose(&mut self);");
    w.close();
    w.blank();
    w.line("#[allow(non_snake_case)]");
    w.open(&format!("pub mod {host}"));
    w.line("use std::sync::{Arc, OnceLock};");
    w.blank();

    emit_struct(&mut w, descriptor, &iface);
    w.blank();
    emit_factory(&mut w, descriptor);
    w.blank();
    emit_interface_impl(&mut w, descriptor, &iface, ns);
    w.blank();
    emit_dispose(&mut w, descriptor, &consumer_trait);

    w.close();
    w.finish()
}

fn emit_struct(w: &mut SourceWriter, descriptor: &InterfaceDescriptor, iface: &str) {
    w.line(&format!("/// Lazily binds to the channels of `{iface}`."));
    w.open("pub struct Consumer");
    w.line("hub: hqipc_runtime::ChannelHub,");
    w.line("disposed: bool,");
    for event in &descriptor.events {
        let field = naming::field_ident(&event.name);
        let generics = gate_generics(event);
        let args = event_args_type(event);
        w.line(&format!(
            "{field}: Arc<hqipc_runtime::EventAggregate<{args}>>,"
        ));
        w.line(&format!(
            "{field}_relay: OnceLock<(hqipc_runtime::CallGateSubscriber<{generics}>, hqipc_runtime::GateSubscriptionId)>,"
        ));
    }
    for method in &descriptor.methods {
        let field = naming::field_ident(&method.name);
        w.line(&format!(
            "{field}: OnceLock<hqipc_runtime::CallGateSubscriber<{}>>,",
            gate_generics(method)
        ));
    }
    w.close();
}

fn emit_factory(w: &mut SourceWriter, descriptor: &InterfaceDescriptor) {
    w.line("/// Creates a client bound to `hub`. No channel is touched until");
    w.line("/// the corresponding member is first used.");
    w.open("pub fn CreateIpcClient(hub: &hqipc_runtime::ChannelHub) -> Consumer");
    w.open("Consumer");
    w.line("hub: hub.clone(),");
    w.line("disposed: false,");
    for event in &descriptor.events {
        let field = naming::field_ident(&event.name);
        w.line(&format!(
            "{field}: Arc::new(hqipc_runtime::EventAggregate::new()),"
        ));
        w.line(&format!("{field}_relay: OnceLock::new(),"));
    }
    for method in &descriptor.methods {
        w.line(&format!(
            "{}: OnceLock::new(),",
            naming::field_ident(&method.name)
        ));
    }
    w.close();
    w.close();
}

fn emit_interface_impl(
    w: &mut SourceWriter,
    descriptor: &InterfaceDescriptor,
    iface: &str,
    ns: &str,
) {
    w.open(&format!("impl {iface} for Consumer"));
    let mut first = true;
    for event in &descriptor.events {
        if !first {
            w.blank();
        }
        first = false;
        emit_event_accessors(w, event, ns);
    }
    for method in &descriptor.methods {
        if !first {
            w.blank();
        }
        first = false;
        emit_method(w, method, ns);
    }
    w.close();
}

fn emit_event_accessors(w: &mut SourceWriter, event: &MemberDescriptor, ns: &str) {
    let field = naming::field_ident(&event.name);
    let channel = naming::channel_name(ns, &event.name);
    let generics = gate_generics(event);
    let args = event_args_type(event);

    w.open(&format!(
        "fn {}_subscribe(&self, handler: hqipc_runtime::EventHandler<{args}>) -> hqipc_runtime::SubscriptionToken",
        event.name
    ));
    w.open(&format!("self.{field}_relay.get_or_init(||"));
    w.line(&format!(
        "let gate = self.hub.get_ipc_subscriber::<{generics}>(\"{channel}\");"
    ));
    w.line(&format!("let aggregate = Arc::clone(&self.{field});"));
    w.line("let relay = gate.subscribe(move |args| aggregate.raise(args));");
    w.line("(gate, relay)");
    w.close_with("});");
    w.line(&format!("self.{field}.subscribe(handler)"));
    w.close();
    w.blank();
    w.open(&format!(
        "fn {}_unsubscribe(&self, token: hqipc_runtime::SubscriptionToken)",
        event.name
    ));
    w.line(&format!("self.{field}.unsubscribe(token);"));
    w.close();
}

fn emit_method(w: &mut SourceWriter, method: &MemberDescriptor, ns: &str) {
    let field = naming::field_ident(&method.name);
    let channel = naming::channel_name(ns, &method.name);
    let generics = gate_generics(method);
    let args = tuple_pattern(method);
    let decls = param_decls(method);
    let signature = match (&method.return_type, decls.is_empty()) {
        (Some(ret), false) => format!("fn {}(&self, {decls}) -> {ret}", method.name),
        (Some(ret), true) => format!("fn {}(&self) -> {ret}", method.name),
        (None, false) => format!("fn {}(&self, {decls})", method.name),
        (None, true) => format!("fn {}(&self)", method.name),
    };
    let invoke = if method.is_void() {
        "invoke_action"
    } else {
        "invoke_func"
    };
    let terminator = if method.is_void() { ";" } else { "" };

    w.open(&signature);
    w.line(&format!("self.{field}"));
    w.line(&format!(
        "    .get_or_init(|| self.hub.get_ipc_subscriber::<{generics}>(\"{channel}\"))"
    ));
    w.line(&format!("    .{invoke}({args})"));
    w.line(&format!(
        "    .unwrap_or_else(|err| panic!(\"ipc call '{channel}' failed: {{err}}\")){terminator}"
    ));
    w.close();
}

fn emit_dispose(w: &mut SourceWriter, descriptor: &InterfaceDescriptor, consumer_trait: &str) {
    w.open(&format!("impl super::{consumer_trait} for Consumer"));
    w.line("/// Tears down every channel relay created over the consumer's");
    w.line("/// lifetime. Safe to call more than once.");
    w.open("fn dispose(&mut self)");
    w.open("if self.disposed");
    w.line("return;");
    w.close();
    w.line("self.disposed = true;");
    for event in &descriptor.events {
        let field = naming::field_ident(&event.name);
        w.open(&format!(
            "if let Some((gate, relay)) = self.{field}_relay.get()"
        ));
        w.line("gate.unsubscribe(*relay);");
        w.close();
    }
    w.close();
    w.close();
    w.blank();
    w.open("impl Drop for Consumer");
    w.open("fn drop(&mut self)");
    w.line(&format!("super::{consumer_trait}::dispose(self);"));
    w.close();
    w.close();
}

fn event_args_type(event: &MemberDescriptor) -> String {
    let types: Vec<String> = event.parameters.iter().map(|p| p.type_name.clone()).collect();
    super::tuple_type(&types)
}
