//! Adapter class templates.
//!
//! Every arity gets four classes: a function adapter with a generic return,
//! its `void` partial specialization, and the same pair for methods. The
//! value and void adapters are separate templates because they declare
//! different members: the void form has no `R` type parameter, no store-back
//! into parameter 0 and no return from `Dispatch`.

use crate::adapter::{AdapterKind, AdapterVariant};
use crate::arity::{Arity, ReturnSlot, Signature};
use crate::context::EmitContext;
use crate::traits::{emit_banner, FileKind, UnitEmitter};

/// Base class every generated adapter derives from.
const BASE_CLASS: &str = "CRegFunctionBase";

/// Emits `registrationclasses.h`.
#[derive(Debug, Clone, Default)]
pub struct ClassEmitter;

impl UnitEmitter for ClassEmitter {
    fn file_kind(&self) -> FileKind {
        FileKind::Classes
    }

    fn units_per_arity(&self) -> usize {
        AdapterVariant::ALL.len()
    }

    fn emit_header(&self, ctx: &mut EmitContext) {
        emit_banner("Generated classes for function registration", ctx);
        ctx.blank();
    }

    fn emit_arity(&self, arity: Arity, ctx: &mut EmitContext) {
        ctx.blank();
        ctx.line("// -------------------");
        ctx.line(format!("// Parameter count: {}", arity));
        ctx.line("// -------------------");
        ctx.blank();

        for variant in AdapterVariant::ALL {
            emit_adapter(variant, arity, ctx);
        }
    }
}

/// Render a single adapter class.
pub fn adapter_class(variant: AdapterVariant, arity: Arity) -> String {
    let mut ctx = EmitContext::default();
    emit_adapter(variant, arity, &mut ctx);
    ctx.finish()
}

fn emit_adapter(variant: AdapterVariant, arity: Arity, ctx: &mut EmitContext) {
    let sig = variant.signature(arity);
    match variant.returns {
        ReturnSlot::Value => emit_value_adapter(variant.kind, &sig, ctx),
        ReturnSlot::Void => emit_void_adapter(variant.kind, &sig, ctx),
    }
}

/// Primary template: the wrapped callable returns `R`, which is marshaled
/// into parameter 0 and handed back from `Dispatch`.
fn emit_value_adapter(kind: AdapterKind, sig: &Signature, ctx: &mut EmitContext) {
    let class = kind.class_name(sig.arity());

    ctx.line(sig.template_params(kind.owner()));
    ctx.line(format!("class {} : public {} {{", class, BASE_CLASS));
    emit_preamble(kind, sig, ctx);

    ctx.push_indent();
    ctx.line("// -- dispatch method");
    ctx.line(format!("R Dispatch({}) {{", dispatch_params(kind, sig)));
    ctx.push_indent();
    emit_receiver_cast(kind, ctx);
    ctx.line(format!("R r = {};", pointer_call(kind, sig)));
    ctx.line("assert(GetContext()->GetParameter(0));");
    ctx.line("CVariableEntry* returnval = GetContext()->GetParameter(0);");
    ctx.line("returnval->SetValueAddr(NULL, convert_to_void_ptr<R>::Convert(r));");
    ctx.line("return (r);");
    ctx.pop_indent();
    ctx.line("}");
    ctx.blank();

    ctx.line("// -- registration method");
    ctx.line("virtual void Register() {");
    ctx.push_indent();
    emit_entry_creation(kind, ctx);
    ctx.line(r#"GetContext()->AddParameter("__return", Hash("__return"), GetRegisteredType(GetTypeID<R>()));"#);
    emit_parameter_slots(sig, ctx);
    emit_table_insert(kind, ctx);
    ctx.pop_indent();
    ctx.line("}");
    ctx.pop_indent();

    emit_private(kind, ctx);
}

/// `void` partial specialization: the return slot is registered with the
/// void marker and nothing is stored back or returned.
fn emit_void_adapter(kind: AdapterKind, sig: &Signature, ctx: &mut EmitContext) {
    let class = kind.class_name(sig.arity());

    ctx.line(sig.template_params(kind.owner()));
    ctx.line(format!(
        "class {}<{}> : public {} {{",
        class,
        sig.specialization_args(kind.owner()),
        BASE_CLASS
    ));
    emit_preamble(kind, sig, ctx);

    ctx.push_indent();
    ctx.line("// -- dispatch method");
    ctx.line(format!("void Dispatch({}) {{", dispatch_params(kind, sig)));
    ctx.push_indent();
    emit_receiver_cast(kind, ctx);
    ctx.line(format!("{};", pointer_call(kind, sig)));
    ctx.pop_indent();
    ctx.line("}");
    ctx.blank();

    ctx.line("// -- registration method");
    ctx.line("virtual void Register() {");
    ctx.push_indent();
    emit_entry_creation(kind, ctx);
    ctx.line(r#"GetContext()->AddParameter("__return", Hash("__return"), TYPE_void);"#);
    emit_parameter_slots(sig, ctx);
    emit_table_insert(kind, ctx);
    ctx.pop_indent();
    ctx.line("}");
    ctx.pop_indent();

    emit_private(kind, ctx);
}

/// Members both templates declare identically: pointer typedef, constructor,
/// destructor and the `DispatchFunction` wrapper.
fn emit_preamble(kind: AdapterKind, sig: &Signature, ctx: &mut EmitContext) {
    let arity = sig.arity();
    let class = kind.class_name(arity);

    ctx.line("public:");
    ctx.blank();
    ctx.push_indent();

    let mut pointer_params: Vec<String> =
        kind.pointer_receiver().map(str::to_string).into_iter().collect();
    pointer_params.extend(sig.typed_params());
    ctx.line(format!(
        "typedef {} (*{})({});",
        sig.returns.type_name(),
        kind.pointer_typedef(),
        pointer_params.join(", ")
    ));
    ctx.blank();

    ctx.line(format!("// -- CRegister{}{}", kind.label(), arity.suffix()));
    ctx.line(format!(
        "{}(const char* _funcname, {} _funcptr) :",
        class,
        kind.pointer_typedef()
    ));
    ctx.raw(format!(
        "{}{}(_funcname) {{\n",
        " ".repeat(kind.ctor_continuation()),
        BASE_CLASS
    ));
    ctx.push_indent();
    ctx.line("funcptr = _funcptr;");
    ctx.pop_indent();
    ctx.line("}");
    ctx.blank();

    ctx.line("// -- destructor");
    ctx.line(format!("virtual ~{}() {{", class));
    ctx.line("}");
    ctx.blank();

    ctx.line("// -- virtual DispatchFunction wrapper");
    ctx.line("virtual void DispatchFunction(void* objaddr) {");
    ctx.push_indent();
    for param in sig.params.iter() {
        ctx.line(format!(
            "CVariableEntry* {} = GetContext()->GetParameter({});",
            param.entry(),
            param.index()
        ));
    }
    let mut args: Vec<String> = Vec::with_capacity(sig.params.len() + 1);
    if kind.owner().is_some() {
        args.push("objaddr".to_string());
    }
    args.extend(sig.params.iter().map(|p| {
        format!(
            "convert_from_void_ptr<{}>::Convert({}->GetValueAddr(NULL))",
            p.symbol(),
            p.entry()
        )
    }));
    // Continuation lines line up under the first argument.
    let separator = format!(",\n{}", " ".repeat(ctx.indent().len() + "Dispatch(".len()));
    ctx.line(format!("Dispatch({});", args.join(&separator)));
    ctx.pop_indent();
    ctx.line("}");
    ctx.blank();

    ctx.pop_indent();
}

fn dispatch_params(kind: AdapterKind, sig: &Signature) -> String {
    let mut params: Vec<String> =
        kind.dispatch_receiver().map(str::to_string).into_iter().collect();
    params.extend(sig.typed_params());
    params.join(", ")
}

fn emit_receiver_cast(kind: AdapterKind, ctx: &mut EmitContext) {
    if let Some(owner) = kind.owner() {
        ctx.line(format!("{owner}* objptr = ({owner}*)objaddr;"));
    }
}

fn pointer_call(kind: AdapterKind, sig: &Signature) -> String {
    let mut args: Vec<String> = Vec::with_capacity(sig.params.len() + 1);
    if kind.owner().is_some() {
        args.push("objptr".to_string());
    }
    args.extend(sig.call_args());
    format!("funcptr({})", args.join(", "))
}

fn emit_entry_creation(kind: AdapterKind, ctx: &mut EmitContext) {
    ctx.line(format!(
        "CFunctionEntry* fe = new CFunctionEntry({}, GetName(), Hash(GetName()), eFuncTypeGlobal, this);",
        kind.namespace_hash()
    ));
    ctx.line("SetContext(fe->GetContext());");
}

fn emit_parameter_slots(sig: &Signature, ctx: &mut EmitContext) {
    for param in sig.params.iter() {
        ctx.line(format!(
            "GetContext()->AddParameter(\"{slot}\", Hash(\"{slot}\"), GetRegisteredType(GetTypeID<{ty}>()));",
            slot = param.slot(),
            ty = param.symbol()
        ));
    }
    ctx.blank();
}

fn emit_table_insert(kind: AdapterKind, ctx: &mut EmitContext) {
    ctx.line("unsigned int hash = fe->GetHash();");
    ctx.line(format!("tFuncTable* {} = {};", kind.table_var(), kind.table_lookup()));
    ctx.line(format!("{}->AddItem(*fe, hash);", kind.table_var()));
}

fn emit_private(kind: AdapterKind, ctx: &mut EmitContext) {
    ctx.blank();
    ctx.line("private:");
    ctx.push_indent();
    ctx.line(format!("{} funcptr;", kind.pointer_typedef()));
    ctx.pop_indent();
    ctx.line("};");
    ctx.blank();
}
