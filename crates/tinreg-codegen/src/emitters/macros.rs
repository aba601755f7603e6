use crate::adapter::AdapterKind;
use crate::arity::{Arity, ReturnSlot};
use crate::context::EmitContext;
use crate::traits::{emit_banner, FileKind, UnitEmitter};

/// Emits `registrationmacros.h`: `REGISTER_FUNCTION_P<n>` and
/// `REGISTER_METHOD_P<n>` for every arity.
///
/// Each macro expands to a static adapter instance; registration runs when
/// that instance is constructed.
#[derive(Debug, Clone)]
pub struct MacroEmitter {
    /// Namespace the adapter classes live in. Empty means unqualified.
    namespace: String,
}

impl MacroEmitter {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    fn qualify(&self, class: &str) -> String {
        if self.namespace.is_empty() {
            class.to_string()
        } else {
            format!("{}::{}", self.namespace, class)
        }
    }

    /// `REGISTER_FUNCTION_P<n>(scriptname, funcname, R, T1..Tn)`, without a
    /// trailing newline.
    pub fn function_macro(&self, arity: Arity) -> String {
        let symbols = arity.signature(ReturnSlot::Value).specialization_args(None);
        let class = self.qualify(&AdapterKind::Function.class_name(arity));
        [
            format!(
                "#define REGISTER_FUNCTION_{}(scriptname, funcname, {}) \\",
                arity.suffix(),
                symbols
            ),
            format!(
                "    static {}<{}> _reg_##scriptname(#scriptname, funcname);",
                class, symbols
            ),
        ]
        .join("\n")
    }

    /// `REGISTER_METHOD_P<n>(classname, scriptname, methodname, R, T1..Tn)`,
    /// without a trailing newline. Expands to a static trampoline forwarding
    /// to the member, plus the adapter instance bound to it.
    pub fn method_macro(&self, arity: Arity) -> String {
        let sig = arity.signature(ReturnSlot::Value);
        let class = self.qualify(&AdapterKind::Method.class_name(arity));

        let mut receiver = vec!["classname* obj".to_string()];
        receiver.extend(arity.params().map(|p| p.typed_arg()));
        let forwarded: Vec<String> = arity.params().map(|p| p.arg()).collect();

        [
            format!(
                "#define REGISTER_METHOD_{}(classname, scriptname, methodname, {})    \\",
                arity.suffix(),
                sig.specialization_args(None)
            ),
            format!(
                "    static R classname##methodname({}) {{    \\",
                receiver.join(", ")
            ),
            format!("        return obj->methodname({});    \\", forwarded.join(", ")),
            "    }    \\".to_string(),
            format!(
                "    static {}<{}> _reg_##classname##methodname(#scriptname, classname##methodname);",
                class,
                sig.specialization_args(Some("classname"))
            ),
        ]
        .join("\n")
    }
}

impl Default for MacroEmitter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_NAMESPACE)
    }
}

impl UnitEmitter for MacroEmitter {
    fn file_kind(&self) -> FileKind {
        FileKind::Macros
    }

    fn units_per_arity(&self) -> usize {
        2
    }

    fn emit_header(&self, ctx: &mut EmitContext) {
        emit_banner("Generated macros for function registration", ctx);
    }

    fn emit_arity(&self, arity: Arity, ctx: &mut EmitContext) {
        ctx.raw(format!("\n\n// -- Parameter count: {}\n", arity));
        ctx.raw(self.function_macro(arity));
        ctx.raw("\n\n");
        ctx.raw(self.method_macro(arity));
    }

    fn emit_footer(&self, ctx: &mut EmitContext) {
        ctx.raw("\n\n");
    }
}
