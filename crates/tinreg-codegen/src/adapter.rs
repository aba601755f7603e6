use crate::arity::{Arity, ReturnSlot, Signature};

/// Symbol for the owning type of a registered method.
pub const OWNER_SYMBOL: &str = "C";

/// Whether an adapter wraps a free function or an object method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Function,
    Method,
}

impl AdapterKind {
    pub fn label(self) -> &'static str {
        match self {
            AdapterKind::Function => "Function",
            AdapterKind::Method => "Method",
        }
    }

    /// Class name stem, completed by the arity suffix.
    pub fn stem(self) -> String {
        format!("CReg{}", self.label())
    }

    pub fn class_name(self, arity: Arity) -> String {
        format!("{}{}", self.stem(), arity.suffix())
    }

    /// Owning type symbol; only methods have one.
    pub fn owner(self) -> Option<&'static str> {
        match self {
            AdapterKind::Function => None,
            AdapterKind::Method => Some(OWNER_SYMBOL),
        }
    }

    /// Name of the wrapped pointer's typedef.
    pub fn pointer_typedef(self) -> &'static str {
        match self {
            AdapterKind::Function => "funcsignature",
            AdapterKind::Method => "methodsignature",
        }
    }

    /// Leading parameter of the wrapped pointer type, if any.
    pub fn pointer_receiver(self) -> Option<&'static str> {
        match self {
            AdapterKind::Function => None,
            AdapterKind::Method => Some("C* c"),
        }
    }

    /// Leading parameter of the typed dispatch method, if any.
    pub fn dispatch_receiver(self) -> Option<&'static str> {
        match self {
            AdapterKind::Function => None,
            AdapterKind::Method => Some("void* objaddr"),
        }
    }

    /// Continuation indent of the base-class initializer in the constructor.
    pub fn ctor_continuation(self) -> usize {
        match self {
            AdapterKind::Function => 20,
            AdapterKind::Method => 18,
        }
    }

    /// Namespace hash the function entry is keyed under.
    pub fn namespace_hash(self) -> &'static str {
        match self {
            AdapterKind::Function => "0",
            AdapterKind::Method => "Hash(C::GetClassName())",
        }
    }

    /// Local variable naming the destination table.
    pub fn table_var(self) -> &'static str {
        match self {
            AdapterKind::Function => "globalfunctable",
            AdapterKind::Method => "methodtable",
        }
    }

    /// Expression resolving the destination table: the global namespace for
    /// functions, the owning type's namespace for methods.
    pub fn table_lookup(self) -> &'static str {
        match self {
            AdapterKind::Function => "CNamespace::FindNamespace(0)->GetFuncTable()",
            AdapterKind::Method => "C::classnamespace->GetFuncTable()",
        }
    }
}

/// One of the four adapter definitions emitted per arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterVariant {
    pub kind: AdapterKind,
    pub returns: ReturnSlot,
}

impl AdapterVariant {
    /// Emission order within one arity.
    pub const ALL: [AdapterVariant; 4] = [
        AdapterVariant::new(AdapterKind::Function, ReturnSlot::Value),
        AdapterVariant::new(AdapterKind::Function, ReturnSlot::Void),
        AdapterVariant::new(AdapterKind::Method, ReturnSlot::Value),
        AdapterVariant::new(AdapterKind::Method, ReturnSlot::Void),
    ];

    pub const fn new(kind: AdapterKind, returns: ReturnSlot) -> Self {
        Self { kind, returns }
    }

    pub fn signature(self, arity: Arity) -> Signature {
        arity.signature(self.returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variant_order() {
        let order: Vec<(AdapterKind, ReturnSlot)> = AdapterVariant::ALL
            .iter()
            .map(|v| (v.kind, v.returns))
            .collect();
        assert_eq!(
            order,
            vec![
                (AdapterKind::Function, ReturnSlot::Value),
                (AdapterKind::Function, ReturnSlot::Void),
                (AdapterKind::Method, ReturnSlot::Value),
                (AdapterKind::Method, ReturnSlot::Void),
            ]
        );
    }

    #[test]
    fn test_class_names() {
        assert_eq!(AdapterKind::Function.class_name(Arity::new(0)), "CRegFunctionP0");
        assert_eq!(AdapterKind::Method.class_name(Arity::new(3)), "CRegMethodP3");
    }

    #[test]
    fn test_only_methods_have_owner() {
        assert_eq!(AdapterKind::Function.owner(), None);
        assert_eq!(AdapterKind::Method.owner(), Some("C"));
        assert!(AdapterKind::Function.dispatch_receiver().is_none());
        assert!(AdapterKind::Method.pointer_receiver().is_some());
    }
}
