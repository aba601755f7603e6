use std::fmt;

/// Number of parameters an adapter forwards to the wrapped function or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Arity(u32);

impl Arity {
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    pub const fn count(self) -> u32 {
        self.0
    }

    /// Name suffix shared by every class and macro of this arity (e.g. `P3`).
    pub fn suffix(self) -> String {
        format!("P{}", self.0)
    }

    /// Positional parameters `1..=n`, in order.
    pub fn params(self) -> impl Iterator<Item = Param> + Clone {
        (1..=self.0).map(Param)
    }

    pub fn signature(self, returns: ReturnSlot) -> Signature {
        Signature {
            returns,
            params: self.params().collect(),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every arity from 0 up to and including `max`, ascending.
pub fn arities(max: Arity) -> impl Iterator<Item = Arity> {
    (0..=max.0).map(Arity)
}

/// A 1-based positional parameter. Each accessor is one spelling of the
/// parameter as it appears somewhere in the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Param(u32);

impl Param {
    pub fn index(self) -> u32 {
        self.0
    }

    /// Template type symbol: `T1`.
    pub fn symbol(self) -> String {
        format!("T{}", self.0)
    }

    /// Name in adapter signatures: `p1`.
    pub fn name(self) -> String {
        format!("p{}", self.0)
    }

    /// Name in macro trampolines: `t1`.
    pub fn arg(self) -> String {
        format!("t{}", self.0)
    }

    /// Local holding the parameter store entry: `ve1`.
    pub fn entry(self) -> String {
        format!("ve{}", self.0)
    }

    /// Slot name registered with the function context: `_p1`.
    pub fn slot(self) -> String {
        format!("_p{}", self.0)
    }

    /// `T1 p1`
    pub fn typed(self) -> String {
        format!("{} {}", self.symbol(), self.name())
    }

    /// `T1 t1`
    pub fn typed_arg(self) -> String {
        format!("{} {}", self.symbol(), self.arg())
    }
}

/// What the wrapped callable hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnSlot {
    /// Generic return symbol `R`, marshaled into parameter 0.
    Value,
    /// No value; nothing is marshaled.
    Void,
}

impl ReturnSlot {
    pub fn type_name(self) -> &'static str {
        match self {
            ReturnSlot::Value => "R",
            ReturnSlot::Void => "void",
        }
    }
}

/// A return slot plus the ordered parameter symbols `T1..Tn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub returns: ReturnSlot,
    pub params: Vec<Param>,
}

impl Signature {
    pub fn arity(&self) -> Arity {
        Arity(self.params.len() as u32)
    }

    /// `T1, T2, ...`
    pub fn symbols(&self) -> Vec<String> {
        self.params.iter().map(|p| p.symbol()).collect()
    }

    /// `T1 p1, T2 p2, ...`
    pub fn typed_params(&self) -> Vec<String> {
        self.params.iter().map(|p| p.typed()).collect()
    }

    /// `p1, p2, ...`
    pub fn call_args(&self) -> Vec<String> {
        self.params.iter().map(|p| p.name()).collect()
    }

    /// The template parameter list, with an optional owner symbol in front.
    /// The return symbol is only a parameter when it is generic.
    pub fn template_params(&self, owner: Option<&str>) -> String {
        let mut names: Vec<String> = owner.map(str::to_string).into_iter().collect();
        if self.returns == ReturnSlot::Value {
            names.push("R".to_string());
        }
        names.extend(self.symbols());
        let decls: Vec<String> = names.iter().map(|n| format!("typename {}", n)).collect();
        format!("template<{}>", decls.join(", "))
    }

    /// Argument list of a partial specialization: `C, void, T1, ...`.
    pub fn specialization_args(&self, owner: Option<&str>) -> String {
        let mut args: Vec<String> = owner.map(str::to_string).into_iter().collect();
        args.push(self.returns.type_name().to_string());
        args.extend(self.symbols());
        args.join(", ")
    }
}
