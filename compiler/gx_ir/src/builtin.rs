//! Builtin function identification enum.
//!
//! Every function value in the language is one of these primitives, possibly
//! partially applied. The evaluator owns the bodies; this crate only knows
//! names and arities so that the arena, the parser and the environment can
//! agree on what a function *is* without depending on the evaluator.

/// The closed set of primitive functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Builtin {
    // Arithmetic and comparison
    Inc,
    Dec,
    Add,
    Mul,
    Div,
    Eq,
    Lt,
    Neg,

    // Booleans
    /// `t a b = a`
    True,
    /// `f a b = b`
    False,

    // Combinators
    S,
    C,
    B,
    I,

    // Lists
    Cons,
    Car,
    Cdr,
    Nil,
    IsNil,
    /// Two-argument function answering `f`; `isnil` applies its operand to it.
    /// Not bound to any name.
    IsNilProbe,

    // Pictures and protocol
    Draw,
    Checkerboard,
    MultipleDraw,
    Send,
    If0,
    Interact,
    F38,
    Modem,
}

impl Builtin {
    /// All builtins, in registration order.
    pub const ALL: [Builtin; 28] = [
        Builtin::Inc,
        Builtin::Dec,
        Builtin::Add,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Eq,
        Builtin::Lt,
        Builtin::Neg,
        Builtin::True,
        Builtin::False,
        Builtin::S,
        Builtin::C,
        Builtin::B,
        Builtin::I,
        Builtin::Cons,
        Builtin::Car,
        Builtin::Cdr,
        Builtin::Nil,
        Builtin::IsNil,
        Builtin::IsNilProbe,
        Builtin::Draw,
        Builtin::Checkerboard,
        Builtin::MultipleDraw,
        Builtin::Send,
        Builtin::If0,
        Builtin::Interact,
        Builtin::F38,
        Builtin::Modem,
    ];

    /// Position in [`Builtin::ALL`].
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Name the builtin is bound under in the standard environment.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Neg => "neg",
            Self::True => "t",
            Self::False => "f",
            Self::S => "s",
            Self::C => "c",
            Self::B => "b",
            Self::I => "i",
            Self::Cons => "cons",
            Self::Car => "car",
            Self::Cdr => "cdr",
            Self::Nil => "nil",
            Self::IsNil => "isnil",
            Self::IsNilProbe => "<isnil-probe>",
            Self::Draw => "draw",
            Self::Checkerboard => "checkerboard",
            Self::MultipleDraw => "multipledraw",
            Self::Send => "send",
            Self::If0 => "if0",
            Self::Interact => "interact",
            Self::F38 => "f38",
            Self::Modem => "modem",
        }
    }

    /// Number of arguments after which the body runs.
    pub const fn arity(self) -> usize {
        match self {
            Self::Inc
            | Self::Dec
            | Self::Neg
            | Self::I
            | Self::Car
            | Self::Cdr
            | Self::Nil
            | Self::IsNil
            | Self::Draw
            | Self::Checkerboard
            | Self::MultipleDraw
            | Self::Send
            | Self::If0
            | Self::Modem => 1,
            Self::Add
            | Self::Mul
            | Self::Div
            | Self::Eq
            | Self::Lt
            | Self::True
            | Self::False
            | Self::IsNilProbe
            | Self::F38 => 2,
            Self::S | Self::C | Self::B | Self::Cons | Self::Interact => 3,
        }
    }

    /// Whether the standard environment binds this builtin by name.
    pub const fn is_public(self) -> bool {
        !matches!(self, Self::IsNilProbe)
    }

    /// Resolve a public builtin from its bound name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.is_public() && b.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back() {
        for builtin in Builtin::ALL.into_iter().filter(|b| b.is_public()) {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
    }

    #[test]
    fn probe_is_not_nameable() {
        assert_eq!(Builtin::from_name(Builtin::IsNilProbe.name()), None);
    }

    #[test]
    fn index_matches_registration_order() {
        for (i, builtin) in Builtin::ALL.into_iter().enumerate() {
            assert_eq!(builtin.index() as usize, i);
        }
    }

    #[test]
    fn curried_arities() {
        assert_eq!(Builtin::Cons.arity(), 3);
        assert_eq!(Builtin::True.arity(), 2);
        assert_eq!(Builtin::Nil.arity(), 1);
        assert_eq!(Builtin::F38.arity(), 2);
    }
}
