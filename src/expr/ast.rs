//! Expressieboom voor formules in één variabele.

use std::f64::consts::{E, PI};
use std::fmt;

/// Ondersteunde functies. Alle goniometrie werkt in radialen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Sqrt,
    /// Natuurlijke logaritme.
    Log,
}

impl Function {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
        }
    }

    /// Past de functie toe. `NaN` en oneindig worden niet afgevangen.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
            Self::Arcsin => value.asin(),
            Self::Arccos => value.acos(),
            Self::Arctan => value.atan(),
            Self::Sqrt => value.sqrt(),
            Self::Log => value.ln(),
        }
    }
}

/// Benoemde constanten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    E,
    Pi,
}

impl Constant {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::E => "e",
            Self::Pi => "pi",
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::E => E,
            Self::Pi => PI,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// Gesloten varianttype voor een geparste formule.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    /// De onafhankelijke variabele (`x` of `y`, afhankelijk van de oriëntatie).
    Variable,
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

impl Expr {
    /// Evalueert de boom met `value` voor de variabele.
    #[must_use]
    pub fn eval(&self, value: f64) -> f64 {
        match self {
            Self::Constant(constant) => *constant,
            Self::Variable => value,
            Self::Unary(UnaryOp::Neg, operand) => -operand.eval(value),
            Self::Unary(UnaryOp::Plus, operand) => operand.eval(value),
            Self::Binary(op, lhs, rhs) => {
                let a = lhs.eval(value);
                let b = rhs.eval(value);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Pow => pow(a, b),
                }
            }
            Self::Call(function, argument) => function.apply(argument.eval(value)),
        }
    }
}

/// Machtsverheffen zoals JavaScript `**`: `(±1)^±∞` is `NaN`, waar `powf` 1 geeft.
fn pow(base: f64, exponent: f64) -> f64 {
    if base.abs() == 1.0 && exponent.is_infinite() {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

impl fmt::Display for Expr {
    /// Volledig geparenthiseerde weergave, handig bij het debuggen van voorrang.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(constant) => write!(f, "{constant}"),
            Self::Variable => write!(f, "v"),
            Self::Unary(UnaryOp::Neg, operand) => write!(f, "(-{operand})"),
            Self::Unary(UnaryOp::Plus, operand) => write!(f, "(+{operand})"),
            Self::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::Call(function, argument) => write!(f, "{}({argument})", function.name()),
        }
    }
}
