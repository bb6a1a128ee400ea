//! Validatie en evaluatie van formules in één variabele.
//!
//! Een formule bevat alleen cijfers, `. ( ) ^ / - * +`, spaties, de letter van
//! de actieve oriëntatie, de constanten `e` en `pi` en de functies `sin cos tan
//! arcsin arccos arctan sqrt log`. Geldige formules worden eenmalig naar een
//! [`Expr`]-boom geparst en daarna per invoerwaarde geëvalueerd.

mod ast;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Constant, Expr, Function, UnaryOp};

use crate::orientation::Orientation;

/// Fouttype bij het valideren of parsen van een formule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("formule is leeg")]
    Empty,
    #[error("ongeldig teken `{ch}` op positie {position}")]
    InvalidCharacter { ch: char, position: usize },
    #[error("ongeldig getal `{text}` op positie {position}")]
    InvalidNumber { text: String, position: usize },
    #[error("onverwacht symbool `{found}` op positie {position}")]
    UnexpectedToken { found: String, position: usize },
    #[error("formule eindigt onverwacht")]
    UnexpectedEnd,
    #[error("haakjes zijn niet in balans (positie {position})")]
    UnbalancedParenthesis { position: usize },
}

/// Een gevalideerde en geparste formule.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    orientation: Orientation,
    expr: Expr,
}

impl Formula {
    /// Valideert en parseert `source` voor de gegeven oriëntatie.
    pub fn parse(source: &str, orientation: Orientation) -> Result<Self, ExprError> {
        if let Some((position, ch)) = lexer::find_invalid_character(source, orientation) {
            return Err(ExprError::InvalidCharacter { ch, position });
        }
        let tokens = lexer::tokenize(source, orientation)?;
        let expr = parser::parse(tokens)?;
        Ok(Self {
            source: source.to_owned(),
            orientation,
            expr,
        })
    }

    /// Evalueert de formule. `NaN` en oneindig worden ongewijzigd doorgegeven.
    #[must_use]
    pub fn eval(&self, value: f64) -> f64 {
        self.expr.eval(value)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// Controleert of `formula` alleen toegestane tekens en namen bevat.
///
/// Dit is een puur lexicale controle: `validate("x x", ..)` slaagt, maar het
/// evalueren ervan levert een parsefout op.
#[must_use]
pub fn validate(formula: &str, orientation: Orientation) -> bool {
    match lexer::find_invalid_character(formula, orientation) {
        Some((position, ch)) => {
            log::warn!("ongeldig teken `{ch}` op positie {position} in formule `{formula}`");
            false
        }
        None => true,
    }
}

/// Valideert, parseert en evalueert `formula` in één keer.
pub fn evaluate(formula: &str, orientation: Orientation, value: f64) -> Result<f64, ExprError> {
    Formula::parse(formula, orientation).map(|parsed| parsed.eval(value))
}

/// Parseert een formule voor gebruik in een bouwer.
///
/// Een ongeldige formule wordt gelogd en levert `None` op; de aanroeper tekent
/// dan niets voor deze formule.
#[must_use]
pub fn compile(formula: &str, orientation: Orientation) -> Option<Formula> {
    match Formula::parse(formula, orientation) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            log::warn!("formule `{formula}` overgeslagen: {error}");
            None
        }
    }
}
