//! Tokenizer voor formules.
//!
//! Namen worden van links naar rechts herkend met de langste naam eerst, zodat
//! `arcsin` nooit als `arc` + `sin` gelezen wordt.

use std::fmt;

use super::ExprError;
use super::ast::{Constant, Function};
use crate::orientation::Orientation;

/// Herkende namen, langste eerst.
const NAMES: [(&str, Name); 9] = [
    ("arcsin", Name::Function(Function::Arcsin)),
    ("arccos", Name::Function(Function::Arccos)),
    ("arctan", Name::Function(Function::Arctan)),
    ("sqrt", Name::Function(Function::Sqrt)),
    ("sin", Name::Function(Function::Sin)),
    ("cos", Name::Function(Function::Cos)),
    ("tan", Name::Function(Function::Tan)),
    ("log", Name::Function(Function::Log)),
    ("pi", Name::Constant(Constant::Pi)),
];

/// Losse tekens die altijd toegestaan zijn.
const ALLOWED_CHARS: &str = "0123456789.()^/-*+ e";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Name {
    Function(Function),
    Constant(Constant),
}

/// Zoekt een herkende naam aan het begin van `rest`.
pub(crate) fn match_name(rest: &str) -> Option<(&'static str, Name)> {
    NAMES
        .iter()
        .find(|(text, _)| rest.starts_with(text))
        .copied()
}

/// Geeft het eerste niet-toegestane teken terug, met zijn byte-positie.
pub(crate) fn find_invalid_character(source: &str, orientation: Orientation) -> Option<(usize, char)> {
    let mut position = 0;
    while position < source.len() {
        let rest = &source[position..];
        if let Some((text, _)) = match_name(rest) {
            position += text.len();
            continue;
        }
        let ch = rest.chars().next()?;
        if !ALLOWED_CHARS.contains(ch) && ch != orientation.variable() {
            return Some((position, ch));
        }
        position += ch.len_utf8();
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Variable,
    Constant(Constant),
    Function(Function),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Variable => write!(f, "variabele"),
            Self::Constant(constant) => write!(f, "{}", constant.name()),
            Self::Function(function) => write!(f, "{}", function.name()),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// Een token met de byte-positie waar het begint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

pub(crate) fn tokenize(source: &str, orientation: Orientation) -> Result<Vec<Spanned>, ExprError> {
    let variable = orientation.variable();
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < source.len() {
        let rest = &source[position..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        if ch.is_whitespace() {
            position += ch.len_utf8();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let length = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            let text = &rest[..length];
            let number = text.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                text: text.to_owned(),
                position,
            })?;
            tokens.push(Spanned {
                token: Token::Number(number),
                position,
            });
            position += length;
            continue;
        }

        if let Some((text, name)) = match_name(rest) {
            let token = match name {
                Name::Function(function) => Token::Function(function),
                Name::Constant(constant) => Token::Constant(constant),
            };
            tokens.push(Spanned { token, position });
            position += text.len();
            continue;
        }

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            'e' => Token::Constant(Constant::E),
            c if c == variable => Token::Variable,
            other => return Err(ExprError::InvalidCharacter { ch: other, position }),
        };
        tokens.push(Spanned { token, position });
        position += ch.len_utf8();
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source, Orientation::X)
            .expect("tokenize")
            .into_iter()
            .map(|spanned| spanned.token)
            .collect()
    }

    #[test]
    fn inverse_trig_is_one_token() {
        assert_eq!(
            kinds("arcsin(x)"),
            vec![
                Token::Function(Function::Arcsin),
                Token::LParen,
                Token::Variable,
                Token::RParen
            ]
        );
    }

    #[test]
    fn reads_decimal_numbers_and_constants() {
        assert_eq!(
            kinds("2.5*pi-e"),
            vec![
                Token::Number(2.5),
                Token::Star,
                Token::Constant(Constant::Pi),
                Token::Minus,
                Token::Constant(Constant::E),
            ]
        );
        assert_eq!(kinds(".5"), vec![Token::Number(0.5)]);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let error = tokenize("1.2.3", Orientation::X).unwrap_err();
        assert!(matches!(error, ExprError::InvalidNumber { position: 0, .. }));
    }

    #[test]
    fn variable_letter_follows_orientation() {
        assert!(tokenize("y+1", Orientation::X).is_err());
        assert_eq!(
            tokenize("y+1", Orientation::Y).expect("tokenize").len(),
            3
        );
    }

    #[test]
    fn invalid_character_scan_skips_known_names() {
        assert_eq!(find_invalid_character("arccos(x)+sqrt(x)", Orientation::X), None);
        assert_eq!(find_invalid_character("x^2 + abs(x)", Orientation::X), Some((6, 'a')));
        assert_eq!(find_invalid_character("sin(y)", Orientation::X), Some((4, 'y')));
    }
}
