use super::ExprError;
use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{Spanned, Token};

/// Bindkracht van prefix-operatoren; hoger dan `^`, dus `-x^2` is `(-x)^2`.
const PREFIX_BP: u8 = 100;

// Pratt parser
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Spanned> {
        let spanned = self.peek();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn parse(&mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let expr = self.parse_bp(0)?;
        match self.peek() {
            None => Ok(expr),
            Some(Spanned {
                token: Token::RParen,
                position,
            }) => Err(ExprError::UnbalancedParenthesis { position }),
            Some(other) => Err(unexpected(other)),
        }
    }

    // binding powers: (left_bp, right_bp)
    fn infix_binding_power(token: Token) -> Option<(BinaryOp, u8, u8)> {
        match token {
            Token::Caret => Some((BinaryOp::Pow, 70, 69)), // right-assoc
            Token::Star => Some((BinaryOp::Mul, 60, 61)),
            Token::Slash => Some((BinaryOp::Div, 60, 61)),
            Token::Plus => Some((BinaryOp::Add, 50, 51)),
            Token::Minus => Some((BinaryOp::Sub, 50, 51)),
            _ => None,
        }
    }

    fn parse_bp(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let Some(spanned) = self.bump() else {
            return Err(ExprError::UnexpectedEnd);
        };

        let mut lhs = match spanned.token {
            Token::Number(number) => Expr::Constant(number),
            Token::Constant(constant) => Expr::Constant(constant.value()),
            Token::Variable => Expr::Variable,
            Token::Function(function) => {
                let argument = self.parse_argument()?;
                Expr::Call(function, Box::new(argument))
            }
            Token::LParen => self.parse_group(spanned.position)?,
            Token::Minus => {
                let rhs = self.parse_bp(PREFIX_BP)?;
                Expr::Unary(UnaryOp::Neg, Box::new(rhs))
            }
            Token::Plus => {
                let rhs = self.parse_bp(PREFIX_BP)?;
                Expr::Unary(UnaryOp::Plus, Box::new(rhs))
            }
            Token::RParen => {
                return Err(ExprError::UnbalancedParenthesis {
                    position: spanned.position,
                });
            }
            Token::Star | Token::Slash | Token::Caret => return Err(unexpected(spanned)),
        };

        while let Some(next) = self.peek() {
            let Some((op, l_bp, r_bp)) = Self::infix_binding_power(next.token) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.bump();
            let rhs = self.parse_bp(r_bp)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok(lhs)
    }

    /// Argument van een functie: een groep tussen haakjes of de kale variabele.
    fn parse_argument(&mut self) -> Result<Expr, ExprError> {
        match self.bump() {
            Some(Spanned {
                token: Token::LParen,
                position,
            }) => self.parse_group(position),
            Some(Spanned {
                token: Token::Variable,
                ..
            }) => Ok(Expr::Variable),
            Some(other) => Err(unexpected(other)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    /// Parseert tot en met de sluitende `)` van een groep die op `open` begon.
    fn parse_group(&mut self, open: usize) -> Result<Expr, ExprError> {
        let inner = self.parse_bp(0)?;
        match self.bump() {
            Some(Spanned {
                token: Token::RParen,
                ..
            }) => Ok(inner),
            Some(other) => Err(unexpected(other)),
            None => Err(ExprError::UnbalancedParenthesis { position: open }),
        }
    }
}

fn unexpected(spanned: Spanned) -> ExprError {
    ExprError::UnexpectedToken {
        found: spanned.token.to_string(),
        position: spanned.position,
    }
}

/// Bouwt een expressieboom uit tokens.
pub(crate) fn parse(tokens: Vec<Spanned>) -> Result<Expr, ExprError> {
    Parser::new(tokens).parse()
}
