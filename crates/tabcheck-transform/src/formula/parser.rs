//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := NUMBER | IDENT | '(' expr ')'
//! ```

use super::lexer::{Spanned, Token};
use super::{FormulaError, MAX_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Column(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

pub(crate) fn parse(tokens: &[Spanned]) -> Result<Expr, FormulaError> {
    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let (expr, _) = parser.expr()?;
    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some((token, position)) => Err(FormulaError::UnexpectedToken {
            found: token.describe(),
            position: *position,
        }),
    }
}

/// A parsed sub-expression and the depth of its tree.
type Node = (Expr, usize);

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Open parentheses and unary minus signs around the current position.
    nesting: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Result<&Spanned, FormulaError> {
        let spanned = self
            .tokens
            .get(self.pos)
            .ok_or(FormulaError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    /// Position of the next token, or the end of the last one.
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |(_, position)| *position)
    }

    fn node(&self, expr: Expr, depth: usize) -> Result<Node, FormulaError> {
        if depth > MAX_DEPTH {
            return Err(FormulaError::TooDeep {
                position: self.position(),
            });
        }
        Ok((expr, depth))
    }

    fn binary(&self, op: BinaryOp, lhs: Node, rhs: Node) -> Result<Node, FormulaError> {
        let depth = lhs.1.max(rhs.1) + 1;
        let expr = Expr::Binary {
            op,
            lhs: Box::new(lhs.0),
            rhs: Box::new(rhs.0),
        };
        self.node(expr, depth)
    }

    fn expr(&mut self) -> Result<Node, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn term(&mut self) -> Result<Node, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn unary(&mut self) -> Result<Node, FormulaError> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(FormulaError::TooDeep {
                position: self.position(),
            });
        }
        let parsed = if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            self.unary()
                .and_then(|(inner, depth)| self.node(Expr::Neg(Box::new(inner)), depth + 1))
        } else {
            self.primary()
        };
        self.nesting -= 1;
        parsed
    }

    fn primary(&mut self) -> Result<Node, FormulaError> {
        let (token, position) = self.next()?.clone();
        match token {
            Token::Number(value) => Ok((Expr::Number(value), 1)),
            Token::Ident(name) => Ok((Expr::Column(name), 1)),
            Token::LParen => {
                let inner = self.expr()?;
                match self.next()? {
                    (Token::RParen, _) => Ok(inner),
                    (other, position) => Err(FormulaError::UnexpectedToken {
                        found: other.describe(),
                        position: *position,
                    }),
                }
            }
            other => Err(FormulaError::UnexpectedToken {
                found: other.describe(),
                position,
            }),
        }
    }
}
