//! Recursive-descent parser for leap-year formulas.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or       := and ( "||" and )*
//! and      := compare ( "&&" compare )*
//! compare  := modulo ( ( "==" | "!=" ) modulo )?
//! modulo   := primary ( "%" INTEGER )*
//! primary  := INTEGER | "year" | "true" | "false" | "(" or ")"
//! ```
//!
//! Operand types are checked while parsing, so a parsed formula always
//! evaluates without failing.

use super::lexer::{Token, TokenKind};
use super::{FormulaError, FormulaErrorKind, FormulaResult};

/// Integer-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntExpr {
    Year,
    Literal(i64),
    /// Euclidean remainder by a positive literal.
    Modulo(Box<IntExpr>, i64),
}

impl IntExpr {
    pub(crate) fn evaluate(&self, year: i64) -> i64 {
        match self {
            Self::Year => year,
            Self::Literal(value) => *value,
            Self::Modulo(inner, modulus) => inner.evaluate(year).rem_euclid(*modulus),
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
}

impl CompareOp {
    fn apply<T: PartialEq>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
        }
    }
}

/// Boolean-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Literal(bool),
    CompareInt {
        op: CompareOp,
        left: IntExpr,
        right: IntExpr,
    },
    CompareBool {
        op: CompareOp,
        left: Box<BoolExpr>,
        right: Box<BoolExpr>,
    },
    And(Box<BoolExpr>, Box<BoolExpr>),
    Or(Box<BoolExpr>, Box<BoolExpr>),
}

impl BoolExpr {
    pub(crate) fn evaluate(&self, year: i64) -> bool {
        match self {
            Self::Literal(value) => *value,
            Self::CompareInt { op, left, right } => {
                op.apply(&left.evaluate(year), &right.evaluate(year))
            }
            Self::CompareBool { op, left, right } => {
                op.apply(&left.evaluate(year), &right.evaluate(year))
            }
            Self::And(left, right) => left.evaluate(year) && right.evaluate(year),
            Self::Or(left, right) => left.evaluate(year) || right.evaluate(year),
        }
    }
}

/// A parsed operand of either type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Int(IntExpr),
    Bool(BoolExpr),
}

impl Operand {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
        }
    }
}

/// ## Summary
/// Parses a token stream into a boolean expression.
///
/// ## Errors
/// Returns an error on syntax errors, on operands of the wrong type, on a
/// `%` whose right side is not a positive integer literal, and when the
/// whole formula is not boolean.
pub fn parse(tokens: &[Token], source_len: usize) -> FormulaResult<BoolExpr> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        end_column: source_len + 1,
    };

    if tokens.is_empty() {
        return Err(FormulaError::new(FormulaErrorKind::Empty, 1));
    }

    let operand = parser.parse_or()?;
    if let Some(token) = parser.peek() {
        return Err(FormulaError::new(
            FormulaErrorKind::UnexpectedToken(token.kind.to_string()),
            token.column,
        ));
    }

    match operand {
        Operand::Bool(expr) => Ok(expr),
        Operand::Int(_) => Err(FormulaError::new(
            FormulaErrorKind::NotBoolean,
            tokens[0].column,
        )),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end_column: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().is_some_and(|token| token.kind == kind) {
            return self.advance();
        }
        None
    }

    fn expect_bool(operand: Operand, column: usize) -> FormulaResult<BoolExpr> {
        match operand {
            Operand::Bool(expr) => Ok(expr),
            Operand::Int(_) => Err(FormulaError::new(
                FormulaErrorKind::TypeMismatch {
                    expected: "boolean",
                    found: "integer",
                },
                column,
            )),
        }
    }

    fn parse_or(&mut self) -> FormulaResult<Operand> {
        let mut left = self.parse_and()?;
        while let Some(op) = self.eat(TokenKind::OrOr) {
            let right = self.parse_and()?;
            let lhs = Self::expect_bool(left, op.column)?;
            let rhs = Self::expect_bool(right, op.column)?;
            left = Operand::Bool(BoolExpr::Or(Box::new(lhs), Box::new(rhs)));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> FormulaResult<Operand> {
        let mut left = self.parse_compare()?;
        while let Some(op) = self.eat(TokenKind::AndAnd) {
            let right = self.parse_compare()?;
            let lhs = Self::expect_bool(left, op.column)?;
            let rhs = Self::expect_bool(right, op.column)?;
            left = Operand::Bool(BoolExpr::And(Box::new(lhs), Box::new(rhs)));
        }
        Ok(left)
    }

    fn parse_compare(&mut self) -> FormulaResult<Operand> {
        let left = self.parse_modulo()?;
        let Some(token) = self.peek() else {
            return Ok(left);
        };
        let op = match token.kind {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::Ne,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.parse_modulo()?;

        match (left, right) {
            (Operand::Int(left), Operand::Int(right)) => {
                Ok(Operand::Bool(BoolExpr::CompareInt { op, left, right }))
            }
            (Operand::Bool(left), Operand::Bool(right)) => Ok(Operand::Bool(BoolExpr::CompareBool {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })),
            (left, right) => Err(FormulaError::new(
                FormulaErrorKind::TypeMismatch {
                    expected: left.type_name(),
                    found: right.type_name(),
                },
                token.column,
            )),
        }
    }

    fn parse_modulo(&mut self) -> FormulaResult<Operand> {
        let mut left = self.parse_primary()?;
        while let Some(op) = self.eat(TokenKind::Percent) {
            let Operand::Int(dividend) = left else {
                return Err(FormulaError::new(
                    FormulaErrorKind::TypeMismatch {
                        expected: "integer",
                        found: "boolean",
                    },
                    op.column,
                ));
            };
            let modulus = match self.advance() {
                Some(Token {
                    kind: TokenKind::Integer(value),
                    ..
                }) if value > 0 => value,
                Some(token) => {
                    return Err(FormulaError::new(
                        FormulaErrorKind::InvalidModulus,
                        token.column,
                    ));
                }
                None => {
                    return Err(FormulaError::new(
                        FormulaErrorKind::UnexpectedEnd,
                        self.end_column,
                    ));
                }
            };
            left = Operand::Int(IntExpr::Modulo(Box::new(dividend), modulus));
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<Operand> {
        let Some(token) = self.advance() else {
            return Err(FormulaError::new(
                FormulaErrorKind::UnexpectedEnd,
                self.end_column,
            ));
        };

        match token.kind {
            TokenKind::Year => Ok(Operand::Int(IntExpr::Year)),
            TokenKind::Integer(value) => Ok(Operand::Int(IntExpr::Literal(value))),
            TokenKind::Boolean(value) => Ok(Operand::Bool(BoolExpr::Literal(value))),
            TokenKind::LParen => {
                let inner = self.parse_or()?;
                if self.eat(TokenKind::RParen).is_none() {
                    let column = self.peek().map_or(self.end_column, |next| next.column);
                    return Err(FormulaError::new(
                        FormulaErrorKind::UnclosedParenthesis,
                        column,
                    ));
                }
                Ok(inner)
            }
            other => Err(FormulaError::new(
                FormulaErrorKind::UnexpectedToken(other.to_string()),
                token.column,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse_source(source: &str) -> FormulaResult<BoolExpr> {
        let tokens = tokenize(source)?;
        parse(&tokens, source.chars().count())
    }

    #[test]
    fn test_precedence_and_binds_tighter_than_or() {
        let expr = parse_source("true || false && false").unwrap();
        assert!(matches!(expr, BoolExpr::Or(_, _)));
        assert!(expr.evaluate(0));
    }

    #[test]
    fn test_nested_parentheses() {
        let expr = parse_source("((year % 4) == 0)").unwrap();
        assert!(expr.evaluate(2024));
        assert!(!expr.evaluate(2023));
    }

    #[test]
    fn test_chained_modulo() {
        let expr = parse_source("year % 100 % 4 == 0").unwrap();
        assert!(expr.evaluate(1904));
        assert!(!expr.evaluate(1910));
    }

    #[test]
    fn test_boolean_comparison() {
        let expr = parse_source("(year % 2 == 0) != true").unwrap();
        assert!(expr.evaluate(3));
        assert!(!expr.evaluate(4));
    }

    #[test]
    fn test_integer_formula_is_rejected() {
        let err = parse_source("year % 4").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::NotBoolean);
    }

    #[test]
    fn test_and_on_integer_is_rejected() {
        let err = parse_source("year && true").unwrap_err();
        assert!(matches!(err.kind, FormulaErrorKind::TypeMismatch { .. }));
        assert_eq!(err.column, 6);
    }

    #[test]
    fn test_mixed_comparison_is_rejected() {
        let err = parse_source("year == true").unwrap_err();
        assert!(matches!(err.kind, FormulaErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_zero_modulus_is_rejected() {
        let err = parse_source("year % 0 == 0").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::InvalidModulus);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_variable_modulus_is_rejected() {
        let err = parse_source("year % year == 0").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::InvalidModulus);
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse_source("(year % 4 == 0").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::UnclosedParenthesis);
        assert_eq!(err.column, 15);
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_source("true false").unwrap_err();
        assert!(matches!(err.kind, FormulaErrorKind::UnexpectedToken(_)));
        assert_eq!(err.column, 6);
    }

    #[test]
    fn test_chained_comparison_is_rejected() {
        assert!(parse_source("true == true == true").is_err());
    }

    #[test]
    fn test_dangling_operator() {
        let err = parse_source("year % 4 ==").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_empty_formula() {
        let err = parse_source("   ").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::Empty);
    }

    #[test]
    fn test_negative_years_use_euclidean_remainder() {
        let expr = parse_source("year % 4 == 0").unwrap();
        assert!(expr.evaluate(-4));
        assert!(!expr.evaluate(-1));
    }
}
