//! Leap-year formula language.
//!
//! A formula is a boolean expression over the single variable `year`, built
//! from `%`, `==`, `!=`, `&&`, `||`, parentheses and `true`/`false`.
//! Formulas are parsed and type-checked once, when a chronology is
//! registered; evaluation afterwards cannot fail.

mod lexer;
mod parser;

use std::fmt;

pub use parser::{BoolExpr, CompareOp, IntExpr};

/// Result type for formula compilation.
pub type FormulaResult<T> = Result<T, FormulaError>;

/// An error found while compiling a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaError {
    /// The kind of error.
    pub kind: FormulaErrorKind,
    /// Column where the error was detected (1-based).
    pub column: usize,
}

impl FormulaError {
    /// Creates a new formula error.
    #[must_use]
    pub fn new(kind: FormulaErrorKind, column: usize) -> Self {
        Self { kind, column }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: {}", self.column, self.kind)
    }
}

impl std::error::Error for FormulaError {}

/// The kind of formula error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaErrorKind {
    /// Formula contains no tokens.
    Empty,
    /// Character outside the language.
    UnexpectedCharacter(char),
    /// Identifier other than `year`, `true` or `false`.
    UnknownIdentifier(String),
    /// Integer literal does not fit in 64 bits.
    IntegerOverflow,
    /// Token in a position the grammar does not allow.
    UnexpectedToken(String),
    /// Input ended in the middle of an expression.
    UnexpectedEnd,
    /// `(` without matching `)`.
    UnclosedParenthesis,
    /// Right side of `%` is not a positive integer literal.
    InvalidModulus,
    /// Operand has the wrong type for its operator.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The formula evaluates to an integer.
    NotBoolean,
}

impl fmt::Display for FormulaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty formula"),
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            Self::UnknownIdentifier(name) => write!(f, "unknown identifier '{name}'"),
            Self::IntegerOverflow => write!(f, "integer literal out of range"),
            Self::UnexpectedToken(token) => write!(f, "unexpected {token}"),
            Self::UnexpectedEnd => write!(f, "unexpected end of formula"),
            Self::UnclosedParenthesis => write!(f, "unclosed parenthesis"),
            Self::InvalidModulus => write!(f, "modulus must be a positive integer literal"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::NotBoolean => write!(f, "formula must evaluate to a boolean"),
        }
    }
}

/// A compiled leap-year rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapYearRule {
    source: String,
    expr: BoolExpr,
}

impl LeapYearRule {
    /// ## Summary
    /// Tokenizes, parses and type-checks a leap-year formula.
    ///
    /// ## Errors
    /// Returns a `FormulaError` locating the first problem in `source`.
    pub fn compile(source: &str) -> FormulaResult<Self> {
        let tokens = lexer::tokenize(source)?;
        let expr = parser::parse(&tokens, source.chars().count())?;
        tracing::trace!(formula = %source, "Compiled leap-year formula");
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluates the rule for `year`.
    #[must_use]
    pub fn is_leap_year(&self, year: i32) -> bool {
        self.expr.evaluate(i64::from(year))
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn expr(&self) -> &BoolExpr {
        &self.expr
    }
}

impl fmt::Display for LeapYearRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
