//! Tokenizer for leap-year formulas.

use super::{FormulaError, FormulaErrorKind, FormulaResult};

/// Token kinds of the formula language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The `year` variable.
    Year,
    /// Non-negative integer literal.
    Integer(i64),
    /// `true` or `false`.
    Boolean(bool),
    Percent,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    LParen,
    RParen,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year => f.write_str("`year`"),
            Self::Integer(value) => write!(f, "integer {value}"),
            Self::Boolean(value) => write!(f, "`{value}`"),
            Self::Percent => f.write_str("`%`"),
            Self::EqEq => f.write_str("`==`"),
            Self::NotEq => f.write_str("`!=`"),
            Self::AndAnd => f.write_str("`&&`"),
            Self::OrOr => f.write_str("`||`"),
            Self::LParen => f.write_str("`(`"),
            Self::RParen => f.write_str("`)`"),
        }
    }
}

/// A token and the 1-based column it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub column: usize,
}

/// ## Summary
/// Splits a formula into tokens, skipping whitespace.
///
/// ## Errors
/// Returns an error for characters outside the language, unknown
/// identifiers, lone `=`, `!`, `&` or `|`, and integer literals that
/// overflow `i64`.
pub fn tokenize(source: &str) -> FormulaResult<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let column = i + 1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal
                .parse::<i64>()
                .map_err(|_err| FormulaError::new(FormulaErrorKind::IntegerOverflow, column))?;
            tokens.push(Token {
                kind: TokenKind::Integer(value),
                column,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let kind = match word.as_str() {
                "year" => TokenKind::Year,
                "true" => TokenKind::Boolean(true),
                "false" => TokenKind::Boolean(false),
                _ => {
                    return Err(FormulaError::new(
                        FormulaErrorKind::UnknownIdentifier(word),
                        column,
                    ));
                }
            };
            tokens.push(Token { kind, column });
            continue;
        }

        let next = chars.get(i + 1).copied();
        let (kind, width) = match (c, next) {
            ('%', _) => (TokenKind::Percent, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('=', Some('=')) => (TokenKind::EqEq, 2),
            ('!', Some('=')) => (TokenKind::NotEq, 2),
            ('&', Some('&')) => (TokenKind::AndAnd, 2),
            ('|', Some('|')) => (TokenKind::OrOr, 2),
            _ => {
                return Err(FormulaError::new(
                    FormulaErrorKind::UnexpectedCharacter(c),
                    column,
                ));
            }
        };
        tokens.push(Token { kind, column });
        i += width;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_gregorian_rule() {
        assert_eq!(
            kinds("(year % 4 == 0 && year % 100 != 0) || year % 400 == 0"),
            vec![
                TokenKind::LParen,
                TokenKind::Year,
                TokenKind::Percent,
                TokenKind::Integer(4),
                TokenKind::EqEq,
                TokenKind::Integer(0),
                TokenKind::AndAnd,
                TokenKind::Year,
                TokenKind::Percent,
                TokenKind::Integer(100),
                TokenKind::NotEq,
                TokenKind::Integer(0),
                TokenKind::RParen,
                TokenKind::OrOr,
                TokenKind::Year,
                TokenKind::Percent,
                TokenKind::Integer(400),
                TokenKind::EqEq,
                TokenKind::Integer(0),
            ]
        );
    }

    #[test]
    fn test_tokenize_columns() {
        let tokens = tokenize("  year==1").unwrap();
        assert_eq!(tokens[0].column, 3);
        assert_eq!(tokens[1].column, 7);
        assert_eq!(tokens[2].column, 9);
    }

    #[test]
    fn test_tokenize_rejects_single_ampersand() {
        let err = tokenize("true & false").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::UnexpectedCharacter('&'));
        assert_eq!(err.column, 6);
    }

    #[test]
    fn test_tokenize_rejects_unknown_identifier() {
        let err = tokenize("month % 2 == 0").unwrap_err();
        assert_eq!(
            err.kind,
            FormulaErrorKind::UnknownIdentifier("month".to_string())
        );
        assert_eq!(err.column, 1);
    }

    #[test]
    fn test_tokenize_rejects_overflowing_literal() {
        let err = tokenize("year % 99999999999999999999 == 0").unwrap_err();
        assert_eq!(err.kind, FormulaErrorKind::IntegerOverflow);
    }
}
