//! Formula tokenizer.

use std::iter::Peekable;
use std::str::CharIndices;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::compile::BinaryOp;
use super::error::EvalError;

/// A lexical token of a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Decimal literal.
    Number(Decimal),
    /// Variable or function name.
    Ident(String),
    /// Binary operator.
    Operator(BinaryOp),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
}

/// Splits a formula into tokens in a single left-to-right pass.
///
/// Whitespace is skipped. The first character outside the grammar stops the
/// scan with its byte position.
pub fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && next_is_digit(source, position)) {
            tokens.push(Token::Number(scan_number(source, &mut chars)?));
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            tokens.push(Token::Ident(scan_ident(source, &mut chars)));
            continue;
        }

        let token = match ch {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            _ => match BinaryOp::from_symbol(ch) {
                Some(op) => Token::Operator(op),
                None => return Err(EvalError::UnexpectedCharacter { ch, position }),
            },
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

fn next_is_digit(source: &str, position: usize) -> bool {
    source[position + 1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn scan_number(source: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<Decimal, EvalError> {
    let mut literal = String::new();
    let mut seen_dot = false;

    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_ascii_digit() {
            literal.push(ch);
        } else if ch == '.' && !seen_dot && next_is_digit(source, position) {
            if literal.is_empty() {
                literal.push('0');
            }
            literal.push(ch);
            seen_dot = true;
        } else {
            break;
        }
        chars.next();
    }

    Decimal::from_str(&literal).map_err(|_| EvalError::InvalidNumber(literal))
}

fn scan_ident(source: &str, chars: &mut Peekable<CharIndices<'_>>) -> String {
    let Some(&(start, _)) = chars.peek() else {
        return String::new();
    };
    let mut end = start;

    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            end = position + ch.len_utf8();
            chars.next();
        } else {
            break;
        }
    }

    source[start..end].to_string()
}
