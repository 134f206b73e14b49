//! Formula evaluation error types.

use thiserror::Error;

/// Errors that can occur while parsing or evaluating a formula.
///
/// Every variant fails the whole evaluation. Callers must not substitute a
/// default value for a failed formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A character that is not part of the formula grammar.
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character in the source.
        position: usize,
    },

    /// A numeric literal that does not fit a decimal.
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    /// An identifier that is neither a bound variable nor a known function.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Unbalanced `(` or `)`.
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    /// A comma outside a function argument list.
    #[error("Misplaced comma")]
    MisplacedComma,

    /// Operands and operators do not form a single value.
    #[error("Malformed expression")]
    MalformedExpression,

    /// Division or modulo by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The result is too large to be represented as a decimal.
    #[error("Result is out of range")]
    OutOfRange,

    /// A negative base raised to a fractional power has no real value.
    #[error("Undefined power: {base} ^ {exponent}")]
    UndefinedPower {
        /// Base of the power.
        base: rust_decimal::Decimal,
        /// Fractional exponent.
        exponent: rust_decimal::Decimal,
    },
}
