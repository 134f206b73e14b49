//! Restricted arithmetic formulas for quantity derivation.
//!
//! Formulas support decimal literals, named variables, the functions
//! `min`, `max`, `round`, `ceil` and `floor`, the binary operators
//! `+ - * / % ^`, parentheses, and commas between function arguments.
//! Nothing else is accepted.

pub mod compile;
pub mod error;
pub mod eval;
pub mod token;

#[cfg(test)]
mod props;

pub use compile::{BinaryOp, Function, Instruction};
pub use error::EvalError;
pub use eval::{Bindings, Formula, evaluate};
pub use token::{Token, tokenize};
