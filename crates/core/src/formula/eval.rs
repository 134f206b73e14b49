//! Postfix evaluation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

use super::compile::{BinaryOp, Function, Instruction, to_postfix};
use super::error::EvalError;
use super::token::tokenize;

/// Variable lookup used during evaluation.
pub trait Bindings {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<Decimal>;
}

impl<S: std::hash::BuildHasher> Bindings for HashMap<String, Decimal, S> {
    fn lookup(&self, name: &str) -> Option<Decimal> {
        self.get(name).copied()
    }
}

impl Bindings for BTreeMap<String, Decimal> {
    fn lookup(&self, name: &str) -> Option<Decimal> {
        self.get(name).copied()
    }
}

impl Bindings for [(&str, Decimal)] {
    fn lookup(&self, name: &str) -> Option<Decimal> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> Bindings for [(&str, Decimal); N] {
    fn lookup(&self, name: &str) -> Option<Decimal> {
        self.as_slice().lookup(name)
    }
}

/// A compiled formula.
///
/// Parsing validates the grammar once; variables are resolved on each
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    program: Vec<Instruction>,
}

impl Formula {
    /// Tokenizes and compiles `source`.
    pub fn parse(source: &str) -> Result<Self, EvalError> {
        let tokens = tokenize(source)?;
        let program = to_postfix(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            program,
        })
    }

    /// Returns the original formula text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the names of all variables the formula reads, in order of
    /// first use.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for instruction in &self.program {
            if let Instruction::Load(name) = instruction
                && !names.contains(&name.as_str())
            {
                names.push(name.as_str());
            }
        }
        names
    }

    /// Evaluates the formula against `bindings`.
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> Result<Decimal, EvalError> {
        let mut stack: Vec<Decimal> = Vec::with_capacity(self.program.len());

        for instruction in &self.program {
            let value = match instruction {
                Instruction::Push(value) => *value,
                Instruction::Load(name) => bindings
                    .lookup(name)
                    .ok_or_else(|| EvalError::UnknownIdentifier(name.clone()))?,
                Instruction::Binary(op) => {
                    let rhs = pop(&mut stack)?;
                    let lhs = pop(&mut stack)?;
                    apply_binary(*op, lhs, rhs)?
                }
                Instruction::Call(function) => apply_function(*function, &mut stack)?,
            };
            stack.push(value);
        }

        match stack.as_slice() {
            [result] => Ok(*result),
            _ => Err(EvalError::MalformedExpression),
        }
    }
}

impl std::str::FromStr for Formula {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses and evaluates `expression` in one step.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rust_decimal_macros::dec;
/// use buildcost_core::formula::evaluate;
///
/// let mut bindings = HashMap::new();
/// bindings.insert("area".to_string(), dec!(120));
/// assert_eq!(evaluate("ceil(area / 0.72)", &bindings).unwrap(), dec!(167));
/// ```
pub fn evaluate<B: Bindings + ?Sized>(expression: &str, bindings: &B) -> Result<Decimal, EvalError> {
    Formula::parse(expression)?.evaluate(bindings)
}

fn pop(stack: &mut Vec<Decimal>) -> Result<Decimal, EvalError> {
    stack.pop().ok_or(EvalError::MalformedExpression)
}

fn apply_binary(op: BinaryOp, lhs: Decimal, rhs: Decimal) -> Result<Decimal, EvalError> {
    let result = match op {
        BinaryOp::Add => lhs.checked_add(rhs),
        BinaryOp::Sub => lhs.checked_sub(rhs),
        BinaryOp::Mul => lhs.checked_mul(rhs),
        BinaryOp::Div => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_div(rhs)
        }
        BinaryOp::Rem => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            lhs.checked_rem(rhs)
        }
        BinaryOp::Pow => return power(lhs, rhs),
    };
    result.ok_or(EvalError::OutOfRange)
}

fn power(base: Decimal, exponent: Decimal) -> Result<Decimal, EvalError> {
    if base.is_zero() {
        return match exponent.cmp(&Decimal::ZERO) {
            Ordering::Less => Err(EvalError::DivisionByZero),
            Ordering::Equal => Ok(Decimal::ONE),
            Ordering::Greater => Ok(Decimal::ZERO),
        };
    }

    let integral = exponent.fract().is_zero();
    if base.is_sign_negative() && !integral {
        return Err(EvalError::UndefinedPower { base, exponent });
    }

    let result = if integral {
        exponent.to_i64().and_then(|exp| base.checked_powi(exp))
    } else {
        base.checked_powd(exponent)
    };
    result.map_or_else(|| power_beyond_precision(base, exponent), Ok)
}

/// Resolves a power that could not be computed directly.
///
/// Results too small to represent underflow to zero; results too large are
/// `OutOfRange`.
fn power_beyond_precision(base: Decimal, exponent: Decimal) -> Result<Decimal, EvalError> {
    let magnitude = base.abs();
    if magnitude == Decimal::ONE {
        // Fractional exponents of negative bases were rejected above.
        let odd = (exponent % Decimal::TWO).abs() == Decimal::ONE;
        return Ok(if base.is_sign_negative() && odd {
            Decimal::NEGATIVE_ONE
        } else {
            Decimal::ONE
        });
    }

    if (magnitude > Decimal::ONE) == (exponent > Decimal::ZERO) {
        Err(EvalError::OutOfRange)
    } else {
        Ok(Decimal::ZERO)
    }
}

fn apply_function(function: Function, stack: &mut Vec<Decimal>) -> Result<Decimal, EvalError> {
    let value = match function {
        Function::Min | Function::Max => {
            let rhs = pop(stack)?;
            let lhs = pop(stack)?;
            if function == Function::Min {
                lhs.min(rhs)
            } else {
                lhs.max(rhs)
            }
        }
        Function::Round => {
            pop(stack)?.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
        Function::Ceil => pop(stack)?.ceil(),
        Function::Floor => pop(stack)?.floor(),
    };
    Ok(value)
}
