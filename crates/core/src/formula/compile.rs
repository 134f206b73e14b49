//! Infix to postfix conversion (shunting-yard).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::EvalError;
use super::token::Token;

/// Binary operators, in the order they appear in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `^`
    Pow,
}

impl BinaryOp {
    /// Parses an operator symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Rem),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// Binding strength: `^` 4, `* / %` 3, `+ -` 2.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow => 4,
            Self::Mul | Self::Div | Self::Rem => 3,
            Self::Add | Self::Sub => 2,
        }
    }

    /// Only `^` groups to the right.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    /// Smaller of two values.
    Min,
    /// Larger of two values.
    Max,
    /// Nearest integer, halves away from zero.
    Round,
    /// Smallest integer not below the value.
    Ceil,
    /// Largest integer not above the value.
    Floor,
}

impl Function {
    /// Looks up a function by name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "round" => Some(Self::Round),
            "ceil" => Some(Self::Ceil),
            "floor" => Some(Self::Floor),
            _ => None,
        }
    }

    /// Number of arguments the function takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Min | Self::Max => 2,
            Self::Round | Self::Ceil | Self::Floor => 1,
        }
    }
}

/// A postfix instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Push a literal.
    Push(Decimal),
    /// Push the value bound to a variable.
    Load(String),
    /// Pop two operands and push the result.
    Binary(BinaryOp),
    /// Pop the function's arguments and push the result.
    Call(Function),
}

enum StackEntry {
    Operator(BinaryOp),
    Function(Function),
    Paren { call: Option<Function>, commas: usize },
}

/// Converts tokens to postfix order.
///
/// Function names wait on the operator stack until their closing
/// parenthesis is popped. A function call with the wrong number of
/// arguments is a malformed expression.
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Instruction>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();
    let mut pending_call: Option<Function> = None;

    for token in tokens {
        if pending_call.is_some() && *token != Token::LeftParen {
            return Err(EvalError::MalformedExpression);
        }

        match token {
            Token::Number(value) => output.push(Instruction::Push(*value)),
            Token::Ident(name) => match Function::from_name(name) {
                Some(function) => {
                    stack.push(StackEntry::Function(function));
                    pending_call = Some(function);
                }
                None => output.push(Instruction::Load(name.clone())),
            },
            Token::Operator(op) => {
                while let Some(StackEntry::Operator(top)) = stack.last() {
                    let top = *top;
                    let pops = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && !op.is_right_associative());
                    if !pops {
                        break;
                    }
                    stack.pop();
                    output.push(Instruction::Binary(top));
                }
                stack.push(StackEntry::Operator(*op));
            }
            Token::LeftParen => {
                stack.push(StackEntry::Paren {
                    call: pending_call.take(),
                    commas: 0,
                });
            }
            Token::Comma => {
                flush_operators(&mut stack, &mut output);
                match stack.last_mut() {
                    Some(StackEntry::Paren {
                        call: Some(_),
                        commas,
                    }) => *commas += 1,
                    _ => return Err(EvalError::MisplacedComma),
                }
            }
            Token::RightParen => {
                flush_operators(&mut stack, &mut output);
                let Some(StackEntry::Paren { call, commas }) = stack.pop() else {
                    return Err(EvalError::MismatchedParentheses);
                };
                if let Some(function) = call {
                    if commas + 1 != function.arity() {
                        return Err(EvalError::MalformedExpression);
                    }
                    // The function entry sits directly below its parenthesis.
                    stack.pop();
                    output.push(Instruction::Call(function));
                }
            }
        }
    }

    if pending_call.is_some() {
        return Err(EvalError::MalformedExpression);
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Operator(op) => output.push(Instruction::Binary(op)),
            StackEntry::Paren { .. } | StackEntry::Function(_) => {
                return Err(EvalError::MismatchedParentheses);
            }
        }
    }

    Ok(output)
}

fn flush_operators(stack: &mut Vec<StackEntry>, output: &mut Vec<Instruction>) {
    while let Some(StackEntry::Operator(op)) = stack.last() {
        output.push(Instruction::Binary(*op));
        stack.pop();
    }
}
