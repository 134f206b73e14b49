//! Installment error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Structural problems in a list of payment terms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallmentError {
    /// Installment numbers must run 1, 2, 3, ... in order.
    #[error("Installment numbers must be contiguous: expected {expected}, found {found}")]
    NonContiguous {
        /// Expected installment number.
        expected: u32,
        /// Installment number found at that position.
        found: u32,
    },

    /// A percentage or fixed amount is negative.
    #[error("Installment {installment} has a negative value: {value}")]
    NegativeValue {
        /// Installment number.
        installment: u32,
        /// The negative value.
        value: Decimal,
    },

    /// An even split needs at least one installment.
    #[error("Installment count must be at least 1")]
    ZeroCount,
}
