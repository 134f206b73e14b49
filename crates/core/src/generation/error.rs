//! Generation error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::formula::EvalError;

/// Why a template did not produce a line item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The quantity formula failed.
    #[error("Quantity formula failed: {0}")]
    Formula(#[from] EvalError),

    /// The formula produced zero or a negative quantity.
    #[error("Quantity must be positive, formula produced {0}")]
    NonPositiveQuantity(Decimal),
}
